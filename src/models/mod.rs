pub mod report;
pub mod transcript;

pub use report::*;
pub use transcript::*;
