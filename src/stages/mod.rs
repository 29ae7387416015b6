pub mod controller;
pub mod normalize;
pub mod runner;
pub mod validate;

pub use controller::*;
pub use normalize::*;
pub use runner::*;
pub use validate::*;
