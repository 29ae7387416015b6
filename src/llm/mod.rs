pub mod backend;
pub mod client;
pub mod prompts;
pub mod schema;

pub use backend::*;
pub use client::*;
pub use prompts::*;
pub use schema::*;
