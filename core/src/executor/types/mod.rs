pub mod config;
pub mod job;
pub mod result;

pub use config::*;
pub use job::*;
pub use result::*;
