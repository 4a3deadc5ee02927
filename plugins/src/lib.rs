pub mod executor;
pub mod factory;
pub mod jobs;
pub mod tools;
