#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;
pub mod invoke;

pub use error::CliError;
pub use executor::ExecutorError;
pub use invoke::ToolInvocationError;
