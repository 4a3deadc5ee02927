//! External tool invocation: one command line in, captured output or a
//! typed failure out.

mod decode;
mod io_pump;
mod process;
mod traits;
pub mod types;

pub use decode::decode_output;
pub use process::ProcessInvoker;
pub use traits::ToolInvoker;
pub use types::ToolInvocation;
