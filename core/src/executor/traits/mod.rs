pub mod renderer;
pub mod tool;

pub use renderer::*;
pub use tool::*;
