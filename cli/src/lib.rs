//! codeql-n1ght command handlers, exposed for unit tests.

pub mod commands;
