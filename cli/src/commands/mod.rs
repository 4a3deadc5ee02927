pub mod cli;
pub mod database;
pub mod decompile;
pub mod run;
pub mod scan;
pub mod tools;
