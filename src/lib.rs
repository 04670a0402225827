pub mod cli;
pub mod commands;
pub mod mlst;
pub mod utils;
