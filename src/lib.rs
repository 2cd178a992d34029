pub mod cli;
pub mod config;
pub mod filesystem;
pub mod report;
pub mod stamp;
