#![allow(clippy::module_inception)]
pub mod cli;
pub mod runner;
