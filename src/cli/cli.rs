use clap::{Parser, Subcommand};
use std::path::PathBuf;

const BUILDSTAMP_LONG_VERSION: &str = concat!(
"version: ", env!("CARGO_PKG_VERSION"), "\n",
"git sha: ", env!("BUILDSTAMP_GIT_SHA"), "\n",
"build time (UTC): ", env!("BUILDSTAMP_BUILD_TIME"), "\n",
"target: ", env!("BUILDSTAMP_TARGET"), "\n",
"profile: ", env!("BUILDSTAMP_PROFILE")
);

#[derive(Parser)]
#[command(
    name = "buildstamp",
    version = env!("CARGO_PKG_VERSION"),
    long_version = BUILDSTAMP_LONG_VERSION,
    about = "Build stamping helpers for CI: workspace status → templated files, sponge test cases"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a file from workspace status files using a template
    Gen {
        /// Output file
        #[arg(long)]
        output: PathBuf,
        /// Template file; use {vars} for the variable block and {NAME} for single variables
        #[arg(long)]
        template: PathBuf,
        /// Format for one variable line, e.g. '#define {} "{}"' (key, value)
        #[arg(long = "var_format", visible_alias = "var-format")]
        var_format: String,
        /// Pattern set (general, legacy, or one from config.toml)
        #[arg(long)]
        pattern_set: Option<String>,
        /// One or more files containing buildstamp status lines
        #[arg(value_name = "PATH", required = true)]
        status_files: Vec<PathBuf>,
    },
    /// Print the resolved buildstamp variables
    Vars {
        /// Output a JSON object instead of "KEY value" lines
        #[arg(long)]
        json: bool,
        /// Pattern set (general, legacy, or one from config.toml)
        #[arg(long)]
        pattern_set: Option<String>,
        #[arg(value_name = "PATH", required = true)]
        status_files: Vec<PathBuf>,
    },
    /// Print a sponge <testcase> XML fragment
    Sponge {
        /// Test case name
        #[arg(long)]
        name: String,
        /// Mark the test case as passed (failed otherwise)
        #[arg(long)]
        passed: bool,
        /// Test case message
        #[arg(long, default_value = "")]
        message: String,
    },
}
