use crate::cli::cli::{Cli, Commands};
use crate::config::config::Config;
use crate::report::sponge::TestCase;
use crate::stamp::generate::{generate, resolve_files, GenerateRequest};
use crate::stamp::resolver::Resolver;
use clap::Parser;
use tracing::debug;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen {
            output,
            template,
            var_format,
            pattern_set,
            status_files,
        } => {
            let resolver = build_resolver(pattern_set)?;
            let req = GenerateRequest {
                output,
                template,
                var_format,
                status_files,
            };
            generate(&resolver, &req).await?;
        }
        Commands::Vars {
            json,
            pattern_set,
            status_files,
        } => {
            let resolver = build_resolver(pattern_set)?;
            let vars = resolve_files(&resolver, &status_files).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&vars)?);
            } else {
                for (k, v) in &vars {
                    println!("{k} {v}");
                }
            }
        }
        Commands::Sponge {
            name,
            passed,
            message,
        } => {
            println!("{}", TestCase::new(name, passed, message));
        }
    }

    Ok(())
}

fn build_resolver(pattern_set: Option<String>) -> anyhow::Result<Resolver> {
    let config = Config::create(pattern_set)?;
    debug!(pattern_set = %config.pattern_set_name, "selected pattern set");
    Ok(Resolver::new(config.patterns()?))
}
