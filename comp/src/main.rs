//! comp - render named template components from the command line

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use component::cli::{Cli, Command, LookupArgs, build_args};
use component::config::Config;
use component::demo::{self, DemoExecutor};
use component::{Component, ComponentError, HandlebarsExecutor, Output};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > RUST_LOG > warn
    let filter = match cli_log_level.or(config_log_level) {
        Some(level) => EnvFilter::try_new(level.to_lowercase()).context(format!("Invalid log level: {}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // Rendered output owns stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;
    Ok(())
}

fn apply_lookup(config: &mut Config, lookup: &LookupArgs) {
    if !lookup.roots.is_empty() {
        debug!(roots = ?lookup.roots, "apply_lookup: overriding search roots");
        config.roots = lookup.roots.clone();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("comp starting");

    match cli.command {
        Command::Render {
            name,
            args,
            args_file,
            lookup,
        } => {
            apply_lookup(&mut config, &lookup);
            let args = build_args(&args, args_file.as_deref())?;
            let host = config.host(Output::stdout());
            Component::make_echo(&host, name, args, lookup.dir.as_deref())?;
        }
        Command::Locate { name, lookup } => {
            apply_lookup(&mut config, &lookup);
            let host = config.host(Output::stdout());
            let component = Component::new(&host, name, None, lookup.dir.as_deref());
            match component.locate_template() {
                Some(path) => println!("{} {}", component.template_name().cyan(), path.display()),
                None => {
                    return Err(ComponentError::TemplateNotFound {
                        name: component.template_name().to_string(),
                    }
                    .into());
                }
            }
        }
        Command::Demo => {
            let host = config
                .builder(Output::stdout())
                .executor(DemoExecutor::new(HandlebarsExecutor::new().strict(config.strict)))
                .build();
            config.register_plugin_dirs(&host);
            demo::install(&host);
            demo::run(&host)?;
        }
    }

    Ok(())
}
