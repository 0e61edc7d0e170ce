use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use wlbb::agent::{Agent, SimpleAgent};
use wlbb::config::{CfgConfigLoader, ConfigDict, ConfigLoader, DefaultConfig, render_cfg, validate_config_name};
use wlbb::logging::Logger;

mod cli;
mod settings;

use cli::{Cli, Commands};
use settings::Settings;

fn setup_logging(log_dir: &Path, level: LevelFilter) -> Result<()> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("wlbb.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn log_level(cli: &Cli, settings: &Settings) -> Result<LevelFilter> {
    if cli.is_verbose() {
        return Ok(LevelFilter::Debug);
    }
    match &settings.log_level {
        Some(level) => level
            .parse::<LevelFilter>()
            .map_err(|_| eyre::eyre!("Invalid log level: {}", level)),
        None => Ok(LevelFilter::Info),
    }
}

fn print_dict(dict: &ConfigDict) {
    if dict.is_empty() {
        println!("{}", "(empty)".dimmed());
    } else {
        print!("{}", render_cfg(dict));
    }
}

fn run_application(cli: &Cli, settings: &Settings, logger: &Arc<Logger>) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        Commands::Paths => handle_paths_command(settings),
        Commands::List => handle_list_command(settings),
        Commands::Show { name } => handle_show_command(name, settings),
        Commands::Init { agent } => handle_init_command(agent, settings, logger),
        Commands::Delete { name } => handle_delete_command(name, settings),
        Commands::Defaults => handle_defaults_command(),
    }
}

fn handle_paths_command(settings: &Settings) -> Result<()> {
    println!("{} {}", "config path:".green(), wlbb::paths::config_path()?.display());
    println!("{} {}", "data path:  ".green(), wlbb::paths::data_path()?.display());
    println!("{} {}", "cache path: ".green(), wlbb::paths::cache_path()?.display());
    println!("{} {}", "configs:    ".green(), settings.config_dir()?.display());
    println!("{} {}", "logs:       ".green(), settings.log_dir()?.display());
    Ok(())
}

fn handle_list_command(settings: &Settings) -> Result<()> {
    let dir = settings.config_dir()?;
    info!("Listing configs in {}", dir.display());

    let names = CfgConfigLoader::new()
        .get_config_list(&dir)
        .context(format!("Failed to list configs in {}", dir.display()))?;

    if names.is_empty() {
        println!("{} {}", "No configs in".yellow(), dir.display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn handle_show_command(name: &str, settings: &Settings) -> Result<()> {
    validate_config_name(name)?;
    let dir = settings.config_dir()?;

    let dict = CfgConfigLoader::new()
        .load_config(&dir, name)
        .context(format!("Failed to load config '{}'", name))?;

    println!("{} {}", "Config:".green(), name);
    print_dict(&dict);
    Ok(())
}

fn handle_init_command(agent_name: &str, settings: &Settings, logger: &Arc<Logger>) -> Result<()> {
    let dir = settings.config_dir()?;
    info!("Initializing config of agent {} in {}", agent_name, dir.display());

    let mut agent = SimpleAgent::new(agent_name, Arc::clone(logger))?;
    let config = agent.config().clone().with_config_dir(&dir);
    agent.set_config(config)?;

    agent.init().context("Failed to load agent config")?;
    agent.config().save(None).context("Failed to save agent config")?;

    println!(
        "{} {}",
        "Saved:".green(),
        CfgConfigLoader::new().config_path(&dir, agent.name()).display()
    );
    print_dict(&agent.config().get_config_dict());
    Ok(())
}

fn handle_delete_command(name: &str, settings: &Settings) -> Result<()> {
    validate_config_name(name)?;
    let dir = settings.config_dir()?;

    CfgConfigLoader::new()
        .delete_config(&dir, name)
        .context(format!("Failed to delete config '{}'", name))?;

    println!("{} {}", "Deleted:".red(), name);
    Ok(())
}

fn handle_defaults_command() -> Result<()> {
    let defaults = DefaultConfig::builtin();
    let dict = defaults.load().context("Failed to load builtin defaults")?;

    match defaults.dir() {
        Some(dir) => println!("{} {}", "Defaults:".green(), dir.display()),
        None => println!("{} {} (builtin)", "Defaults:".green(), defaults.name()),
    }
    print_dict(&dict);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_ref()).context("Failed to load settings")?;

    setup_logging(&settings.log_dir()?, log_level(&cli, &settings)?).context("Failed to setup logging")?;

    info!("Starting with settings from: {:?}", cli.settings);

    let logger = Arc::new(Logger::new());
    let result = run_application(&cli, &settings, &logger).context("Application failed");
    logger.flush();

    result
}
