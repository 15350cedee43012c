//! Config command

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a config value
    Get {
        /// Config key (data_file, format, search_mode)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (data_file, format, search_mode)
        key: String,
        /// New value
        value: String,
    },
    /// List every config value
    List,
    /// Show the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load()?;
            let value = config.get(key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown config key: {} (available keys: {})",
                    key,
                    Config::keys().join(", ")
                )
            })?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            tracing::info!("Config {} set to {}", key, value);
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load()?;
            println!("Config file: {}", config_file_path().display());
            println!();
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
        ConfigCommands::Init { force } => {
            let path = config_file_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Created config file at {}", path.display());
        }
    }

    Ok(())
}
