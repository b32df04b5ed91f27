use crate::demo::DemoApp;
use crate::logging;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::server::RouterServer;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for minirouter
#[derive(Parser)]
#[command(name = "minirouter")]
#[command(about = "Minimal method + path router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that builds a router.
#[derive(clap::Args, Debug, Clone)]
pub struct AppArgs {
    /// Application to build
    #[arg(short, long, value_enum)]
    pub app: DemoApp,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Router display name (overrides config)
    #[arg(long)]
    pub name: Option<String>,

    /// Enable or disable parameter type coercion (overrides config)
    #[arg(long)]
    pub types: Option<bool>,
}

impl AppArgs {
    /// Resolve the configuration: file (if any), environment, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = match &self.config {
            Some(path) => RuntimeConfig::load(path)?,
            None => RuntimeConfig::from_env(),
        };
        if let Some(name) = &self.name {
            config.name.clone_from(name);
        }
        if let Some(types) = self.types {
            config.types_enabled = Some(types);
        }
        Ok(config)
    }

    /// Build the selected application's router.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or route registration fails.
    pub fn build(&self) -> Result<(Router, RuntimeConfig)> {
        let config = self.runtime_config()?;
        let router = self
            .app
            .build(&config.name, config.types_enabled)
            .with_context(|| format!("failed to build {:?} application", self.app))?;
        Ok((router, config))
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve an application over HTTP
    Serve {
        #[command(flatten)]
        app: AppArgs,

        /// Listen address (overrides config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Print an application's route table
    Routes {
        #[command(flatten)]
        app: AppArgs,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Dispatch a single request in-process and print the response
    Call {
        #[command(flatten)]
        app: AppArgs,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /book/7
        path: String,
    },
}

/// Parse arguments from the process and run the selected command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Run an already-parsed command line.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { app, addr } => {
            logging::init_logging()?;
            let (router, mut config) = app.build()?;
            if let Some(addr) = addr {
                config.addr = addr;
            }
            may::config().set_stack_size(config.stack_size);
            router.dump_routes();

            RouterServer::new(router)
                .bind(config.addr.as_str())?
                .join()
        }
        Commands::Routes { app, json } => {
            let (router, _config) = app.build()?;
            let table = router.route_table();
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for route in &table {
                    let params: Vec<String> = route
                        .params
                        .iter()
                        .map(|p| format!("{}:{}", p.name, p.ty))
                        .collect();
                    println!(
                        "{:<7} {:<48} types={} params=[{}]",
                        route.method,
                        route.pattern,
                        route.types_enabled,
                        params.join(", ")
                    );
                }
            }
            Ok(())
        }
        Commands::Call { app, method, path } => {
            let (router, _config) = app.build()?;
            let response = router.handle(&method, &path);
            println!("{}", response.status_line());
            for (name, value) in &response.headers {
                println!("{name}: {value}");
            }
            println!();
            println!("{}", String::from_utf8_lossy(&response.body));
            Ok(())
        }
    }
}
