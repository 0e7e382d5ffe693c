//! Request router CLI.
//!
//! Loads a route table from a TOML file and inspects or exercises it.
//!
//! ```text
//! request-router --config routes.toml routes
//! request-router --config routes.toml check
//! request-router --config routes.toml dispatch GET /admin/dashboard
//! ```
//!
//! `dispatch` wires every controller target named in the file to a
//! controller that prints `Target@action` for each invocation, and every
//! middleware to a callback that logs its name.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use request_router::config::{load_config, RouterConfig};
use request_router::observability::logging::init_logging;
use request_router::routing::router::MiddlewareFn;
use request_router::routing::{
    Controller, ControllerRegistry, ControllerSpec, Dispatcher, HandlerError, RouteTable,
};

#[derive(Parser)]
#[command(name = "request-router")]
#[command(about = "Inspect and exercise a request route table", long_about = None)]
struct Cli {
    /// Route table configuration file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table as JSON
    Routes,
    /// Validate the configuration
    Check,
    /// Dispatch a request against the table
    Dispatch {
        /// HTTP method
        method: String,
        /// Request path
        path: String,
    },
}

/// Prints each action it is asked to run.
struct EchoController {
    target: String,
}

impl Controller for EchoController {
    fn call(&mut self, action: &str) -> Result<(), HandlerError> {
        tracing::info!(controller = %self.target, action = %action, "Handler invoked");
        println!("{}@{}", self.target, action);
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli.config)?;

    init_logging(&config.observability)?;
    tracing::debug!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        middlewares = config.middlewares.len(),
        "request-router starting"
    );

    let table = RouteTable::from_config(&config, |name| {
        let name = name.to_string();
        Arc::new(move || tracing::info!(middleware = %name, "Middleware ran")) as MiddlewareFn
    })?;

    match cli.command {
        Commands::Routes => {
            let routes: Vec<_> = table.routes().map(|r| r.summary()).collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Check => {
            println!(
                "ok: {} routes, {} middlewares",
                config.routes.len(),
                config.middlewares.len()
            );
        }
        Commands::Dispatch { method, path } => {
            let dispatcher = Dispatcher::new(table, echo_controllers(&config));
            let summary = dispatcher.dispatch(&path, &method)?;
            if summary.is_no_match() {
                eprintln!("no route matched {} {}", summary.method, summary.path);
            }
        }
    }

    Ok(())
}

/// Register an [`EchoController`] for every target the configuration names.
fn echo_controllers(config: &RouterConfig) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    for route in &config.routes {
        // Validation has already rejected malformed controller strings.
        let Ok(spec) = ControllerSpec::parse(&route.controller) else {
            continue;
        };
        let target = spec.target();
        if registry.contains(target) {
            continue;
        }
        let name = target.to_string();
        registry.register(target, move || EchoController {
            target: name.clone(),
        });
    }
    registry
}

/// `error: <display>` followed by one `caused by:` line per source.
fn render_error(err: &dyn Error) -> String {
    let mut out = format!("error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    out
}
