use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Command-line entrypoint for the bookshelf service
#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the effective settings
    Config,
    /// Print every documented route
    Routes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            bookshelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.server.bind_address(),
                "bookshelf-cli serve starting"
            );

            let runtime = tokio::runtime::Runtime::new()
                .with_context(|| "failed to start tokio runtime")?;
            runtime.block_on(bookshelf_app::run(&settings))
        }
        Command::Config => {
            print_settings(&settings);
            Ok(())
        }
        Command::Routes => {
            let registry = bookshelf_app::build_registry();
            let document =
                bookshelf_http::router::openapi_document(&registry, &settings.server.base_path);
            for (method, path) in bookshelf_http::router::documented_routes(&document) {
                println!("{method:<7} {path}");
            }
            Ok(())
        }
    }
}

fn print_settings(settings: &Settings) {
    let server = &settings.server;
    println!("environment        = {}", settings.environment.as_str());
    println!("server.host        = {}", server.host);
    println!("server.port        = {}", server.port);
    println!("server.timeout_ms  = {}", server.request_timeout_ms);
    println!("server.base_path   = {:?}", server.base_path);
    println!("server.cors        = {:?}", server.cors_origins);
    println!("telemetry.format   = {:?}", settings.telemetry.log_format);
    println!("telemetry.filter   = {}", settings.telemetry.log_filter);
}
