use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use recloser_configurator::config::{Config, Overrides};
use recloser_configurator::outline;
use recloser_configurator::render::Renderer;
use recloser_configurator::source;
use recloser_configurator::tui::app::TuiApp;
use recloser_configurator::tui::runner;

#[derive(Parser)]
#[command(name = "recloser-configurator", version, about = "Browse recloser firmware settings")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON gateway base URL (overrides RECLOSER_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Inventory file to serve instead of a backend
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Preferred label language, e.g. enUs or ptBr
    #[arg(long = "lang", global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal configurator (default)
    Tui,
    /// List reclosers and their firmware versions
    Inventory,
    /// List the top-level services of a firmware version
    Services {
        #[arg(long)]
        firmware: i64,
    },
    /// Print the rendered layout of a service
    Render {
        #[arg(long)]
        service: i64,
        /// Emit the rendered blocks as JSON
        #[arg(long)]
        json: bool,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    config.apply_env();
    config.apply_overrides(Overrides {
        endpoint: cli.endpoint,
        fixture: cli.fixture,
        language: cli.language,
    });

    // The TUI owns the screen, so its logs go to a file.
    if matches!(command, Command::Tui) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }

    let source = config.source().context("failed to set up layout source")?;
    info!("label language {}", config.language);

    match command {
        Command::Tui => {
            let app = TuiApp::new(&config);
            runner::run(app, source)
                .await
                .context("terminal UI failed")?;
        }
        Command::Inventory => {
            let reclosers = source::load_inventory(source.as_ref()).await;
            print!("{}", outline::inventory_listing(&reclosers, &config.language));
        }
        Command::Services { firmware } => {
            let services = source::load_service_summaries(source.as_ref(), firmware).await;
            if services.is_empty() {
                bail!("no services for firmware {firmware}");
            }
            print!("{}", outline::service_listing(&services, &config.language));
        }
        Command::Render { service, json } => {
            let Some(layout) = source::load_service_layout(source.as_ref(), service).await else {
                bail!("no layout for service {service}");
            };
            let page = Renderer::new(&config.language).render_page(&layout);
            if json {
                let text = serde_json::to_string_pretty(&page).context("failed to encode page")?;
                println!("{text}");
            } else {
                print!("{}", outline::outline(&page));
            }
        }
    }

    Ok(())
}
