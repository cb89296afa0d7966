use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use registration_core::{
    BufferedNotificationSink, EmptyCatalogPolicy, ExternalNavigator, FixedPassCatalog,
    KeyedPassCatalog, LoggingNavigator, PassCatalog, RegistrationController,
    TracingNotificationSink,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod browser;
mod config;
mod session;
mod view;

use browser::SystemBrowserNavigator;
use config::{load_settings, parse_profile_url, WizardSettings};
use session::WizardSession;

#[derive(Parser, Debug)]
#[command(about = "Register a code and activate your Attraction Pass")]
struct Cli {
    /// Settings file; defaults to ./wizard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML pass catalog keyed by registration code.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    profile_url: Option<String>,
    #[arg(long)]
    min_mobile_len: Option<usize>,
    #[arg(long)]
    lookup_timeout_ms: Option<u64>,
    /// `reject` or `advance`.
    #[arg(long)]
    empty_catalog: Option<EmptyCatalogPolicy>,
    /// Print the profile link instead of launching a browser.
    #[arg(long)]
    no_browser: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive registration wizard (default).
    Run,
    /// Print the passes a registration code resolves to, as JSON.
    Passes {
        #[arg(long)]
        code: String,
    },
}

impl Cli {
    fn apply_overrides(&self, settings: &mut WizardSettings) -> Result<()> {
        if let Some(path) = &self.catalog {
            settings.catalog_path = Some(path.clone());
        }
        if let Some(raw) = &self.profile_url {
            settings.profile_url = parse_profile_url(raw)?;
        }
        if let Some(v) = self.min_mobile_len {
            settings.min_mobile_len = v;
        }
        if let Some(v) = self.lookup_timeout_ms {
            settings.lookup_timeout = Duration::from_millis(v);
        }
        if let Some(v) = self.empty_catalog {
            settings.empty_catalog = v;
        }
        Ok(())
    }
}

fn build_catalog(settings: &WizardSettings) -> Result<Box<dyn PassCatalog>> {
    match &settings.catalog_path {
        Some(path) => {
            let catalog = KeyedPassCatalog::from_path(path)?;
            info!(path = %path.display(), codes = catalog.codes().count(), "loaded pass catalog");
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(FixedPassCatalog::default())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings)?;
    let catalog = build_catalog(&settings)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Passes { code } => {
            let passes = catalog
                .lookup(&code)
                .await
                .with_context(|| format!("failed to resolve passes for code {code}"))?;
            println!("{}", serde_json::to_string_pretty(&passes)?);
        }
        Command::Run => {
            let notices = BufferedNotificationSink::new();
            let controller = RegistrationController::with_options(
                catalog,
                (notices.clone(), TracingNotificationSink),
                settings.controller_options(),
            );
            let navigator: Box<dyn ExternalNavigator> = if cli.no_browser {
                Box::new(LoggingNavigator::new())
            } else {
                Box::new(SystemBrowserNavigator)
            };
            let mut session = WizardSession::new(
                controller,
                notices,
                navigator,
                settings.profile_url.clone(),
                io::stdout().lock(),
            );
            session.run(io::stdin().lock()).await?;
            info!(step = ?session.controller().step(), "wizard finished");
        }
    }

    Ok(())
}
