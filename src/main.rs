mod app;
mod backend;
mod config;
mod logging;
mod models;
mod payload;
mod qr;
mod retriever;
mod ui;

use anyhow::{Context, Result};
use backend::nm::NetworkManagerBackend;
use backend::pkexec::PkexecReader;
use backend::secret_service::SecretServiceStore;
use clap::Parser;
use config::Settings;
use retriever::CredentialRetriever;
use tracing::{error, info};
use ui::GtkPresenter;

#[derive(Parser, Debug)]
#[command(
    name = "wisharify",
    version,
    about = "Show the connected Wi-Fi network as a QR code for phones to scan."
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();

    let settings = Settings::default();
    if let Err(err) = try_main(&settings) {
        error!(error = ?err, "wisharify exited with error");
        eprintln!("Error: {err:#}");
        ui::show_error(&settings, &format!("{err:#}"));
        std::process::exit(1);
    }
}

fn try_main(settings: &Settings) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting wisharify");

    let inspector = NetworkManagerBackend::new();
    let keyring = SecretServiceStore::new(&settings.keyring_service);
    let escalation = PkexecReader::new(&settings.psk_field, NetworkManagerBackend::new());
    let retriever = CredentialRetriever::new(&keyring, &escalation);
    let presenter = GtkPresenter::new(settings.clone());

    app::run(&inspector, &retriever, &presenter).context("could not share Wi-Fi network")?;
    Ok(())
}
