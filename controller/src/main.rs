mod api;
mod fetch;
mod render;
mod session;
#[cfg(test)]
mod testutil;

use anyhow::{anyhow, Result};
use api::HttpDirectoryApi;
use clap::{Parser, Subcommand};
use session::SessionView;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Foxtrack controller - operator dashboard for tracked devices
#[derive(Parser)]
#[command(name = "foxtrack", version, about)]
struct Cli {
    /// Server base URL
    #[arg(long, env = "FOXTRACK_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current session state
    Status,
    /// Exchange an identity assertion for a session
    Login {
        /// Assertion obtained from the identity provider
        #[arg(long)]
        assertion: String,
    },
    /// End the current session
    Logout,
    /// List devices with their last known locations and commands
    Devices,
    /// Trigger a command on a device
    Trigger {
        /// Device id
        #[arg(long)]
        device: i64,
        /// Zero-based index into the device's command list
        #[arg(long)]
        command: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the table output clean; raise with RUST_LOG when debugging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();
    let api = HttpDirectoryApi::new(&cli.base_url)?;

    match cli.command {
        Command::Status => match SessionView::check(&api).await? {
            SessionView::LoggedIn { email } => println!("Logged in as {}", email),
            SessionView::LoggedOut => println!("Logged out"),
        },

        Command::Login { assertion } => match session::login(&api, &assertion).await {
            Ok(email) => println!("Logged in as {}", email),
            Err(e) => return Err(anyhow!("Login failure: {}", e)),
        },

        Command::Logout => {
            session::logout(&api).await;
            println!("Logged out");
        }

        Command::Devices => {
            let SessionView::LoggedIn { email } = SessionView::check(&api).await? else {
                return Err(anyhow!("Not logged in"));
            };

            println!("Devices for {}", email);
            print!(
                "{}",
                render::render_devices_view(fetch::fetch_device_table(&api).await)
            );
        }

        Command::Trigger { device, command } => {
            let name = fetch::trigger_command(&api, device, command).await?;
            println!("Triggered {} on device {}", name, device);
        }
    }

    Ok(())
}
