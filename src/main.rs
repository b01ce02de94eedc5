use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hostwatch::activity::GithubClient;
use hostwatch::client::PromClient;
use hostwatch::config::Settings;
use hostwatch::duration::parse_duration;
use hostwatch::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(about = "VPS observability dashboard backend")]
struct Args {
    /// Path to a settings file; environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address override (e.g., "127.0.0.1:3001")
    #[arg(short, long)]
    listen: Option<String>,

    /// Collaborator query timeout (e.g., "10s", "500ms")
    #[arg(long, default_value = "10s")]
    timeout: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hostwatch=info".into()),
        )
        .init();

    let args = Args::parse();

    let timeout = parse_duration(&args.timeout).unwrap_or(Duration::from_secs(10));

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        settings.listen_addr = listen;
    }

    let prometheus = PromClient::builder()
        .base_url(&settings.prometheus_url)
        .credentials(
            settings.prometheus_username.clone(),
            settings.prometheus_password.clone(),
        )
        .timeout(timeout)
        .build();

    let github = GithubClient::new(settings.github_token.clone(), timeout);

    let listen_addr = settings.listen_addr.clone();
    let state = Arc::new(AppState {
        settings,
        prometheus,
        github,
    });

    let app = server::router(state);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!(addr = %listen_addr, "serving dashboard data");
    axum::serve(listener, app).await?;

    Ok(())
}
