use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use xeroxchat::{app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xeroxchat=info")),
        )
        .init();

    let state = AppState::new(&config);
    let app = app(state, &config.public_dir);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, public_dir = %config.public_dir.display(), "server is running");
    axum::serve(listener, app).await?;

    Ok(())
}
