use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = event_polls::start_server().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
