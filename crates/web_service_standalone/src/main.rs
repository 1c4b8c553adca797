use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::config::{load_server_config, ServerConfig};

/// Serve session-scoped todo lists over HTTP
#[derive(Debug, Parser)]
#[command(name = "web_service_standalone", version)]
struct Args {
    /// Interface to bind
    #[arg(long, env = "APP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short, env = "APP_PORT")]
    port: Option<u16>,

    /// Number of HTTP workers
    #[arg(long, env = "APP_WORKERS")]
    workers: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers.filter(|w| *w > 0) {
            config.workers = workers;
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(true)
                    .with_file(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Args::parse().apply(load_server_config());
    tracing::info!(
        "Starting standalone web service on {}",
        config.bind_address()
    );

    if let Err(e) = web_service::server::run(config).await {
        tracing::error!("Failed to run web service: {:#}", e);
        std::process::exit(1);
    }
}
