use clap::Parser;
use tokio::net::TcpListener;

/// Local stand-in for the user, friends and groups REST services.
#[derive(Debug, Parser)]
#[command(name = "mock-server")]
struct Config {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "MOCK_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    mock_server::run(listener).await
}
