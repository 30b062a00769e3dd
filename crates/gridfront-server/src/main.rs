use clap::{value_parser, Arg, ArgAction, Command};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("gridfront-server")
        .version(gridfront_kernel::VERSION)
        .about("Serve the gridfront solver over HTTP")
        .arg(
            Arg::new("addr")
                .long("addr")
                .default_value("127.0.0.1:8080")
                .value_parser(value_parser!(SocketAddr))
                .help("Address to listen on"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match matches.get_count("verbose") {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let Some(&addr) = matches.get_one::<SocketAddr>("addr") else {
        anyhow::bail!("missing listen address");
    };

    let (bound, server) = warp::serve(gridfront_server::routes())
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })?;

    tracing::info!(%bound, version = gridfront_kernel::VERSION, "Listening");
    server.await;
    tracing::info!("Shut down");
    Ok(())
}
