use clap::Parser;
use cidgate_gateway::AppState;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

/// Serve content-addressed files and directories over HTTP, at /ipfs/<cid>.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, env, default_value = "memory://")]
    node_service_addr: String,

    /// Files or directories to import before serving.
    /// The CID of each of them is logged once imported.
    paths: Vec<PathBuf>,

    /// A global log level to use when printing logs.
    /// It's also possible to set `RUST_LOG` according to
    /// `tracing_subscriber::filter::EnvFilter`, which will always have
    /// priority.
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// Print logs as JSON, one object per line.
    #[arg(long, env)]
    log_json: bool,

    /// The address to listen on.
    #[clap(flatten)]
    listen_args: tokio_listener::ListenerAddressLFlag,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    cidgate_tracing::TracingBuilder::default()
        .level(cli.log_level)
        .json(cli.log_json)
        .build()?;

    // initialize the store
    let (node_service, node_writer) =
        cidgate_castore::nodeservice::from_addr(&cli.node_service_addr).await?;

    for path in &cli.paths {
        let cid = cidgate_castore::import::ingest_path(&*node_writer, path).await?;
        info!(path=%path.display(), %cid, "imported");
    }

    let state = AppState::new(node_service);

    let app = cidgate_gateway::gen_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listen_address = &cli.listen_args.listen_address.unwrap_or_else(|| {
        "[::]:8000"
            .parse()
            .expect("invalid fallback listen address")
    });

    let listener = tokio_listener::Listener::bind(
        listen_address,
        &Default::default(),
        &cli.listen_args.listener_options,
    )
    .await?;

    info!(listen_address=%listen_address, "starting daemon");

    tokio_listener::axum07::serve(
        listener,
        app.into_make_service_with_connect_info::<tokio_listener::SomeSocketAddrClonable>(),
    )
    .await?;

    Ok(())
}
