use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use motorcade::dispatcher::Dispatcher;
use motorcade::middleware::TracingMiddleware;
use motorcade::registry;
use motorcade::router::Router;
use motorcade::runtime_config::RuntimeConfig;
use motorcade::server::{AppService, HttpServer};
use motorcade::store::{CarStore, MemoryCarStore};

#[derive(Parser, Debug)]
#[command(name = "motorcade", about = "Car catalog REST service", version)]
struct Args {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0:8700")]
    addr: String,

    /// Start with an empty store instead of the demo fleet
    #[arg(long)]
    empty: bool,

    /// Print the route table at startup
    #[arg(long)]
    dump_routes: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let store: Arc<dyn CarStore> = if args.empty {
        Arc::new(MemoryCarStore::new())
    } else {
        Arc::new(MemoryCarStore::with_demo_fleet())
    };

    let mut router = Router::new();
    registry::register_routes(&mut router);
    if args.dump_routes {
        router.dump_routes();
    }

    let mut dispatcher = Dispatcher::new();
    // SAFETY: the may runtime is configured above, before any coroutine
    // spawns; each handler replies exactly once per request.
    unsafe {
        registry::register_all(&mut dispatcher, Arc::clone(&store));
    }
    dispatcher.add_middleware(Arc::new(TracingMiddleware));

    let service = AppService::new(Arc::new(router), Arc::new(dispatcher));

    info!(addr = %args.addr, stack_size = config.stack_size, "motorcade listening");
    let server = HttpServer(service).start(&args.addr)?;
    server
        .join()
        .map_err(|e| anyhow::anyhow!("server failed: {e:?}"))?;
    Ok(())
}
