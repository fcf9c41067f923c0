use std::sync::Arc;

mod api;
mod config;
mod logger;
mod server;
mod store;

use store::{JsonFileStorage, TodoStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    // The store is constructed here and injected through AppState; a load
    // failure falls back to an empty collection inside open()
    let storage = JsonFileStorage::new(&cfg.storage.data_file);
    let store = TodoStore::open(Box::new(storage));

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, store));

    // LocalSet so connection tasks can be spawned locally
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state)).await;
    Ok(())
}
