//! Application state wiring the search engine together.
//!
//! `AppState` holds the (eventually initialized) engine. Initialization
//! runs on a background task -- the embedding model download plus the
//! snapshot restore can take a while -- so the HTTP surface comes up
//! immediately and reports `loading` until the engine lands in the slot.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use vodsearch_core::search::service::SearchService;
use vodsearch_infra::snapshot::filesystem::FsSnapshotStore;
use vodsearch_infra::vector::embedder::FastEmbedder;
use vodsearch_infra::vector::flat::FlatIndex;
use vodsearch_types::record::Property;

/// Concrete engine type pinned to the infra implementations.
pub type Engine = SearchService<FastEmbedder, FlatIndex, FsSnapshotStore>;

/// Shared application state handed to every handler.
#[derive(Clone, Default)]
pub struct AppState {
    engine: Arc<OnceLock<Arc<Engine>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine, once initialization has finished.
    pub fn engine(&self) -> Option<Arc<Engine>> {
        self.engine.get().cloned()
    }

    /// Initialize the engine on a background task.
    ///
    /// A model load failure or a corrupt snapshot aborts the process;
    /// the service has no degraded mode.
    pub fn spawn_engine_init(&self, data_dir: PathBuf) {
        let slot = Arc::clone(&self.engine);
        tokio::spawn(async move {
            match init_engine(data_dir).await {
                Ok(engine) => {
                    let _ = slot.set(Arc::new(engine));
                }
                Err(e) => {
                    tracing::error!(error = %e, "engine initialization failed");
                    std::process::exit(1);
                }
            }
        });
    }
}

async fn init_engine(data_dir: PathBuf) -> anyhow::Result<Engine> {
    tracing::info!("loading embedding model");
    let embedder = tokio::task::spawn_blocking(FastEmbedder::load).await??;

    let snapshots = FsSnapshotStore::new(&data_dir);
    let engine = Engine::open(embedder, snapshots).await?;

    for property in Property::ALL {
        let (vectors, entries) = engine.counts(property).await?;
        if vectors > 0 || entries > 0 {
            tracing::info!(property = %property, vectors, entries, "restored property index");
        }
    }
    tracing::info!(model = engine.model_name(), "search engine ready");

    Ok(engine)
}
