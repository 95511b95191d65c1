use std::path::PathBuf;

use meander_routing::{config::EngineConfig, snapshot::MeanderSnapshot};

pub struct AppState {
    pub meander: MeanderSnapshot,
    /// Network re-read on reload
    pub network_file: PathBuf,
    pub engine_config: EngineConfig,
}
