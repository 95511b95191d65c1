use std::path::PathBuf;

use anyhow::Context;
use meander_routing::config::EngineConfig;

const ENV_NETWORK_FILE: &str = "MEANDER_NETWORK_FILE";
const ENV_BIND_ADDRESS: &str = "MEANDER_BIND_ADDRESS";

const DEFAULT_NETWORK_FILE: &str = "./data/network.geojson";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

pub struct ApiConfig {
    pub network_file: PathBuf,
    pub bind_address: String,
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Reads `.env` and `.env.local`, the latter taking precedence, then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::from_filename("./.env.local").ok();
        dotenvy::dotenv().ok();

        let engine = EngineConfig::from_env().context("Invalid engine configuration")?;

        Ok(ApiConfig {
            network_file: std::env::var(ENV_NETWORK_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_NETWORK_FILE)),
            bind_address: std::env::var(ENV_BIND_ADDRESS)
                .unwrap_or_else(|_| String::from(DEFAULT_BIND_ADDRESS)),
            engine,
        })
    }
}
