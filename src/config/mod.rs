//! Endpoint configuration loaded from a TOML file
//!
//! Missing or malformed config degrades to defaults; the library never
//! fails to load because of it.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::abi::ChainId;
use crate::infrastructure::ethereum::ProviderConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub chain_id: Option<ChainId>,
    pub rpc: Option<String>,
    pub ws: Option<String>,
    pub ipc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl EndpointConfig {
    /// Runtime configuration for this endpoint, preferring push-capable
    /// transports (ws, then ipc, then http).
    pub fn provider(&self) -> Option<ProviderConfig> {
        if let Some(ws) = &self.ws {
            return Some(ProviderConfig::WebSocket(ws.clone()));
        }
        #[cfg(unix)]
        if let Some(ipc) = &self.ipc {
            return Some(ProviderConfig::Ipc(PathBuf::from(ipc)));
        }
        self.rpc.as_ref().map(|rpc| ProviderConfig::Http(rpc.clone()))
    }
}

impl Config {
    /// First endpoint declared for the given chain.
    pub fn endpoint_for_chain(&self, chain: ChainId) -> Option<&EndpointConfig> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.chain_id == Some(chain))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("MODULUS_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("modulus").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("modulus").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "modulus", "modulus")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
