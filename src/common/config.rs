//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Radio control endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Inbound event listener settings
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Address map settings
    #[serde(default)]
    pub map: MapConfig,
}

/// Where the radio process accepts parameter commands
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Host the radio process runs on
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the radio process accepts commands on
    #[serde(default = "default_client_port")]
    pub client_port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            client_port: default_client_port(),
        }
    }
}

/// Where the event monitor accepts inbound connections from the radio
#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Address to bind the listener on
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the radio process delivers event markers to
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Read buffer size per event chunk, in bytes
    #[serde(default = "default_receive_buffer")]
    pub receive_buffer: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            server_port: default_server_port(),
            receive_buffer: default_receive_buffer(),
        }
    }
}

/// Address map CSV location
#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// CSV file mapping logical names to parameter addresses
    #[serde(default = "default_map_csv")]
    pub csv: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            csv: default_map_csv(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_client_port() -> u16 {
    4005
}
fn default_server_port() -> u16 {
    4004
}
fn default_receive_buffer() -> usize {
    64
}
fn default_map_csv() -> PathBuf {
    PathBuf::from("params.csv")
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| super::Error::file_read(&path, &e))?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}
