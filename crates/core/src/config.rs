//! Application configuration.

use crate::reference::ReferenceMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub marketplace: MarketplaceSettings,
    pub tracker: TrackerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL clients reach this server at; used to build image URLs
    /// in token metadata.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceSettings {
    pub base_url: String,
    pub api_key: String,
    /// Collections requested per page.
    pub page_size: usize,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
    /// Attempts per page before the fetch is treated as failed.
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSettings {
    pub interval_secs: u64,
    pub top_n: usize,
    pub cycle_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub images_dir: PathBuf,
    pub reference_mode: ReferenceMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                public_base_url: "http://localhost:8080".to_string(),
            },
            marketplace: MarketplaceSettings {
                base_url: "https://api.reservoir.tools".to_string(),
                api_key: String::new(),
                page_size: 20,
                requests_per_minute: 60,
                timeout_secs: 30,
                max_retries: 3,
            },
            tracker: TrackerSettings {
                interval_secs: 300,
                top_n: 100,
                cycle_timeout_secs: 120,
                data_dir: PathBuf::from("data"),
                images_dir: PathBuf::from("data/images"),
                reference_mode: ReferenceMode::LastCycle,
            },
        }
    }
}
