use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_root")]
    pub root: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_storage_root() -> String {
    "/data".to_string()
}

fn default_max_upload_bytes() -> usize {
    1024 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".into());

        if Path::new(&config_path).exists() {
            let contents =
                std::fs::read_to_string(&config_path).expect("Failed to read config file");
            toml::from_str(&contents).expect("Failed to parse config file")
        } else {
            // Fall back to environment variables
            AppConfig {
                server: ServerConfig {
                    host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
                    port: std::env::var("PORT")
                        .unwrap_or_else(|_| "3000".into())
                        .parse()
                        .expect("PORT must be a number"),
                },
                storage: StorageConfig {
                    root: std::env::var("STORAGE_ROOT")
                        .unwrap_or_else(|_| default_storage_root()),
                    max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                        .unwrap_or_else(|_| default_max_upload_bytes().to_string())
                        .parse()
                        .expect("MAX_UPLOAD_BYTES must be a number"),
                },
            }
        }
    }
}
