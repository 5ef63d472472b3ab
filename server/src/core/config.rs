use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, SQLITE_MAX_CONNECTIONS,
};

/// Server section of the config file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Database section of the config file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    pub max_connections: Option<u32>,
}

/// One parsed config file; unknown keys land in `extra` for the typo
/// warning.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Replaces `dst` when the overlay carries a value.
fn overlay<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Reading config file");
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Cannot parse config file {}", path.display()))
    }

    fn warn_unknown_fields(&self, path: &Path) {
        let serde_json::Value::Object(map) = &self.extra else {
            return;
        };
        if map.is_empty() {
            return;
        }
        let unknown = map.keys().cloned().collect::<Vec<_>>().join(", ");
        tracing::warn!(
            path = %path.display(),
            fields = %unknown,
            "Ignoring unknown config fields (possible typos)"
        );
    }

    /// Overlay another file config; `layer` wins where both set a value
    fn merge(&mut self, layer: FileConfig) {
        if let Some(server) = layer.server {
            let dst = self.server.get_or_insert_with(ServerFileConfig::default);
            overlay(&mut dst.host, server.host);
            overlay(&mut dst.port, server.port);
        }
        if let Some(database) = layer.database {
            let dst = self.database.get_or_insert_with(DatabaseFileConfig::default);
            overlay(&mut dst.max_connections, database.max_connections);
        }
        overlay(&mut self.debug, layer.debug);
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
}

/// Fully merged and validated application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

/// Config files in merge order, lowest priority first: the profile
/// config under the home dot folder, then either the CLI-specified
/// file or a config file in the working directory.
fn config_layers(cli: &CliConfig) -> Result<Vec<PathBuf>> {
    let mut layers = Vec::new();

    if let Some(home) = dirs::home_dir() {
        let profile = home.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME);
        if profile.exists() {
            layers.push(profile);
        }
    }

    match cli.config {
        Some(ref path) => {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            layers.push(expanded);
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                layers.push(local);
            }
        }
    }

    Ok(layers)
}

impl AppConfig {
    /// Merge configuration sources. CLI flags (with their env fallbacks)
    /// beat config files, and config files beat built-in defaults.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::trace!(cli = ?cli, "Resolving configuration");

        let layers = config_layers(cli)?;
        let mut files = FileConfig::default();
        for path in &layers {
            let layer = FileConfig::read(path)?;
            layer.warn_unknown_fields(path);
            files.merge(layer);
        }
        tracing::debug!(files = ?layers, "Config files merged");

        let server = files.server.unwrap_or_default();
        let database = files.database.unwrap_or_default();

        let config = Self {
            server: ServerConfig {
                host: cli
                    .host
                    .clone()
                    .or(server.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(server.port).unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                max_connections: cli
                    .db_max_connections
                    .or(database.max_connections)
                    .unwrap_or(SQLITE_MAX_CONNECTIONS),
            },
            debug: cli.debug || files.debug.unwrap_or(false),
        };
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            db_max_connections = config.database.max_connections,
            debug = config.debug,
            "Configuration resolved"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }
        // Port 0 would cause bind failure
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("Configuration error: database.max_connections must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FileConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_full_file() {
        let config = parse(
            r#"{
                "server": { "host": "10.1.2.3", "port": 4000 },
                "database": { "max_connections": 12 },
                "debug": true
            }"#,
        );
        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("10.1.2.3"));
        assert_eq!(server.port, Some(4000));
        assert_eq!(config.database.unwrap().max_connections, Some(12));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn parses_partial_and_empty_files() {
        let partial = parse(r#"{ "server": { "port": 9000 } }"#);
        let server = partial.server.unwrap();
        assert!(server.host.is_none());
        assert_eq!(server.port, Some(9000));
        assert!(partial.database.is_none());

        let empty = parse("{}");
        assert!(empty.server.is_none());
        assert!(empty.database.is_none());
        assert!(empty.debug.is_none());
    }

    #[test]
    fn unknown_keys_are_captured() {
        let config = parse(r#"{ "debug": false, "prot": 1234 }"#);
        assert_eq!(config.extra.get("prot").unwrap(), 1234);
    }

    #[test]
    fn merge_prefers_overlay_values() {
        let mut base = parse(
            r#"{
                "server": { "host": "base.host", "port": 1000 },
                "database": { "max_connections": 5 },
                "debug": false
            }"#,
        );
        base.merge(parse(r#"{ "server": { "port": 2000 }, "debug": true }"#));

        let server = base.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));
        assert_eq!(base.database.unwrap().max_connections, Some(5));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn cli_values_win() {
        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            debug: true,
            config: None,
            db_max_connections: Some(2),
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 2);
        assert!(config.debug);
    }

    #[test]
    fn cli_config_file_is_applied() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "server": { "host": "0.0.0.0", "port": 7070 }, "debug": true }"#)
            .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7070);
        assert!(config.debug);
    }

    #[test]
    fn missing_cli_config_file_is_an_error() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/no/such/cityhop-config.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero_port = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let err = AppConfig::load(&zero_port).unwrap_err();
        assert!(err.to_string().contains("server.port must be greater than 0"));

        let empty_host = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let err = AppConfig::load(&empty_host).unwrap_err();
        assert!(err.to_string().contains("server.host must not be empty"));

        let zero_pool = CliConfig {
            db_max_connections: Some(0),
            ..Default::default()
        };
        let err = AppConfig::load(&zero_pool).unwrap_err();
        assert!(
            err.to_string()
                .contains("database.max_connections must be greater than 0")
        );
    }
}
