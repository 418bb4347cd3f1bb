//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, SocketAddr};

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime settings for the HTTP server.
///
/// Values come from `--flags`, `JOBTRACK_*` environment variables, or a
/// configuration file, in that order of precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBTRACK")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub bind_host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string; selects the Diesel record store.
    pub database_url: Option<String>,
    /// Directory holding `applications.json`; selects the file record store.
    pub data_dir: Option<String>,
    /// Upper bound on pooled PostgreSQL connections.
    pub pool_max_size: Option<u32>,
}

/// Record store chosen from [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSelection {
    Postgres { database_url: String, max_size: u32 },
    JsonFile { directory: Utf8PathBuf },
    Memory,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl ServerSettings {
    /// Configured interface, falling back to all interfaces.
    pub fn bind_host(&self) -> &str {
        non_blank(self.bind_host.as_deref()).unwrap_or(DEFAULT_BIND_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.bind_host();
        let ip: IpAddr = host.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind host {host:?}: {err}"),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Pick the record store: database URL, then data directory, then memory.
    pub fn store_selection(&self) -> StoreSelection {
        if let Some(url) = non_blank(self.database_url.as_deref()) {
            return StoreSelection::Postgres {
                database_url: url.to_owned(),
                max_size: self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE),
            };
        }
        match non_blank(self.data_dir.as_deref()) {
            Some(dir) => StoreSelection::JsonFile {
                directory: Utf8PathBuf::from(dir),
            },
            None => StoreSelection::Memory,
        }
    }
}
