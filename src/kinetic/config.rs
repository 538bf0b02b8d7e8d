// SPDX-License-Identifier: MIT

//! Server configuration from the environment

use crate::adk::error::KineticError;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUITES_DIR: &str = "suites";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory scanned for suite files
    pub suites_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            suites_dir: PathBuf::from(DEFAULT_SUITES_DIR),
        }
    }
}

impl ServerConfig {
    /// Read `KINETIC_HOST`, `KINETIC_PORT` and `KINETIC_SUITES_DIR`
    pub fn from_env() -> Result<Self, KineticError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, KineticError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("KINETIC_HOST") {
            config.host = host
                .parse()
                .map_err(|_| KineticError::config(format!("Invalid KINETIC_HOST: {}", host)))?;
        }
        if let Some(port) = lookup("KINETIC_PORT") {
            config.port = port
                .parse()
                .map_err(|_| KineticError::config(format!("Invalid KINETIC_PORT: {}", port)))?;
        }
        if let Some(dir) = lookup("KINETIC_SUITES_DIR") {
            config.suites_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
