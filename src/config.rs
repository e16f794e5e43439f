// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

use crate::constants::{CLUSTER_NAME_SUFFIX, DEFAULT_LISTEN_ADDR};

/// Webhook configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment the EKS cluster belongs to, used to derive the cluster name
    pub environment_name: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // environmentName is the name the existing deployment manifests use
        let environment_name = env::var("ENVIRONMENT_NAME")
            .or_else(|_| env::var("environmentName"))
            .context("ENVIRONMENT_NAME environment variable not set")?;

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        Ok(Config {
            environment_name,
            listen_addr,
        })
    }

    /// Name of the EKS cluster Fargate profiles are created in
    pub fn cluster_name(&self) -> String {
        format!("{}{}", self.environment_name, CLUSTER_NAME_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_name_appends_suffix() {
        let config = Config {
            environment_name: "staging".to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.parse().unwrap(),
        };

        assert_eq!(config.cluster_name(), "staging-EKS-Cluster");
    }

    #[test]
    fn test_default_listen_addr_parses() {
        let addr: SocketAddr = DEFAULT_LISTEN_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 8443);
    }
}
