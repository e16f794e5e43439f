// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use fargate_webhook::admission::AdmissionEngine;
use fargate_webhook::config::Config;
use fargate_webhook::provisioning::EksProvisioner;
use fargate_webhook::webhook;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting FargateProfile webhook");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: environment_name={}, cluster={}",
        config.environment_name,
        config.cluster_name()
    );

    // Credentials are resolved once here; a failure aborts startup
    let provisioner = EksProvisioner::from_env(&config).await?;
    let engine = Arc::new(AdmissionEngine::new(provisioner));

    webhook::serve(&config, engine).await
}
