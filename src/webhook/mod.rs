// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP gateway for the admission webhook.

pub mod handlers;

use crate::admission::AdmissionEngine;
use crate::config::Config;
use crate::provisioning::Provisioner;
use anyhow::Context;
use axum::{routing::post, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Routes:
/// - POST /create - admit FargateProfile creation and provision the EKS profile
/// - POST /delete - acknowledge FargateProfile deletion
pub fn webhook_router<P: Provisioner>(engine: Arc<AdmissionEngine<P>>) -> Router {
    Router::new()
        .route("/create", post(handlers::create_handler::<P>))
        .route("/delete", post(handlers::delete_handler::<P>))
        .with_state(engine)
}

/// Serve the webhook until ctrl-c. TLS is terminated in front of this listener.
pub async fn serve<P: Provisioner>(
    config: &Config,
    engine: Arc<AdmissionEngine<P>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!("Starting webhook server on {}", config.listen_addr);

    axum::serve(listener, webhook_router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server failed")?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
