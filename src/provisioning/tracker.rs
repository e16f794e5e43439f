// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-name tracking of provisioning attempts, so concurrent or repeated admissions of the
//! same FargateProfile reach the provider at most once.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionState {
    InProgress,
    Provisioned { arn: Option<String> },
}

/// Result of trying to claim a name for provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// Caller owns the attempt and must call `complete` or `abandon`
    Started,
    InProgress,
    AlreadyProvisioned { arn: Option<String> },
}

/// Provisioning state per FargateProfile name, shared by every request in the process.
///
/// A failed attempt is dropped again by `abandon`, but a `Provisioned` entry is only removed
/// by `forget`, which the `/delete` webhook calls. The delete webhook must therefore be
/// registered for FargateProfile DELETE operations, otherwise a profile that was deleted and
/// recreated under the same name is admitted without reaching EKS again.
#[derive(Clone, Default)]
pub struct InFlightTracker {
    entries: Arc<Mutex<HashMap<String, ProvisionState>>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, name: &str) -> Begin {
        let mut entries = self.entries.lock().await;
        match entries.get(name) {
            Some(ProvisionState::InProgress) => Begin::InProgress,
            Some(ProvisionState::Provisioned { arn }) => {
                Begin::AlreadyProvisioned { arn: arn.clone() }
            }
            None => {
                entries.insert(name.to_string(), ProvisionState::InProgress);
                Begin::Started
            }
        }
    }

    pub async fn complete(&self, name: &str, arn: Option<String>) {
        self.entries
            .lock()
            .await
            .insert(name.to_string(), ProvisionState::Provisioned { arn });
    }

    /// Drop a failed attempt so a later admission can try again
    pub async fn abandon(&self, name: &str) {
        let mut entries = self.entries.lock().await;
        if entries.get(name) == Some(&ProvisionState::InProgress) {
            entries.remove(name);
        }
    }

    pub async fn forget(&self, name: &str) {
        if self.entries.lock().await.remove(name).is_some() {
            debug!("Forgot provisioning state for {}", name);
        }
    }

    pub async fn state(&self, name: &str) -> Option<ProvisionState> {
        self.entries.lock().await.get(name).cloned()
    }
}
