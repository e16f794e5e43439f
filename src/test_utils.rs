// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a recording provisioner and AdmissionReview fixtures.

use crate::error::{Result, WebhookError};
use crate::provisioning::{ProvisionedProfile, Provisioner};
use crate::types::FargateProfile;
use async_trait::async_trait;
use kube::ResourceExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A provisioner that records every call instead of talking to EKS.
/// Clones share the recorded calls.
#[derive(Clone, Default)]
pub struct MockProvisioner {
    calls: Arc<Mutex<Vec<FargateProfile>>>,
    failure: Option<String>,
    gate: Option<Arc<Notify>>,
    reported_name: Option<String>,
}

impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with the given provider message
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Block every call until the gate is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Report a different profile name than the one admitted, as EKS could after normalising
    pub fn reporting_name(mut self, name: &str) -> Self {
        self.reported_name = Some(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<FargateProfile> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn provision(&self, profile: &FargateProfile) -> Result<ProvisionedProfile> {
        self.calls.lock().unwrap().push(profile.duplicate());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(message) = &self.failure {
            return Err(WebhookError::Provision(message.clone()));
        }

        let name = self
            .reported_name
            .clone()
            .unwrap_or_else(|| profile.name_any());
        Ok(ProvisionedProfile {
            arn: Some(format!(
                "arn:aws:eks:eu-west-1:123456789012:fargateprofile/test-EKS-Cluster/{}",
                name
            )),
            name,
            status: Some("CREATING".to_string()),
        })
    }
}

/// A complete FargateProfile object as the API server embeds it in a review
pub fn fargate_profile_json(name: &str) -> Value {
    json!({
        "apiVersion": "fop.io/v1",
        "kind": "FargateProfile",
        "metadata": {
            "name": name,
            "labels": {}
        },
        "spec": {
            "subnets": ["subnet-2", "subnet-1"],
            "podExecutionRoleArn": "arn:aws:iam::123456789012:role/fargate-pods",
            "selectors": [
                { "namespace": "kube-system" },
                { "namespace": "apps", "labels": { "tier": "web" } }
            ],
            "tags": { "team": "platform" }
        }
    })
}

/// An AdmissionReview request body
pub fn review_json(
    uid: &str,
    (group, version, kind): (&str, &str, &str),
    operation: &str,
    username: &str,
    object: Value,
) -> Value {
    json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": { "group": group, "version": version, "kind": kind },
            "resource": { "group": group, "version": version, "resource": "fargateprofiles" },
            "operation": operation,
            "userInfo": { "username": username },
            "object": object
        }
    })
}
