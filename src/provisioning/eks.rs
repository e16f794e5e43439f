// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! EKS-backed provisioner

use super::{ProvisionedProfile, Provisioner};
use crate::config::Config;
use crate::error::{Result, WebhookError};
use crate::types::{FargateProfile, ProfileSelector};
use anyhow::Context;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_eks::error::DisplayErrorContext;
use aws_sdk_eks::types::FargateProfileSelector;
use aws_sdk_eks::Client;
use kube::ResourceExt;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

pub struct EksProvisioner {
    client: Client,
    cluster_name: String,
}

impl EksProvisioner {
    pub fn new(client: Client, cluster_name: impl Into<String>) -> Self {
        Self {
            client,
            cluster_name: cluster_name.into(),
        }
    }

    /// Build a provisioner from the SDK's default credential and region discovery.
    /// Missing credentials are a startup error, never a per-request one.
    pub async fn from_env(config: &Config) -> anyhow::Result<Self> {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_sdk_config(&sdk_config, config.cluster_name()).await
    }

    /// Credentials are resolved once here, so a chain with no usable source fails startup.
    pub async fn from_sdk_config(
        sdk_config: &SdkConfig,
        cluster_name: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let provider = sdk_config
            .credentials_provider()
            .context("configuration error, no AWS credentials provider available")?;
        provider
            .provide_credentials()
            .await
            .context("configuration error, no usable AWS credentials")?;

        let cluster_name = cluster_name.into();
        info!(
            "EKS provisioner targeting cluster {} in region {:?}",
            cluster_name,
            sdk_config.region()
        );

        Ok(Self::new(Client::new(sdk_config), cluster_name))
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }
}

#[async_trait]
impl Provisioner for EksProvisioner {
    #[instrument(skip(self, profile), fields(cluster = %self.cluster_name, profile = %profile.name_any()))]
    async fn provision(&self, profile: &FargateProfile) -> Result<ProvisionedProfile> {
        let name = profile.name_any();
        let spec = &profile.spec;

        debug!(
            "Creating Fargate profile with {} selectors and {} subnets",
            spec.selectors.len(),
            spec.subnets.len()
        );

        let output = self
            .client
            .create_fargate_profile()
            .cluster_name(&self.cluster_name)
            .fargate_profile_name(&name)
            .pod_execution_role_arn(&spec.pod_execution_role_arn)
            .set_selectors(Some(to_eks_selectors(&spec.selectors)))
            .set_subnets(non_empty(spec.subnets.clone()))
            .set_tags(to_eks_tags(&spec.tags))
            .send()
            .await
            .map_err(|e| WebhookError::Provision(DisplayErrorContext(&e).to_string()))?;

        let created = output.fargate_profile();
        let provisioned = ProvisionedProfile {
            name,
            arn: created.and_then(|p| p.fargate_profile_arn()).map(str::to_string),
            status: created
                .and_then(|p| p.status())
                .map(|s| s.as_str().to_string()),
        };

        info!("Fargate profile created: {:?}", provisioned);
        Ok(provisioned)
    }
}

/// Selectors keep the order they were declared in
fn to_eks_selectors(selectors: &[ProfileSelector]) -> Vec<FargateProfileSelector> {
    selectors
        .iter()
        .map(|s| {
            let labels = (!s.labels.is_empty()).then(|| {
                s.labels
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<HashMap<_, _>>()
            });
            FargateProfileSelector::builder()
                .namespace(&s.namespace)
                .set_labels(labels)
                .build()
        })
        .collect()
}

fn to_eks_tags(tags: &std::collections::BTreeMap<String, String>) -> Option<HashMap<String, String>> {
    (!tags.is_empty()).then(|| tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

// EKS rejects empty lists; leaving the field unset lets it fall back to the cluster default
fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}
