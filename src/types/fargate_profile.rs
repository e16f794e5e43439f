// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::MAX_SELECTORS;
use crate::error::{Result, WebhookError};
use kube::core::ObjectList;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired EKS Fargate profile, one per object
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "fop.io", version = "v1", kind = "FargateProfile")]
#[kube(shortname = "fp")]
#[serde(rename_all = "camelCase")]
pub struct FargateProfileSpec {
    /// Subnet IDs for pods, in the order given
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub pod_execution_role_arn: String,
    #[serde(default)]
    pub selectors: Vec<ProfileSelector>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSelector {
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

pub type FargateProfileList = ObjectList<FargateProfile>;

impl FargateProfile {
    /// Independent copy, for code that handles profiles as opaque values
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Check the profile is populated enough for EKS to accept it
    pub fn validate(&self) -> Result<()> {
        let name = self.name_any();
        if name.is_empty() {
            return Err(WebhookError::InvalidSpec("metadata.name is empty".to_string()));
        }

        if self.spec.pod_execution_role_arn.is_empty() {
            return Err(WebhookError::InvalidSpec(format!(
                "{}: podExecutionRoleArn is required",
                name
            )));
        }

        if self.spec.selectors.is_empty() || self.spec.selectors.len() > MAX_SELECTORS {
            return Err(WebhookError::InvalidSpec(format!(
                "{}: between 1 and {} selectors are required, got {}",
                name,
                MAX_SELECTORS,
                self.spec.selectors.len()
            )));
        }

        if let Some(pos) = self.spec.selectors.iter().position(|s| s.namespace.is_empty()) {
            return Err(WebhookError::InvalidSpec(format!(
                "{}: selectors[{}].namespace is required",
                name, pos
            )));
        }

        Ok(())
    }
}
