// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provisioning of EKS Fargate profiles for admitted FargateProfile objects.

pub mod eks;
pub mod tracker;

pub use eks::EksProvisioner;
pub use tracker::{Begin, InFlightTracker, ProvisionState};

use crate::error::Result;
use crate::types::FargateProfile;
use async_trait::async_trait;

/// What the provider reported back for a created profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedProfile {
    pub name: String,
    pub arn: Option<String>,
    pub status: Option<String>,
}

/// Creates the external resource backing a FargateProfile.
///
/// Each call makes exactly one creation attempt at the provider. Implementations do not
/// retry and are not idempotent; [`InFlightTracker`] provides at-most-once behaviour on top.
#[async_trait]
pub trait Provisioner: Send + Sync + 'static {
    async fn provision(&self, profile: &FargateProfile) -> Result<ProvisionedProfile>;
}
