// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decides admission of FargateProfile reviews and provisions the matching EKS profile.
//!
//! A create review moves through received → validated → matched → provisioned-or-failed →
//! responded. Every review that gets past envelope validation produces exactly one
//! AdmissionResponse: failures after that point become denials, never a missing body.

use super::patch::created_by_patch;
use super::review::{self, Review, ReviewRequest, ReviewRequestExt};
use crate::error::{Result, WebhookError};
use crate::provisioning::{Begin, InFlightTracker, ProvisionedProfile, Provisioner};
use crate::types::FargateProfile;
use kube::core::admission::{AdmissionResponse, Operation};
use kube::ResourceExt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct AdmissionEngine<P> {
    provisioner: Arc<P>,
    tracker: InFlightTracker,
}

impl<P: Provisioner> AdmissionEngine<P> {
    pub fn new(provisioner: P) -> Self {
        Self {
            provisioner: Arc::new(provisioner),
            tracker: InFlightTracker::new(),
        }
    }

    pub fn tracker(&self) -> &InFlightTracker {
        &self.tracker
    }

    /// Handle a review sent to `/create`.
    ///
    /// Only a malformed body or envelope is returned as an error; everything else is
    /// reported inside the returned review.
    #[instrument(skip_all)]
    pub async fn review_create(&self, body: &[u8]) -> Result<Review> {
        let request = review::parse(body)?;
        debug!("Create request: {:?}", request);

        let response = match self.admit_create(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Denying request {}: {}", request.uid, e);
                review::deny(&request, &e)
            }
        };

        Ok(response.into_review())
    }

    /// Handle a review sent to `/delete`. The EKS profile is left in place; only the
    /// provisioning record is dropped so a later create of the same name reaches EKS again.
    #[instrument(skip_all)]
    pub async fn review_delete(&self, body: &[u8]) -> Result<Review> {
        let request = review::parse(body)?;

        if request.targets_watched(&Operation::Delete) && !request.dry_run {
            if let Some(name) = request.object_name() {
                info!("FargateProfile {} deleted, external profile is kept", name);
                self.tracker.forget(&name).await;
            }
        }

        Ok(AdmissionResponse::from(&request).into_review())
    }

    async fn admit_create(&self, request: &ReviewRequest) -> Result<AdmissionResponse> {
        let response = AdmissionResponse::from(request);

        if !request.targets_watched(&Operation::Create) {
            debug!(
                "Request {} is {:?} of {}/{}/{}, allowing unchanged",
                request.uid,
                request.operation,
                request.kind.group,
                request.kind.version,
                request.kind.kind
            );
            return Ok(response);
        }

        let patch = created_by_patch(request.username(), request.has_labels());
        let response = response.with_patch(patch)?;

        let profile = request.decode_profile()?;
        let name = profile.name_any();
        profile.validate()?;

        if request.dry_run {
            info!("Dry-run create of FargateProfile {}, not provisioning", name);
            return Ok(response);
        }

        match self.tracker.begin(&name).await {
            Begin::Started => {}
            Begin::InProgress => {
                warn!("FargateProfile {} is already being provisioned", name);
                return Err(WebhookError::AlreadyInProgress(name));
            }
            Begin::AlreadyProvisioned { arn } => {
                info!(
                    "FargateProfile {} already provisioned ({:?}), not creating again",
                    name, arn
                );
                return Ok(response);
            }
        }

        let provisioned = self.provision(profile).await?;
        info!(
            "Provisioned FargateProfile {} for {}: {:?}",
            name,
            request.username(),
            provisioned.arn
        );

        Ok(response)
    }

    /// Run the provider call on its own task so a dropped HTTP connection cannot cancel it
    /// halfway, and record the outcome in the tracker.
    async fn provision(&self, profile: FargateProfile) -> Result<ProvisionedProfile> {
        let provisioner = Arc::clone(&self.provisioner);
        let tracker = self.tracker.clone();
        let name = profile.name_any();
        let claimed = name.clone();

        let task = tokio::spawn(async move {
            let result = provisioner.provision(&profile).await;
            match &result {
                Ok(provisioned) => tracker.complete(&claimed, provisioned.arn.clone()).await,
                Err(_) => tracker.abandon(&claimed).await,
            }
            result
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                self.tracker.abandon(&name).await;
                Err(WebhookError::Provision(format!(
                    "provisioning task for {} failed: {}",
                    name, e
                )))
            }
        }
    }
}
