// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helpers over kube's admission.k8s.io/v1 types: envelope checks, matching and denials.

use crate::constants::watched;
use crate::error::{Result, WebhookError};
use crate::types::FargateProfile;
use kube::core::admission::{
    AdmissionRequest, AdmissionResponse, AdmissionReview, Operation, META_API_VERSION_V1, META_KIND,
};
use kube::core::response::StatusSummary;
use kube::core::DynamicObject;

pub type ReviewRequest = AdmissionRequest<DynamicObject>;
pub type Review = AdmissionReview<DynamicObject>;

/// Decode a request body and check the envelope, returning the embedded request
pub fn parse(body: &[u8]) -> Result<ReviewRequest> {
    let review: Review = serde_json::from_slice(body).map_err(WebhookError::InvalidBody)?;

    if review.types.api_version != META_API_VERSION_V1 || review.types.kind != META_KIND {
        return Err(WebhookError::InvalidEnvelope {
            api_version: review.types.api_version,
            kind: review.types.kind,
        });
    }

    review.try_into().map_err(|_| WebhookError::MissingRequest)
}

/// Denial carrying the error's status code and message
pub fn deny(request: &ReviewRequest, error: &WebhookError) -> AdmissionResponse {
    let mut response = AdmissionResponse::from(request).deny(error);
    response.result.code = error.status_code().as_u16();
    response.result.status = Some(StatusSummary::Failure);
    response
}

pub trait ReviewRequestExt {
    /// True when this request is `operation` on the watched FargateProfile kind
    fn targets_watched(&self, operation: &Operation) -> bool;

    fn username(&self) -> &str;

    /// Whether the admitted object already carries a label map
    fn has_labels(&self) -> bool;

    fn decode_profile(&self) -> Result<FargateProfile>;

    /// Name of the object, falling back to the previous object for deletes
    fn object_name(&self) -> Option<String>;
}

impl ReviewRequestExt for ReviewRequest {
    fn targets_watched(&self, operation: &Operation) -> bool {
        self.kind.group == watched::GROUP
            && self.kind.version == watched::VERSION
            && self.kind.kind == watched::KIND
            && &self.operation == operation
    }

    fn username(&self) -> &str {
        self.user_info.username.as_deref().unwrap_or_default()
    }

    fn has_labels(&self) -> bool {
        self.object
            .as_ref()
            .is_some_and(|o| o.metadata.labels.is_some())
    }

    fn decode_profile(&self) -> Result<FargateProfile> {
        let object = self
            .object
            .clone()
            .ok_or_else(|| WebhookError::InvalidObject("request has no object".to_string()))?;

        object
            .try_parse::<FargateProfile>()
            .map_err(|e| WebhookError::InvalidObject(e.to_string()))
    }

    fn object_name(&self) -> Option<String> {
        Some(self.name.clone()).filter(|n| !n.is_empty()).or_else(|| {
            self.object
                .as_ref()
                .or(self.old_object.as_ref())
                .and_then(|o| o.metadata.name.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fargate_profile_json, review_json};
    use k8s_openapi::api::authentication::v1::UserInfo;
    use kube::ResourceExt;
    use serde_json::json;

    fn make_request(group: &str, kind: &str, operation: &str) -> ReviewRequest {
        let body = review_json(
            "u1",
            (group, "v1", kind),
            operation,
            "alice",
            fargate_profile_json("p1"),
        );
        parse(body.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_valid_review() {
        let request = make_request("fop.io", "FargateProfile", "CREATE");

        assert_eq!(request.uid, "u1");
        assert_eq!(request.operation, Operation::Create);
        assert_eq!(request.username(), "alice");
        assert_eq!(request.types.api_version, "admission.k8s.io/v1");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse(b"{not json").unwrap_err();
        assert!(matches!(err, WebhookError::InvalidBody(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_api_version() {
        let mut body = review_json(
            "u1",
            ("fop.io", "v1", "FargateProfile"),
            "CREATE",
            "alice",
            fargate_profile_json("p1"),
        );
        body["apiVersion"] = json!("admission.k8s.io/v1beta1");

        let err = parse(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidEnvelope { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        let mut body = review_json(
            "u1",
            ("fop.io", "v1", "FargateProfile"),
            "CREATE",
            "alice",
            fargate_profile_json("p1"),
        );
        body["kind"] = json!("ConversionReview");

        let err = parse(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidEnvelope { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_request() {
        let body = json!({ "apiVersion": "admission.k8s.io/v1", "kind": "AdmissionReview" });

        let err = parse(body.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, WebhookError::MissingRequest));
    }

    #[test]
    fn test_targets_watched() {
        assert!(make_request("fop.io", "FargateProfile", "CREATE").targets_watched(&Operation::Create));
        assert!(!make_request("fop.io", "FargateProfile", "UPDATE").targets_watched(&Operation::Create));
        assert!(!make_request("apps", "FargateProfile", "CREATE").targets_watched(&Operation::Create));
        assert!(!make_request("fop.io", "Deployment", "CREATE").targets_watched(&Operation::Create));
        assert!(make_request("fop.io", "FargateProfile", "DELETE").targets_watched(&Operation::Delete));
    }

    #[test]
    fn test_username_missing_is_empty() {
        let mut request = make_request("fop.io", "FargateProfile", "CREATE");
        request.user_info = UserInfo::default();

        assert_eq!(request.username(), "");
    }

    #[test]
    fn test_has_labels() {
        let mut request = make_request("fop.io", "FargateProfile", "CREATE");
        assert!(request.has_labels());

        if let Some(object) = request.object.as_mut() {
            object.metadata.labels = None;
        }
        assert!(!request.has_labels());

        request.object = None;
        assert!(!request.has_labels());
    }

    #[test]
    fn test_decode_profile() {
        let request = make_request("fop.io", "FargateProfile", "CREATE");

        let profile = request.decode_profile().unwrap();
        assert_eq!(profile.name_any(), "p1");
        assert_eq!(profile.spec.subnets, vec!["subnet-2", "subnet-1"]);
    }

    #[test]
    fn test_decode_profile_without_object() {
        let mut request = make_request("fop.io", "FargateProfile", "DELETE");
        request.object = None;

        let err = request.decode_profile().unwrap_err();
        assert!(matches!(err, WebhookError::InvalidObject(_)));
    }

    #[test]
    fn test_object_name_falls_back_to_old_object() {
        let mut request = make_request("fop.io", "FargateProfile", "DELETE");
        request.name = String::new();
        request.old_object = request.object.take();

        assert_eq!(request.object_name().as_deref(), Some("p1"));
    }

    #[test]
    fn test_deny_carries_status() {
        let request = make_request("fop.io", "FargateProfile", "CREATE");

        let response = deny(&request, &WebhookError::Provision("boom".to_string()));

        assert_eq!(response.uid, "u1");
        assert!(!response.allowed);
        assert_eq!(response.result.code, 500);
        assert_eq!(response.result.status, Some(StatusSummary::Failure));
        assert_eq!(response.result.message, "Unable to create FargateProfile: boom");
    }

    #[test]
    fn test_into_review_sets_envelope() {
        let request = make_request("fop.io", "FargateProfile", "CREATE");
        let review = AdmissionResponse::from(&request).into_review();
        let value = serde_json::to_value(&review).unwrap();

        assert_eq!(value["apiVersion"], "admission.k8s.io/v1");
        assert_eq!(value["kind"], "AdmissionReview");
        assert_eq!(value["response"]["uid"], "u1");
        assert_eq!(value["response"]["allowed"], true);
        assert!(value.get("request").is_none());
        assert!(value["response"].get("patch").is_none());
    }
}
