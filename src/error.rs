// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("JSON body in invalid format: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("wrong APIVersion or kind: {api_version} - {kind}")]
    InvalidEnvelope { api_version: String, kind: String },

    #[error("AdmissionReview has no request")]
    MissingRequest,

    #[error("Unable to decode FargateProfile: {0}")]
    InvalidObject(String),

    #[error("Invalid FargateProfile spec: {0}")]
    InvalidSpec(String),

    #[error("FargateProfile {0} is already being provisioned")]
    AlreadyInProgress(String),

    #[error("Unable to create FargateProfile: {0}")]
    Provision(String),

    #[error("JSON output marshal error: {0}")]
    Serialization(#[from] kube::core::admission::SerializePatchError),
}

impl WebhookError {
    /// Status code reported for this error, both on the HTTP exchange and inside denials
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidBody(_)
            | WebhookError::InvalidEnvelope { .. }
            | WebhookError::MissingRequest
            | WebhookError::InvalidObject(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSpec(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebhookError::AlreadyInProgress(_) => StatusCode::CONFLICT,
            WebhookError::Provision(_) | WebhookError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebhookError>;
