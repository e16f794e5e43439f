// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::admission::{AdmissionEngine, Review};
use crate::error::Result;
use crate::provisioning::Provisioner;
use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;
use tracing::debug;

// The body is taken as raw bytes so every decode failure maps to 400 rather than
// axum's own JSON rejections.
pub async fn create_handler<P: Provisioner>(
    State(engine): State<Arc<AdmissionEngine<P>>>,
    body: Bytes,
) -> Result<Json<Review>> {
    let review = engine.review_create(&body).await?;
    debug!("Got create request, response: {:?}", review.response);
    Ok(Json(review))
}

pub async fn delete_handler<P: Provisioner>(
    State(engine): State<Arc<AdmissionEngine<P>>>,
    body: Bytes,
) -> Result<Json<Review>> {
    let review = engine.review_delete(&body).await?;
    debug!("Got delete request, response: {:?}", review.response);
    Ok(Json(review))
}
