// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admission review handling: review helpers, mutation patches and the decision engine.

pub mod engine;
pub mod patch;
pub mod review;

pub use engine::AdmissionEngine;
pub use review::{Review, ReviewRequest, ReviewRequestExt};
