// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types served by the webhook.

pub mod fargate_profile;

pub use fargate_profile::{FargateProfile, FargateProfileList, FargateProfileSpec, ProfileSelector};
