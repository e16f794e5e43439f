// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the FargateProfile CustomResourceDefinition as YAML

use fargate_webhook::types::FargateProfile;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&FargateProfile::crd())?);
    Ok(())
}
