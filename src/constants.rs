// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The resource the webhook watches
pub mod watched {
    pub const GROUP: &str = "fop.io";
    pub const VERSION: &str = "v1";
    pub const KIND: &str = "FargateProfile";
}

/// Kubernetes label keys set by the webhook
pub mod labels {
    /// Username of whoever created the FargateProfile
    pub const CREATED_BY: &str = "fp.io/createdBy";
}

/// Appended to the environment name to form the EKS cluster name
pub const CLUSTER_NAME_SUFFIX: &str = "-EKS-Cluster";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8443";

/// EKS accepts at most this many selectors per Fargate profile
pub const MAX_SELECTORS: usize = 5;
