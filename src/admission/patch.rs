// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON patches applied to admitted FargateProfiles

use crate::constants::labels;
use json_patch::jsonptr::PointerBuf;
use json_patch::{AddOperation, Patch, PatchOperation};
use serde_json::{Map, Value};

/// Patch recording who created the object in the `fp.io/createdBy` label.
///
/// When the object has no labels map yet, the whole map is added instead, since a JSON
/// patch `add` cannot create intermediate members.
pub fn created_by_patch(username: &str, has_labels: bool) -> Patch {
    let op = if has_labels {
        AddOperation {
            path: PointerBuf::from_tokens(["metadata", "labels", labels::CREATED_BY]),
            value: Value::String(username.to_string()),
        }
    } else {
        AddOperation {
            path: PointerBuf::from_tokens(["metadata", "labels"]),
            value: Value::Object(Map::from_iter([(
                labels::CREATED_BY.to_string(),
                Value::String(username.to_string()),
            )])),
        }
    };

    Patch(vec![PatchOperation::Add(op)])
}
