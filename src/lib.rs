// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod admission;
pub mod config;
pub mod constants;
pub mod error;
pub mod provisioning;
pub mod types;
pub mod webhook;

#[cfg(test)]
mod test_utils;
