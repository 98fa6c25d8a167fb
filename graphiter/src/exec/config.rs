// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Iterator configuration
//!
//! Knobs an executor passes down when it builds unions or samples results.

use super::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for result iteration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterConfig {
    /// Upper bound for the estimated bytes a union may accumulate.
    /// `None` disables the check.
    pub memory_limit_bytes: Option<usize>,

    /// Seed for sampling; `None` picks a random seed
    pub sample_seed: Option<u64>,
}

impl IterConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit_bytes = Some(bytes);
        self
    }

    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Random source for sampling
    pub fn rng(&self) -> fastrand::Rng {
        match self.sample_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
