// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/hearthguard

//! Stand-in analyzers for demos and tests

use std::collections::VecDeque;

use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::trace;

use super::{Frame, ImageAnalyzer};
use crate::error::AnalyzerError;

/// Reports a cat at random with a fixed probability.
///
/// The confidence threshold is accepted but ignored, there is no real
/// classifier behind this.
pub struct RandomImageAnalyzer {
    rng: StdRng,
    cat_probability: f64,
}

impl RandomImageAnalyzer {
    /// Seeded from OS entropy; `cat_probability` is clamped to `0.0..=1.0`
    pub fn new(cat_probability: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            cat_probability: clamp_probability(cat_probability),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn with_seed(cat_probability: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            cat_probability: clamp_probability(cat_probability),
        }
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl ImageAnalyzer for RandomImageAnalyzer {
    fn image_contains_cat(
        &mut self,
        frame: &Frame,
        confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError> {
        frame.ensure_not_empty()?;
        let cat = self.rng.gen_bool(self.cat_probability);
        trace!(cat, confidence_threshold, "Random analysis");
        Ok(cat)
    }
}

/// Replays a fixed list of outcomes, one per frame
#[derive(Debug, Default, Clone)]
pub struct ScriptedImageAnalyzer {
    outcomes: VecDeque<bool>,
}

impl ScriptedImageAnalyzer {
    /// Outcomes are returned in order, first one first
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Queue one more outcome
    pub fn push(&mut self, cat: bool) {
        self.outcomes.push_back(cat);
    }

    /// Outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl ImageAnalyzer for ScriptedImageAnalyzer {
    fn image_contains_cat(
        &mut self,
        frame: &Frame,
        _confidence_threshold: f32,
    ) -> Result<bool, AnalyzerError> {
        frame.ensure_not_empty()?;
        self.outcomes.pop_front().ok_or(AnalyzerError::Exhausted)
    }
}
