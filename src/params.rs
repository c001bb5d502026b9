//! Interactive keying parameters.
//!
//! A display layer that exposes sliders keeps one [`KeyingParams`] value and,
//! whenever a slider moves, derives a new one with [`KeyingParams::with_parameter`]
//! and calls [`KeyingParams::render`] again. Nothing is shared or mutated between
//! calls.

use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};

use crate::config::{GreenScreenConfig, DEFAULT_BUCKETS, DEFAULT_THRESHOLD};
use crate::error::Result;
use crate::filters::composite::{overlay_background_detailed, OverlayResult};
use crate::filters::core::ColorKey;
use crate::filters::histogram::most_common_color;

/// Which slider changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    Threshold,
    Buckets,
}

/// Snapshot of every parameter needed to recompute an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyingParams {
    /// The parameter that produced this snapshot
    pub kind: ParameterKind,
    /// Fixed key colour; `None` derives it from the foreground histogram
    pub key_color: Option<ColorKey>,
    pub threshold: i32,
    pub buckets: usize,
}

impl Default for KeyingParams {
    fn default() -> Self {
        Self {
            kind: ParameterKind::Threshold,
            key_color: None,
            threshold: DEFAULT_THRESHOLD,
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl From<&GreenScreenConfig> for KeyingParams {
    fn from(config: &GreenScreenConfig) -> Self {
        Self {
            threshold: config.threshold,
            buckets: config.buckets,
            ..Self::default()
        }
    }
}

impl KeyingParams {
    /// Copy with one parameter replaced by a slider value.
    ///
    /// Changing the bucket count drops a previously resolved key colour so it is
    /// recomputed from the new histogram.
    pub fn with_parameter(self, kind: ParameterKind, value: i32) -> Self {
        match kind {
            ParameterKind::Threshold => Self {
                kind,
                threshold: value,
                ..self
            },
            ParameterKind::Buckets => Self {
                kind,
                // Negative slider positions map to 0, which compute rejects
                buckets: value.max(0) as usize,
                key_color: None,
                ..self
            },
        }
    }

    /// Copy with a fixed key colour.
    pub fn with_key_color(self, key: ColorKey) -> Self {
        Self {
            key_color: Some(key),
            ..self
        }
    }

    /// Key colour to use for `foreground`: the fixed one, or the histogram's.
    pub fn resolve_key(&self, foreground: ArrayView3<u8>) -> Result<ColorKey> {
        match self.key_color {
            Some(key) => Ok(key),
            None => most_common_color(foreground, self.buckets),
        }
    }

    /// Recompute the overlay for these parameters.
    pub fn render(
        &self,
        foreground: ArrayView3<u8>,
        background: ArrayView3<u8>,
    ) -> Result<OverlayResult> {
        let key = self.resolve_key(foreground)?;
        log::debug!("render after {:?} change: key={:?}", self.kind, key);
        overlay_background_detailed(foreground, background, key, self.threshold)
    }
}
