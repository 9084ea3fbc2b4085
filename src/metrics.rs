//! Layout geometry and typography for one pagination run.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PaginationError;

/// Container geometry and typography applied to every page of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Page content width in px.
    pub container_width: f32,
    /// Page content height in px.
    pub container_height: f32,
    /// Base font size in px.
    pub font_size: f32,
    /// Line height multiplier.
    pub line_height: f32,
    /// Vertical gap after each placed block, in px.
    pub paragraph_spacing: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            container_width: 600.0,
            container_height: 800.0,
            font_size: 16.0,
            line_height: 1.5,
            paragraph_spacing: 12.0,
        }
    }
}

impl TextMetrics {
    /// Default typography for a container size.
    pub fn for_container(width: f32, height: f32) -> Self {
        Self {
            container_width: width,
            container_height: height,
            ..Self::default()
        }
    }

    /// One line at the configured font size and line height.
    pub fn line_pitch_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Reject metrics that cannot produce a layout.
    pub fn validate(&self) -> Result<(), PaginationError> {
        let positive = [
            ("container_width", self.container_width),
            ("container_height", self.container_height),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PaginationError::InvalidMetrics { field, value });
            }
        }
        if !self.paragraph_spacing.is_finite() || self.paragraph_spacing < 0.0 {
            return Err(PaginationError::InvalidMetrics {
                field: "paragraph_spacing",
                value: self.paragraph_spacing,
            });
        }
        Ok(())
    }

    /// Fingerprint for cache keys; changes whenever any field changes.
    pub fn profile_id(&self) -> MetricsProfileId {
        let payload = format!("{:?}", self); // allow: once per run, hashing input
        MetricsProfileId::from_bytes(payload.as_bytes())
    }
}

/// Stable digest of a [`TextMetrics`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricsProfileId(pub [u8; 32]);

impl MetricsProfileId {
    /// Build a deterministic id from arbitrary payload bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        fn fnv64(seed: u64, payload: &[u8]) -> u64 {
            let mut hash = seed;
            for b in payload {
                hash ^= *b as u64;
                hash = hash.wrapping_mul(0x100000001b3);
            }
            hash
        }
        let mut out = [0u8; 32];
        let seeds = [
            0xcbf29ce484222325,
            0x9e3779b97f4a7c15,
            0xd6e8feb86659fd93,
            0xa0761d6478bd642f,
        ];
        for (chunk, seed) in out.chunks_exact_mut(8).zip(seeds) {
            chunk.copy_from_slice(&fnv64(seed, bytes).to_le_bytes());
        }
        Self(out)
    }
}

impl fmt::Display for MetricsProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
