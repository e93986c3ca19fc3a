//! Surface configuration.
//!
//! `ContextOptions` is a pass-through map: every key is a rendering-context
//! property name and is set verbatim (`lineWidth`, `strokeStyle`, `lineCap`,
//! ...). Nothing validates the names; the context decides what it accepts.

use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendering-context property overrides, applied in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextOptions(Map<String, Value>);

impl ContextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object such as `{"lineWidth": 4, "strokeStyle": "#222"}`.
    pub fn from_json(json: &str) -> Result<Self, SurfaceError> {
        serde_json::from_str(json).map_err(|e| SurfaceError::InvalidOptions(e.to_string()))
    }

    /// Builder-style insert; a repeated name replaces the earlier value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Timer fallback period when no animation-frame primitive exists (~60Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

pub const MIN_FRAME_INTERVAL_MS: f64 = 1.0;

/// Construction-time configuration for a stroke surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    pub context_options: ContextOptions,
    pub frame_interval_ms: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            context_options: ContextOptions::default(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl SurfaceConfig {
    pub fn from_json(json: &str) -> Result<Self, SurfaceError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SurfaceError::InvalidOptions(e.to_string()))?;
        config.validated()
    }

    /// Reject a timer period that is not a finite number of at least 1ms.
    pub fn validated(self) -> Result<Self, SurfaceError> {
        let interval = self.frame_interval_ms;
        if !interval.is_finite() || interval < MIN_FRAME_INTERVAL_MS {
            return Err(SurfaceError::InvalidOptions(format!(
                "frameIntervalMs must be a finite number >= {MIN_FRAME_INTERVAL_MS}, got {interval}"
            )));
        }
        Ok(self)
    }

    pub fn with_context_options(mut self, options: ContextOptions) -> Self {
        self.context_options = options;
        self
    }
}
