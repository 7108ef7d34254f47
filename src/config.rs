use crate::class::{ClassRegistry, COCO_LABELS};
use crate::error::Error;
use crate::zone::RestrictedZone;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Runtime settings of a tracking scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub line_entry_y: Option<f32>,
    pub line_exit_y: Option<f32>,
    /// real distance between the two lines
    pub distance_meters: f64,
    pub movement_threshold_px: f32,
    pub dwell_seconds: f64,
    /// the crossing row sits this far above the top edge of a box
    pub rear_offset_px: f32,
    /// identities unseen for longer are forgotten
    pub max_missing_frames: u64,
    pub zone: Option<Vec<[f32; 2]>>,
    pub classes: Vec<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            line_entry_y: Some(200.0),
            line_exit_y: Some(400.0),
            distance_meters: 10.0,
            movement_threshold_px: 2.0,
            dwell_seconds: 3.0,
            rear_offset_px: 5.0,
            max_missing_frames: 150,
            zone: None,
            classes: COCO_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TrackingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        let config: TrackingConfig = serde_yaml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Checks the settings a scene cannot run without. Lines and zone are
    /// not checked here, a bad value only disables that feature.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.distance_meters.is_finite() && self.distance_meters > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "distance_meters must be positive, got {}",
                self.distance_meters
            )));
        }

        if !(self.movement_threshold_px.is_finite() && self.movement_threshold_px > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "movement_threshold_px must be positive, got {}",
                self.movement_threshold_px
            )));
        }

        if !(self.dwell_seconds.is_finite() && self.dwell_seconds >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dwell_seconds must be non-negative, got {}",
                self.dwell_seconds
            )));
        }

        if !self.rear_offset_px.is_finite() {
            return Err(Error::InvalidConfig("rear_offset_px must be finite".into()));
        }

        ClassRegistry::new(self.classes.clone())?;

        Ok(())
    }

    pub fn lines(&self) -> ReferenceLines {
        ReferenceLines::new(self.line_entry_y, self.line_exit_y)
    }

    /// The configured zone, or `None` when absent or malformed.
    pub fn restricted_zone(&self) -> Option<RestrictedZone> {
        let pairs = self.zone.as_ref()?;

        match RestrictedZone::from_pairs(pairs) {
            Ok(zone) => Some(zone),
            Err(err) => {
                warn!("restricted zone disabled: {}", err);
                None
            }
        }
    }
}

/// Rows of the entry and exit lines. Either may be absent, which disables
/// the crossing stage it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferenceLines {
    pub entry_y: Option<f32>,
    pub exit_y: Option<f32>,
}

impl ReferenceLines {
    /// Non-finite rows are dropped.
    pub fn new(entry_y: Option<f32>, exit_y: Option<f32>) -> Self {
        Self {
            entry_y: finite_line("entry", entry_y),
            exit_y: finite_line("exit", exit_y),
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.entry_y.is_some() && self.exit_y.is_some()
    }
}

fn finite_line(name: &str, y: Option<f32>) -> Option<f32> {
    match y {
        Some(y) if !y.is_finite() => {
            warn!("{} line disabled: non-finite row {}", name, y);
            None
        }
        y => y,
    }
}

/// Whole-value replacement of runtime settings, as produced by the input
/// handler once a selection is finished.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    Lines { entry_y: f32, exit_y: f32 },
    Zone(Vec<na::Point2<f32>>),
    ClearLines,
    ClearZone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackingConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.lines().entry_y, Some(200.0));
        assert_eq!(config.lines().exit_y, Some(400.0));
        assert!(config.restricted_zone().is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TrackingConfig::from_yaml(
            "line_entry_y: 120\nline_exit_y: 360\ndistance_meters: 12.5\nzone: [[0, 0], [100, 0], [100, 50], [0, 50]]\n",
        )
        .unwrap();

        assert_eq!(config.line_entry_y, Some(120.0));
        assert_eq!(config.distance_meters, 12.5);
        assert_eq!(config.dwell_seconds, 3.0);
        assert!(config.restricted_zone().is_some());
    }

    #[test]
    fn test_rejects_bad_distance() {
        let err = TrackingConfig::from_yaml("distance_meters: -3\n");
        assert!(matches!(err, Err(Error::InvalidConfig(_))));

        let config = TrackingConfig {
            distance_meters: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_zone_is_disabled() {
        let config = TrackingConfig {
            zone: Some(vec![[0.0, 0.0], [1.0, 1.0]]),
            ..Default::default()
        };

        assert!(config.validate().is_ok());
        assert!(config.restricted_zone().is_none());
    }

    #[test]
    fn test_non_finite_line_is_dropped() {
        let lines = ReferenceLines::new(Some(f32::NAN), Some(300.0));

        assert_eq!(lines.entry_y, None);
        assert_eq!(lines.exit_y, Some(300.0));
        assert!(!lines.is_complete());
    }
}
