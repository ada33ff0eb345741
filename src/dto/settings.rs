//! Gameplay settings payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gameplay tunables persisted per user.
///
/// All values must be strictly positive; everything else about their meaning
/// (pixels, seconds) belongs to the gameplay layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    /// Diameter of a spawned target.
    #[validate(range(exclusive_min = 0.0))]
    pub circle_size: f64,
    /// Seconds between target spawns.
    #[validate(range(exclusive_min = 0.0))]
    pub spawn_interval: f64,
    /// Seconds a target takes to shrink away.
    #[validate(range(exclusive_min = 0.0))]
    pub shrink_time: f64,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            circle_size: 100.0,
            spawn_interval: 1.0,
            shrink_time: 1.0,
        }
    }
}

/// Partial settings update injected into the cache during session
/// initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    /// New circle size, when provided.
    pub circle_size: Option<f64>,
    /// New spawn interval, when provided.
    pub spawn_interval: Option<f64>,
    /// New shrink time, when provided.
    pub shrink_time: Option<f64>,
}

impl SettingsPatch {
    /// Apply the provided fields on top of an existing snapshot.
    pub fn apply_to(&self, snapshot: &mut SettingsSnapshot) {
        if let Some(circle_size) = self.circle_size {
            snapshot.circle_size = circle_size;
        }
        if let Some(spawn_interval) = self.spawn_interval {
            snapshot.spawn_interval = spawn_interval;
        }
        if let Some(shrink_time) = self.shrink_time {
            snapshot.shrink_time = shrink_time;
        }
    }
}

impl From<SettingsSnapshot> for SettingsPatch {
    fn from(snapshot: SettingsSnapshot) -> Self {
        Self {
            circle_size: Some(snapshot.circle_size),
            spawn_interval: Some(snapshot.spawn_interval),
            shrink_time: Some(snapshot.shrink_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SettingsSnapshot::default().validate().is_ok());
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let snapshot = SettingsSnapshot {
            circle_size: 0.0,
            ..SettingsSnapshot::default()
        };
        assert!(snapshot.validate().is_err());

        let snapshot = SettingsSnapshot {
            shrink_time: -1.0,
            ..SettingsSnapshot::default()
        };
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut snapshot = SettingsSnapshot::default();
        let patch = SettingsPatch {
            spawn_interval: Some(2.5),
            ..SettingsPatch::default()
        };

        patch.apply_to(&mut snapshot);

        assert_eq!(snapshot.circle_size, 100.0);
        assert_eq!(snapshot.spawn_interval, 2.5);
        assert_eq!(snapshot.shrink_time, 1.0);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(SettingsSnapshot::default()).unwrap();
        assert!(json.get("circleSize").is_some());
        assert!(json.get("spawnInterval").is_some());
        assert!(json.get("shrinkTime").is_some());
    }
}
