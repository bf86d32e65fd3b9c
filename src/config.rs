use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::CompetitionError;

/// Slowest accepted contestant speed.
pub const MIN_SPEED: u32 = 50;
/// Fastest accepted contestant speed.
pub const MAX_SPEED: u32 = 100;
/// Converts network distance units into the reported time unit. With
/// distances in kilometres and speeds in metres per minute the broadcast time
/// is in minutes (1 km = 1000 m).
pub const DISTANCE_TO_TIME_FACTOR: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub min_speed: u32,
    pub max_speed: u32,
    pub distance_to_time_factor: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            distance_to_time_factor: DISTANCE_TO_TIME_FACTOR,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    calibration: Calibration,
}

impl Calibration {
    pub fn validate(&self) -> Result<(), CompetitionError> {
        if self.min_speed == 0 || self.min_speed > self.max_speed {
            return Err(CompetitionError::InvalidInput(format!(
                "speed range [{}, {}] is empty or contains zero",
                self.min_speed, self.max_speed
            )));
        }
        if !self.distance_to_time_factor.is_finite() || self.distance_to_time_factor <= 0.0 {
            return Err(CompetitionError::InvalidInput(format!(
                "distance to time factor must be positive, got {}",
                self.distance_to_time_factor
            )));
        }
        Ok(())
    }

    pub fn check_speed(&self, speed: u32) -> Result<(), CompetitionError> {
        if speed < self.min_speed || speed > self.max_speed {
            Err(CompetitionError::SpeedOutOfRange {
                speed,
                min: self.min_speed,
                max: self.max_speed,
            })
        } else {
            Ok(())
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CompetitionError> {
        let config: ConfigFile =
            toml::from_str(s).map_err(|e| CompetitionError::InvalidInput(e.to_string()))?;
        config.calibration.validate()?;
        Ok(config.calibration)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompetitionError> {
        let mut s = String::new();
        File::open(path.as_ref())?.read_to_string(&mut s)?;
        Self::from_toml_str(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_contest_rules() {
        let calibration = Calibration::default();
        assert_eq!(calibration.min_speed, 50);
        assert_eq!(calibration.max_speed, 100);
        assert_eq!(calibration.distance_to_time_factor, 1000.0);
        assert!(calibration.validate().is_ok());
    }

    #[test]
    fn speed_range_is_inclusive() {
        let calibration = Calibration::default();
        assert!(calibration.check_speed(50).is_ok());
        assert!(calibration.check_speed(100).is_ok());
        assert_eq!(
            calibration.check_speed(49),
            Err(CompetitionError::SpeedOutOfRange {
                speed: 49,
                min: 50,
                max: 100
            })
        );
        assert!(calibration.check_speed(101).is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() -> anyhow::Result<()> {
        let calibration = Calibration::from_toml_str(
            r#"
            [calibration]
            max_speed = 120
            "#,
        )?;
        assert_eq!(calibration.min_speed, MIN_SPEED);
        assert_eq!(calibration.max_speed, 120);
        assert_eq!(calibration.distance_to_time_factor, DISTANCE_TO_TIME_FACTOR);
        Ok(())
    }

    #[test]
    fn empty_toml_is_the_default() -> anyhow::Result<()> {
        assert_eq!(Calibration::from_toml_str("")?, Calibration::default());
        Ok(())
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let res = Calibration::from_toml_str(
            r#"
            [calibration]
            min_speed = 90
            max_speed = 60
            "#,
        );
        assert!(matches!(res, Err(CompetitionError::InvalidInput(_))));
    }

    #[test]
    fn load_reads_resource_file() -> anyhow::Result<()> {
        let calibration = Calibration::load("resources/config/metric.toml")?;
        assert_eq!(calibration.min_speed, 40);
        assert_eq!(calibration.max_speed, 120);
        assert_eq!(calibration.distance_to_time_factor, 60.0);
        Ok(())
    }

    #[test]
    fn both_calibrations_report_minutes() -> anyhow::Result<()> {
        use crate::engine::time_bound;

        // 1 km at 50 m/min
        assert_eq!(time_bound(1.0, 50, &Calibration::default())?, 20);
        // 1 km at 60 km/h
        let metric = Calibration::load("resources/config/metric.toml")?;
        assert_eq!(time_bound(1.0, 60, &metric)?, 1);
        Ok(())
    }
}
