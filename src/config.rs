//! Tunables for the particle field.
//!
//! Every field is optional when loaded from JSON; missing fields take the
//! defaults below.

use crate::color::Color;
use crate::error::{FieldError, Result};
use serde::Deserialize;

/// Upper bound on `particle_count`; connection drawing is quadratic in it
pub const MAX_PARTICLES: usize = 10_000;

/// Base color of particles and connections, `rgb(37, 99, 235)` fully opaque
pub const DEFAULT_COLOR: u32 = 0x2563ebff;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Pairs closer than this (in viewport pixels) get a connecting line
    pub connection_distance: f64,
    /// Each velocity component is drawn from `[-velocity_range, velocity_range]`
    pub velocity_range: f64,
    pub radius_range: [f64; 2],
    pub opacity_range: [f64; 2],
    /// RRGGBBAA
    pub color: u32,
    pub line_width: f64,
    /// Alpha of a connection between two coincident particles
    pub max_line_alpha: f64,
    /// CSS opacity of the whole canvas element
    pub canvas_opacity: f64,
    /// Wrap each frame in console timers
    pub profile: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 50,
            connection_distance: 100.0,
            velocity_range: 0.25,
            radius_range: [1.0, 3.0],
            opacity_range: [0.2, 0.7],
            color: DEFAULT_COLOR,
            line_width: 1.0,
            max_line_alpha: 0.2,
            canvas_opacity: 0.3,
            profile: false,
        }
    }
}

impl FieldConfig {
    /// Parses a JSON object, an empty or blank string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = if json.trim().is_empty() {
            FieldConfig::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count > MAX_PARTICLES {
            return Err(FieldError::invalid(
                "particle_count",
                format!("must be at most {}, got {}", MAX_PARTICLES, self.particle_count),
            ));
        }
        if !(self.connection_distance.is_finite() && self.connection_distance > 0.0) {
            return Err(FieldError::invalid(
                "connection_distance",
                format!("must be positive, got {}", self.connection_distance),
            ));
        }
        check_non_negative("velocity_range", self.velocity_range)?;
        check_non_negative("line_width", self.line_width)?;
        check_unit("max_line_alpha", self.max_line_alpha)?;
        check_unit("canvas_opacity", self.canvas_opacity)?;
        check_range("radius_range", self.radius_range)?;
        check_range("opacity_range", self.opacity_range)?;
        check_unit("opacity_range", self.opacity_range[1])?;
        Ok(())
    }

    pub fn base_color(&self) -> Color {
        Color::from_u32(self.color)
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::invalid(
            field,
            format!("must be a non-negative number, got {}", value),
        ))
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::invalid(
            field,
            format!("must be within [0, 1], got {}", value),
        ))
    }
}

fn check_range(field: &'static str, [min, max]: [f64; 2]) -> Result<()> {
    check_non_negative(field, min)?;
    check_non_negative(field, max)?;
    if min > max {
        return Err(FieldError::invalid(
            field,
            format!("min {} is greater than max {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_is_default() {
        assert_eq!(FieldConfig::from_json("").unwrap(), FieldConfig::default());
        assert_eq!(FieldConfig::from_json("  ").unwrap(), FieldConfig::default());
        assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            FieldConfig::from_json(r#"{"particle_count": 80, "radius_range": [2, 4]}"#).unwrap();
        assert_eq!(config.particle_count, 80);
        assert_eq!(config.radius_range, [2.0, 4.0]);
        assert_eq!(config.connection_distance, 100.0);
        assert_eq!(config.opacity_range, [0.2, 0.7]);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = FieldConfig::from_json("{particle_count").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = FieldConfig::from_json(r#"{"radius_range": [3, 1]}"#).unwrap_err();
        match err {
            FieldError::InvalidConfig { field, .. } => assert_eq!(field, "radius_range"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn rejects_huge_particle_count() {
        let err = FieldConfig::from_json(r#"{"particle_count": 4000000000}"#).unwrap_err();
        match err {
            FieldError::InvalidConfig { field, .. } => assert_eq!(field, "particle_count"),
            other => panic!("unexpected error: {}", other),
        }

        let at_limit = FieldConfig {
            particle_count: MAX_PARTICLES,
            ..FieldConfig::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn rejects_zero_connection_distance() {
        let config = FieldConfig {
            connection_distance: 0.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_opacity_above_one() {
        let config = FieldConfig {
            opacity_range: [0.5, 1.5],
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn degenerate_range_is_allowed() {
        let config = FieldConfig {
            radius_range: [2.0, 2.0],
            velocity_range: 0.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
