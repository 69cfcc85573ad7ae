// src/velocity.rs
//! Hiring-velocity signal and its mapping to a UI severity level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend of a company's hiring pace as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    Up,
    #[default]
    Stable,
    Down,
}

impl Velocity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Velocity::Up => "up",
            Velocity::Stable => "stable",
            Velocity::Down => "down",
        }
    }

    /// Card caption used by the company directory.
    pub fn caption(&self) -> &'static str {
        match self {
            Velocity::Up => "Hiring velocity up",
            Velocity::Stable => "Stable hiring",
            Velocity::Down => "Hiring slowing",
        }
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VelocityLevel {
    High,
    Medium,
    Low,
}

impl VelocityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityLevel::High => "high",
            VelocityLevel::Medium => "medium",
            VelocityLevel::Low => "low",
        }
    }
}

impl fmt::Display for VelocityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a (possibly absent) velocity signal to a severity level.
///
/// No signal means "assume steady", so `None` lands on `Medium` like `Stable`.
pub fn classify(velocity: Option<Velocity>) -> VelocityLevel {
    match velocity {
        Some(Velocity::Up) => VelocityLevel::High,
        Some(Velocity::Stable) | None => VelocityLevel::Medium,
        Some(Velocity::Down) => VelocityLevel::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(Some(Velocity::Up)), VelocityLevel::High);
        assert_eq!(classify(Some(Velocity::Stable)), VelocityLevel::Medium);
        assert_eq!(classify(Some(Velocity::Down)), VelocityLevel::Low);
        assert_eq!(classify(None), VelocityLevel::Medium);
    }

    #[test]
    fn test_null_and_missing_velocity_both_decode_to_none() {
        #[derive(Deserialize)]
        struct Row {
            hiring_velocity: Option<Velocity>,
        }

        let null: Row = serde_json::from_str(r#"{"hiring_velocity": null}"#).unwrap();
        let missing: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(classify(null.hiring_velocity), VelocityLevel::Medium);
        assert_eq!(classify(missing.hiring_velocity), VelocityLevel::Medium);
    }

    #[test]
    fn test_default_velocity_is_stable() {
        assert_eq!(Velocity::default(), Velocity::Stable);
        assert_eq!(Velocity::Down.caption(), "Hiring slowing");
    }
}
