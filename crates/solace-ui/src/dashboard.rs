//! Wellness indicators for the Dashboard panel.
//!
//! Computed once at session start and never mutated afterwards.

use solace_core::config::DashboardConfig;
use solace_core::error::{Result, SolaceError};

/// Upper bound of the mood score scale.
pub const MAX_MOOD_SCORE: u8 = 100;

/// Read-only snapshot of the dashboard's wellness indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    mood_score: u8,
    weekly_checkins: u32,
    next_session_label: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        let config = DashboardConfig::default();
        Self {
            mood_score: config.mood_score,
            weekly_checkins: config.weekly_checkins,
            next_session_label: config.next_session_label,
        }
    }
}

impl DashboardMetrics {
    pub fn new(
        mood_score: u8,
        weekly_checkins: u32,
        next_session_label: impl Into<String>,
    ) -> Result<Self> {
        if mood_score > MAX_MOOD_SCORE {
            return Err(SolaceError::InvalidMetric {
                field: "mood_score",
                value: mood_score.to_string(),
            });
        }
        let next_session_label = next_session_label.into().trim().to_string();
        if next_session_label.is_empty() {
            return Err(SolaceError::InvalidMetric {
                field: "next_session_label",
                value: String::new(),
            });
        }
        Ok(Self {
            mood_score,
            weekly_checkins,
            next_session_label,
        })
    }

    /// Build from configuration, falling back to defaults on invalid values.
    pub fn from_config(config: &DashboardConfig) -> Self {
        match Self::new(
            config.mood_score,
            config.weekly_checkins,
            config.next_session_label.as_str(),
        ) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid dashboard config, using defaults");
                Self::default()
            }
        }
    }

    pub fn mood_score(&self) -> u8 {
        self.mood_score
    }

    pub fn weekly_checkins(&self) -> u32 {
        self.weekly_checkins
    }

    pub fn next_session_label(&self) -> &str {
        &self.next_session_label
    }

    /// Coarse description of the mood score.
    pub fn mood_label(&self) -> &'static str {
        match self.mood_score {
            0..=33 => "Struggling",
            34..=66 => "Steady",
            _ => "Good",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        let metrics = DashboardMetrics::default();
        assert_eq!(metrics.mood_score(), 72);
        assert_eq!(metrics.weekly_checkins(), 4);
        assert_eq!(metrics.next_session_label(), "Thursday, 3:00 PM");
    }

    #[test]
    fn test_new_accepts_bounds() {
        assert!(DashboardMetrics::new(0, 0, "Today").is_ok());
        assert!(DashboardMetrics::new(100, 7, "Today").is_ok());
    }

    #[test]
    fn test_new_rejects_mood_over_100() {
        let err = DashboardMetrics::new(101, 0, "Today").unwrap_err();
        assert!(matches!(
            err,
            SolaceError::InvalidMetric {
                field: "mood_score",
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_blank_label() {
        let err = DashboardMetrics::new(50, 0, "  ").unwrap_err();
        assert!(err.to_string().contains("next_session_label"));
    }

    #[test]
    fn test_from_config_invalid_falls_back() {
        let config = DashboardConfig {
            mood_score: 200,
            ..DashboardConfig::default()
        };
        assert_eq!(
            DashboardMetrics::from_config(&config),
            DashboardMetrics::default()
        );
    }

    #[test]
    fn test_from_config_valid() {
        let config = DashboardConfig {
            mood_score: 20,
            weekly_checkins: 2,
            next_session_label: "Friday".to_string(),
        };
        let metrics = DashboardMetrics::from_config(&config);
        assert_eq!(metrics.mood_score(), 20);
        assert_eq!(metrics.mood_label(), "Struggling");
        assert_eq!(metrics.next_session_label(), "Friday");
    }

    #[test]
    fn test_mood_label_bands() {
        let label = |score| DashboardMetrics::new(score, 0, "x").unwrap().mood_label();
        assert_eq!(label(33), "Struggling");
        assert_eq!(label(34), "Steady");
        assert_eq!(label(66), "Steady");
        assert_eq!(label(67), "Good");
    }
}
