//! Error types for the graph crate
//!
//! Building, laying out and inspecting a hierarchy never fail: dangling
//! references are skipped and unknown filter ids yield an empty tree. The
//! only fallible surface is configuration.

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Size or gap must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Separation multipliers below 1.0 let sibling slots overlap
    #[error("{field} must be at least 1.0, got {value}")]
    SeparationTooSmall { field: &'static str, value: f64 },

    /// Initial zoom outside the allowed zoom range
    #[error("initial scale {scale} outside zoom range [{min}, {max}]")]
    ScaleOutOfRange { scale: f64, min: f64, max: f64 },

    /// Root label must not be blank
    #[error("root label must not be empty")]
    EmptyRootLabel,
}

impl ConfigError {
    /// Field the error refers to, if any
    #[inline]
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NonPositive { field, .. } | Self::SeparationTooSmall { field, .. } => Some(*field),
            Self::ScaleOutOfRange { .. } => Some("initial_scale"),
            Self::EmptyRootLabel => Some("root_label"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::NonPositive {
            field: "level_gap",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "level_gap must be positive, got 0");
        assert_eq!(err.field(), Some("level_gap"));
    }
}
