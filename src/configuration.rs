use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use tracing::info;

use crate::joint::forwardpropagator::PropagationSettings;
use crate::possibility::copula::Copula;
use crate::possibility::domain::Domain;
use crate::possibility::triangular::TriangularParams;
use crate::possibilityerror::PossibilityError;

/// Engine settings and initial state, loadable from JSON.
///
/// Missing fields take their default, so `{}` is the default engine:
///
/// ```json
/// {
///     "resolution": 100,
///     "line_points": 101,
///     "key_digits": 3,
///     "tie_tolerance": 0.0001,
///     "tie_floor": 0.01,
///     "min_separation": 0.0,
///     "copula": "independence",
///     "marginal_x": {"left_base": 2.3, "peak": 3.0, "right_base": 3.7, "domain": [2.0, 4.0]},
///     "marginal_y": {"left_base": 3.4, "peak": 4.0, "right_base": 4.6, "domain": [3.0, 5.0]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfiguration {
    /// Grid points per axis. Drives the `O(N²)` recompute cost and how often
    /// distinct sums share a z key.
    pub resolution: usize,
    /// Points used to draw the input marginals.
    pub line_points: usize,
    pub key_digits: u32,
    pub tie_tolerance: f64,
    pub tie_floor: f64,
    /// Minimum gap the drag-update rule keeps between handles.
    pub min_separation: f64,
    pub copula: Copula,
    pub marginal_x: TriangularParams,
    pub marginal_y: TriangularParams
}

impl EngineConfiguration {
    pub const DEFAULT_RESOLUTION: usize = 100;
    pub const DEFAULT_LINE_POINTS: usize = 101;

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<EngineConfiguration, PossibilityError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let config: EngineConfiguration = serde_json::from_reader(reader)?;
        config.validate()?;
        info!(path = %file_path.as_ref().display(), resolution = config.resolution, "Loaded engine configuration");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<EngineConfiguration, PossibilityError> {
        let config: EngineConfiguration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PossibilityError> {
        if self.resolution < 2 {
            return Err(PossibilityError::invalid_configuration(format!(
                "resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        if self.line_points < 2 {
            return Err(PossibilityError::invalid_configuration(format!(
                "line_points must be at least 2, got {}",
                self.line_points
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(PossibilityError::invalid_configuration(format!(
                "min_separation must be finite and non-negative, got {}",
                self.min_separation
            )));
        }
        self.propagation_settings().map(|_| ())
    }

    pub fn propagation_settings(&self) -> Result<PropagationSettings, PossibilityError> {
        PropagationSettings::new(self.key_digits, self.tie_tolerance, self.tie_floor)
    }
}

impl Default for EngineConfiguration {
    fn default() -> Self {
        EngineConfiguration {
            resolution: Self::DEFAULT_RESOLUTION,
            line_points: Self::DEFAULT_LINE_POINTS,
            key_digits: PropagationSettings::DEFAULT_KEY_DIGITS,
            tie_tolerance: PropagationSettings::DEFAULT_TIE_TOLERANCE,
            tie_floor: PropagationSettings::DEFAULT_TIE_FLOOR,
            min_separation: 0.0,
            copula: Copula::Independence,
            marginal_x: TriangularParams::from_ordered(2.3, 3.0, 3.7, Domain::from_ordered(2.0, 4.0)),
            marginal_y: TriangularParams::from_ordered(3.4, 4.0, 4.6, Domain::from_ordered(3.0, 5.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = EngineConfiguration::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfiguration::default());
        assert_eq!(config.resolution, 100);
        assert_eq!(config.copula, Copula::Independence);
        assert_eq!(config.marginal_y.peak(), 4.0);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfiguration::from_json_str(
            r#"{
                "resolution": 50,
                "copula": "unknown",
                "marginal_x": {"left_base": 0.0, "peak": 1.0, "right_base": 2.0, "domain": [0.0, 2.0]}
            }"#,
        )
        .unwrap();
        assert_eq!(config.resolution, 50);
        assert_eq!(config.copula, Copula::Unknown);
        assert_eq!(config.marginal_x.domain(), Domain::new(0.0, 2.0).unwrap());
        assert_eq!(config.marginal_y, EngineConfiguration::default().marginal_y);
    }

    #[test]
    fn test_rejections() {
        let cases = [
            r#"{"resolution": 1}"#,
            r#"{"line_points": 0}"#,
            r#"{"key_digits": 15}"#,
            r#"{"tie_tolerance": -0.5}"#,
            r#"{"min_separation": -1.0}"#,
        ];
        for json in cases {
            let err = EngineConfiguration::from_json_str(json).unwrap_err();
            assert!(matches!(err, PossibilityError::InvalidConfiguration(_)), "{json}");
        }

        let err = EngineConfiguration::from_json_str(r#"{"copula": "frank"}"#).unwrap_err();
        assert!(matches!(err, PossibilityError::JsonParseError(_)));
        assert!(err.to_string().contains("frank"));

        let err = EngineConfiguration::from_json_str(r#"{"resolutoin": 10}"#).unwrap_err();
        assert!(matches!(err, PossibilityError::JsonParseError(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("possibility-config-{}.json", std::process::id()));
        let mut config = EngineConfiguration::default();
        config.resolution = 64;
        config.copula = Copula::Unknown;
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes()).unwrap();
        }
        let loaded = EngineConfiguration::from_reader(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfiguration::from_reader("/nonexistent/possibility.json").unwrap_err();
        assert!(matches!(err, PossibilityError::IOError(_)));
    }
}
