//! Structure check configuration.

use novel_core::error::EngineError;

/// Beats a complete manuscript is expected to hit, in story order.
pub const DEFAULT_REQUIRED_BEATS: &[&str] = &[
    "setup",
    "inciting_incident",
    "first_plot_point",
    "midpoint",
    "second_plot_point",
    "climax",
    "resolution",
];

/// Knobs for the structure check.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureConfig {
    /// Required beat ids in expected order.
    pub required_beats: Vec<String>,
    /// Coverage below which a warning is raised.
    pub min_coverage: Option<f64>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            required_beats: DEFAULT_REQUIRED_BEATS
                .iter()
                .map(|beat| (*beat).to_owned())
                .collect(),
            min_coverage: None,
        }
    }
}

impl StructureConfig {
    /// Required beats, trimmed and de-duplicated, in declared order.
    #[must_use]
    pub fn required(&self) -> Vec<&str> {
        let mut beats: Vec<&str> = Vec::new();
        for beat in self.required_beats.iter().map(|b| b.trim()) {
            if !beats.contains(&beat) {
                beats.push(beat);
            }
        }
        beats
    }

    /// Checks argument ranges.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if a beat id is blank or
    /// `min_coverage` is not within `[0, 1]`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.required_beats.iter().any(|b| b.trim().is_empty()) {
            return Err(EngineError::InvalidArgument(
                "requiredBeats must not contain blank ids".to_owned(),
            ));
        }
        if let Some(min) = self.min_coverage
            && !(0.0..=1.0).contains(&min)
        {
            return Err(EngineError::InvalidArgument(format!(
                "minCoverage must be between 0 and 1, got {min}"
            )));
        }
        Ok(())
    }
}
