//! Style check configuration.

use novel_core::error::EngineError;

/// Uses of one catchphrase above which it is flagged as overused.
pub const DEFAULT_CATCHPHRASE_MAX_COUNT: usize = 3;

/// Knobs for the style check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Words or phrases to flag in prose.
    pub avoid_words: Vec<String>,
    /// Catchphrase uses above this count escalate to a warning.
    pub catchphrase_max_count: usize,
    /// Whether unused catchphrases are reported.
    pub catchphrase_report_missing: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            avoid_words: Vec::new(),
            catchphrase_max_count: DEFAULT_CATCHPHRASE_MAX_COUNT,
            catchphrase_report_missing: true,
        }
    }
}

impl StyleConfig {
    /// Avoid-words, trimmed and de-duplicated, in declared order.
    #[must_use]
    pub fn avoid_list(&self) -> Vec<&str> {
        let mut words: Vec<&str> = Vec::new();
        for word in self.avoid_words.iter().map(|w| w.trim()) {
            if !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }

    /// Rejects blank avoid-words.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if an avoid-word is blank.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.avoid_words.iter().any(|w| w.trim().is_empty()) {
            return Err(EngineError::InvalidArgument(
                "avoidWords must not contain blank entries".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avoid_list_trims_and_dedups() {
        let config = StyleConfig {
            avoid_words: vec!["very".into(), " 突然 ".into(), "very ".into()],
            ..StyleConfig::default()
        };

        assert_eq!(config.avoid_list(), vec!["very", "突然"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_avoid_word_is_invalid() {
        let config = StyleConfig {
            avoid_words: vec!["very".into(), "\t".into()],
            ..StyleConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
