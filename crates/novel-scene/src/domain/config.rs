//! Scene check configuration.

use novel_core::error::EngineError;

/// Knobs for the scene check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneConfig {
    /// Extra scene fields that must be present and non-blank.
    pub required_fields: Vec<String>,
}

impl SceneConfig {
    /// Required fields, trimmed and de-duplicated, in declared order.
    #[must_use]
    pub fn extra_required(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for field in self.required_fields.iter().map(|f| f.trim()) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    /// Rejects blank field names.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if any required field is blank.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.required_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(EngineError::InvalidArgument(
                "requiredFields must not contain blank names".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_required_trims_and_dedupes() {
        let config = SceneConfig {
            required_fields: vec!["hook".into(), " stakes ".into(), "hook".into()],
        };

        assert_eq!(config.extra_required(), vec!["hook", "stakes"]);
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let config = SceneConfig {
            required_fields: vec!["  ".into()],
        };

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
