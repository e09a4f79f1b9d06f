//! Retry budgets for the constrained searches.
//!
//! Every search loop in the engine is bounded by one of these ceilings and
//! falls back to a canonical example when the ceiling is hit. The defaults are
//! what the bundled generators are tuned for; callers can load overrides from
//! JSON with [`GeneratorConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::problem_engine::error::{ProblemError, ProblemResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Candidate draws before decomposition falls back to its canonical example.
    pub decomposition_attempts: u32,
    /// Operand draws before column subtraction falls back to 52 - 17.
    pub column_subtraction_attempts: u32,
    /// Strategy calls before the distractor pool pads with `correct + k`.
    pub distractor_attempts: u32,
    /// Redraws used to avoid repeating the previous equation's `x`.
    pub repeat_avoidance_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            decomposition_attempts: 100,
            column_subtraction_attempts: 50,
            distractor_attempts: 40,
            repeat_avoidance_attempts: 5,
        }
    }
}

impl GeneratorConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json(text: &str) -> ProblemResult<Self> {
        let config: GeneratorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ProblemResult<()> {
        let budgets = [
            ("decomposition_attempts", self.decomposition_attempts),
            ("column_subtraction_attempts", self.column_subtraction_attempts),
            ("distractor_attempts", self.distractor_attempts),
        ];
        for (name, value) in budgets {
            if value == 0 {
                return Err(ProblemError::InvalidConfig {
                    reason: format!("{name} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GeneratorConfig::from_json(r#"{ "distractor_attempts": 12 }"#).unwrap();
        assert_eq!(cfg.distractor_attempts, 12);
        assert_eq!(cfg.decomposition_attempts, 100);
        assert_eq!(cfg.repeat_avoidance_attempts, 5);
    }

    #[test]
    fn zero_budget_is_rejected() {
        let err =
            GeneratorConfig::from_json(r#"{ "column_subtraction_attempts": 0 }"#).unwrap_err();
        assert!(matches!(err, ProblemError::InvalidConfig { .. }), "got {err}");
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GeneratorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ProblemError::Json(_)));
    }

    #[test]
    fn zero_repeat_avoidance_is_allowed() {
        // No redraws simply means "accept whatever x comes out first".
        let cfg = GeneratorConfig::from_json(r#"{ "repeat_avoidance_attempts": 0 }"#).unwrap();
        assert_eq!(cfg.repeat_avoidance_attempts, 0);
    }
}
