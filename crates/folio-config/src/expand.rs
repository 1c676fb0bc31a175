//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("https://api.github.com", "github.api_url").unwrap(),
            "https://api.github.com"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${FOLIO_EXPAND_UNSET:-fallback}", "github.token").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_set_variable_wins_over_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_EXPAND_SET", "value");
        }
        assert_eq!(
            expand_env("pre-${FOLIO_EXPAND_SET:-fallback}", "github.token").unwrap(),
            "pre-value"
        );
        unsafe {
            std::env::remove_var("FOLIO_EXPAND_SET");
        }
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_EXPAND_MISSING");
        }
        let err = expand_env("${FOLIO_EXPAND_MISSING}", "github.token").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("github.token"));
        assert!(msg.contains("${FOLIO_EXPAND_MISSING} not set"));
    }
}
