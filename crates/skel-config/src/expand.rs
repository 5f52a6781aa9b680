//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left alone. `field` names the config key in errors.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SKEL_TEST_EXPAND_SIMPLE", "sk-123");
        }
        let result = expand_env("${SKEL_TEST_EXPAND_SIMPLE}", "generator.api_key").unwrap();
        assert_eq!(result, "sk-123");
        unsafe {
            std::env::remove_var("SKEL_TEST_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SKEL_TEST_EXPAND_UNSET");
        }
        let result = expand_env("${SKEL_TEST_EXPAND_UNSET:-}", "generator.api_key").unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SKEL_TEST_EXPAND_HOST", "llm.internal");
        }
        let result = expand_env("https://${SKEL_TEST_EXPAND_HOST}/v1", "generator.api_url").unwrap();
        assert_eq!(result, "https://llm.internal/v1");
        unsafe {
            std::env::remove_var("SKEL_TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SKEL_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${SKEL_TEST_EXPAND_MISSING}", "generator.api_key").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SKEL_TEST_EXPAND_MISSING"));
        assert!(err.to_string().contains("generator.api_key"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("$KEY", "generator.api_key").unwrap(), "$KEY");
    }
}
