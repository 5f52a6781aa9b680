//! Checks run on input before a request and on output after it.

use tracing::error;

use crate::error::GenerateError;

/// Token every placeholder must carry.
pub const FILL_TOKEN: &str = "bg-gray-300";

/// Token the skeleton root must carry.
pub const LOADING_MARKER: &str = "animate-pulse";

/// Default for the longest accepted component, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 15_000;

/// Reject components that cannot produce a useful skeleton.
///
/// # Errors
///
/// Returns [`GenerateError::Validation`] for blank input, input longer than
/// `max_chars` characters, or unbalanced curly braces.
pub fn validate_component(code: &str, max_chars: usize) -> Result<(), GenerateError> {
    if code.trim().is_empty() {
        return Err(GenerateError::Validation(
            "Component code cannot be empty".to_owned(),
        ));
    }

    validate_length(code, max_chars)?;

    let opening = code.matches('{').count();
    let closing = code.matches('}').count();
    if opening != closing {
        return Err(GenerateError::Validation(
            "Component code has unbalanced brackets".to_owned(),
        ));
    }

    Ok(())
}

/// Reject components longer than `max_chars` characters.
///
/// # Errors
///
/// Returns [`GenerateError::Validation`] naming the limit.
pub fn validate_length(code: &str, max_chars: usize) -> Result<(), GenerateError> {
    if code.chars().count() > max_chars {
        return Err(GenerateError::Validation(format!(
            "Component code exceeds maximum length ({max_chars} characters)"
        )));
    }
    Ok(())
}

/// Check generated code and strip a surrounding Markdown code fence.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidOutput`] if the fill token or the loading
/// marker is missing. The raw output is logged.
pub fn validate_output(raw: &str) -> Result<String, GenerateError> {
    let code = strip_code_fence(raw);
    if code.is_empty() || !code.contains(LOADING_MARKER) || !code.contains(FILL_TOKEN) {
        error!(output = raw, "Generated skeleton failed validation");
        return Err(GenerateError::InvalidOutput);
    }
    Ok(code.to_owned())
}

/// Contents of a ```` ```lang ... ``` ```` block, or the trimmed input.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((_, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    body.trim_end()
        .strip_suffix("```")
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(result: Result<(), GenerateError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_valid_component() {
        assert!(validate_component("<div>{user.name}</div>", DEFAULT_MAX_INPUT_CHARS).is_ok());
    }

    #[test]
    fn test_blank_component() {
        assert_eq!(
            message(validate_component(" \n\t", DEFAULT_MAX_INPUT_CHARS)),
            "Component code cannot be empty"
        );
    }

    #[test]
    fn test_component_too_long() {
        let code = "a".repeat(DEFAULT_MAX_INPUT_CHARS + 1);

        assert_eq!(
            message(validate_component(&code, DEFAULT_MAX_INPUT_CHARS)),
            "Component code exceeds maximum length (15000 characters)"
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let code = "é".repeat(10);

        assert!(validate_component(&code, 10).is_ok());
        assert!(validate_component(&code, 9).is_err());
    }

    #[test]
    fn test_validate_length_alone() {
        assert!(validate_length("", 0).is_ok());
        assert!(validate_length("{{{", 3).is_ok());
        assert_eq!(
            message(validate_length("abcd", 3)),
            "Component code exceeds maximum length (3 characters)"
        );
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(
            message(validate_component("function A() { return <div/>;", DEFAULT_MAX_INPUT_CHARS)),
            "Component code has unbalanced brackets"
        );
    }

    #[test]
    fn test_output_requires_both_tokens() {
        assert!(validate_output(r#"<div class="bg-gray-300"></div>"#).is_err());
        assert!(validate_output(r#"<div class="animate-pulse"></div>"#).is_err());
        assert!(validate_output("").is_err());
    }

    #[test]
    fn test_output_passes_through() {
        let code = r#"<div class="animate-pulse" role="status"><div class="bg-gray-300"></div></div>"#;

        assert_eq!(validate_output(code).unwrap(), code);
    }

    #[test]
    fn test_output_code_fence_stripped() {
        let raw = "```html\n<div class=\"animate-pulse\"><div class=\"bg-gray-300\"></div></div>\n```\n";

        assert_eq!(
            validate_output(raw).unwrap(),
            "<div class=\"animate-pulse\"><div class=\"bg-gray-300\"></div></div>"
        );
    }

    #[test]
    fn test_unterminated_fence_left_alone() {
        assert_eq!(strip_code_fence("```html\n<div>"), "```html\n<div>");
    }
}
