//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set or empty: returns `default` silently.
/// - If the variable is set but cannot be parsed: logs a warning and
///   returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        _ => default,
    }
}

/// Read a string environment variable with a default fallback.
///
/// Empty or whitespace-only values count as unset.
pub fn env_string_with_default(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Read an optional string environment variable.
///
/// Empty or whitespace-only values count as unset.
pub fn env_optional(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "SCOUT_TEST_ENV_PARSE_VALID_41201";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "SCOUT_TEST_ENV_PARSE_INVALID_41202";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "SCOUT_TEST_ENV_PARSE_MISSING_41203";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_parse_empty_value() {
        let var_name = "SCOUT_TEST_ENV_PARSE_EMPTY_41204";
        unsafe { std::env::set_var(var_name, "") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_optional_trims_and_filters_empty() {
        let var_name = "SCOUT_TEST_ENV_OPTIONAL_41205";
        unsafe { std::env::set_var(var_name, "  token  ") };
        assert_eq!(env_optional(var_name).as_deref(), Some("token"));
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(env_optional(var_name), None);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_string_default_applies() {
        let var_name = "SCOUT_TEST_ENV_STRING_41206";
        unsafe { std::env::remove_var(var_name) };
        assert_eq!(env_string_with_default(var_name, "fallback"), "fallback");
        unsafe { std::env::set_var(var_name, "value") };
        assert_eq!(env_string_with_default(var_name, "fallback"), "value");
        unsafe { std::env::remove_var(var_name) };
    }
}
