/// Identifier used when a scenario has no usable name.
pub const UNNAMED_SCENARIO: &str = "test_unnamed_scenario";

/// Turn a free-text scenario name into a pytest function name.
///
/// ```text
/// "Login as Admin"  -> test_login_as_admin
/// "Checkout #2 (EU)" -> test_checkout_2_eu
/// ""                 -> test_unnamed_scenario
/// ```
pub fn sanitize_test_function_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return UNNAMED_SCENARIO.to_string();
    }

    let lowered = trimmed.to_lowercase();
    let mut body = String::with_capacity(lowered.len());
    let mut in_space = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                body.push('_');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            body.push(c);
        }
    }

    format!("test_{}", body)
}
