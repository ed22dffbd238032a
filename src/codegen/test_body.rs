use serde_json::Value;
use tracing::debug;

use crate::codegen::source_builder::SourceBuilder;
use crate::model::lenient::scalar_text;
use crate::model::request_model::{StateData, TestCase};
use crate::model::step_model::{BooleanCheck, KIND_GET_TEXT, Step};
use crate::naming::identifier::sanitize_test_function_name;

// ============================================================================
// Test function assembly
// ============================================================================

/// Assemble the pytest function for one scenario.
///
/// Layout: scenario comment, `@allure.feature` / `@allure.title`, the
/// function header, the page-object instance, a blank line, the variable
/// section, then the call sequence.
pub fn assemble_test_body(case: &TestCase, state: &StateData) -> String {
    let scenario = case.display_name();
    let function_name = sanitize_test_function_name(scenario);

    let mut b = SourceBuilder::new();
    b.line(format!("# --- Test for scenario: \"{}\" ---", single_line(scenario)));
    b.line(format!("@allure.feature({})", python_string(state.feature_name())));
    b.line(format!("@allure.title({})", python_string(scenario)));
    b.line(format!("def {}(driver):", function_name));

    let mut body = SourceBuilder::at_level(1);
    body.line(format!("page = {}(driver)", case.page_class()));
    body.blank();

    body.append(variable_section(case, state));

    let mut calls = SourceBuilder::at_level(1);
    render_calls(&case.recorded_steps, &mut calls);
    debug!(function = %function_name, lines = calls.lines().len(), "rendered call sequence");

    if calls.is_empty() {
        body.blank();
    } else {
        body.append(calls);
    }

    b.append(body);
    b.finish()
}

// ============================================================================
// Variables
// ============================================================================

/// Environment assignments followed by DDT assignments, at function level.
pub fn variable_section(case: &TestCase, state: &StateData) -> SourceBuilder {
    let mut b = SourceBuilder::at_level(1);

    if let Some(vars) = state.active_environment_vars() {
        b.line(format!("# Variables for environment: {}", state.active_environment()));
        for (key, value) in vars {
            b.line(format!("{} = {}", key, python_string(&value_text(value))));
        }
    }

    let ddt = collect_ddt_variables(&case.recorded_steps);
    if !ddt.is_empty() {
        b.line("# DDT variables");
        for (key, value) in &ddt {
            b.line(format!("{} = {}", key, python_string(value)));
        }
    }

    b
}

/// DDT literals bound by top-level steps.
///
/// A step defines a variable when it has a `variableName`, does not read
/// text from the page, and does not itself reference another variable.
/// Steps nested inside conditionals are not scanned. A repeated name keeps
/// its first position and takes the last value.
pub fn collect_ddt_variables(steps: &[Step]) -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = Vec::new();

    for step in steps {
        let Some(name) = step.variable_name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        if step.kind() == KIND_GET_TEXT || step.binds_value() {
            continue;
        }

        let value = step
            .data
            .as_ref()
            .and_then(|d| d.value.clone())
            .or_else(|| step.expected_text.clone())
            .unwrap_or_default();

        match vars.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => vars.push((name.to_string(), value)),
        }
    }

    vars
}

// ============================================================================
// Call sequence
// ============================================================================

/// Render the call lines for a step sequence at the builder's level.
///
/// Conditionals become `if`/`else` blocks around their branches. Steps with
/// no call, and conditionals with no boolean check, emit nothing.
pub fn render_calls(steps: &[Step], b: &mut SourceBuilder) {
    for step in steps {
        if step.is_conditional() {
            let check = step
                .condition
                .as_deref()
                .and_then(|c| c.boolean_check.as_ref())
                .filter(|c| !c.method_name.trim().is_empty());

            let Some(check) = check else {
                continue;
            };

            b.line(condition_head(check));
            b.indented(|b| render_branch(&step.then_steps, b));

            if !step.else_steps.is_empty() {
                b.line("else:");
                b.indented(|b| render_branch(&step.else_steps, b));
            }
        } else if let Some(call) = step.method_call() {
            b.line(call);
        }
    }
}

fn render_branch(steps: &[Step], b: &mut SourceBuilder) {
    let before = b.lines().len();
    render_calls(steps, b);
    if b.lines().len() == before {
        b.line("pass");
    }
}

/// `if page.<method>(page.<locators>):`
///
/// The recorder writes locator variables as `self.<name>_locators` and
/// negated checks as `not self.<method>`; both are rewritten to go through
/// the `page` instance.
pub fn condition_head(check: &BooleanCheck) -> String {
    let method = check.method_name.trim();
    let (negation, method) = match method.strip_prefix("not ") {
        Some(rest) => ("not ", rest.trim_start()),
        None => ("", method),
    };
    let method = method.strip_prefix("self.").unwrap_or(method);

    let locator = check.locator_var_name.trim();
    let locator = locator.strip_prefix("self.").unwrap_or(locator);

    format!("if {}page.{}(page.{}):", negation, method, locator)
}

// ============================================================================
// Literal helpers
// ============================================================================

/// Double-quoted Python string literal.
pub fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => scalar_text(other).unwrap_or_else(|| other.to_string()),
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_head_plain() {
        let check = BooleanCheck {
            method_name: "is_visible_with_healing".into(),
            locator_var_name: "banner_locators".into(),
        };
        assert_eq!(
            condition_head(&check),
            "if page.is_visible_with_healing(page.banner_locators):"
        );
    }

    #[test]
    fn condition_head_rewrites_recorder_forms() {
        let check = BooleanCheck {
            method_name: "not self.is_enabled_with_healing".into(),
            locator_var_name: "self.save_locators".into(),
        };
        assert_eq!(
            condition_head(&check),
            "if not page.is_enabled_with_healing(page.save_locators):"
        );
    }

    #[test]
    fn python_string_escapes_quotes() {
        assert_eq!(python_string(r#"say "hi""#), r#""say \"hi\"""#);
    }
}
