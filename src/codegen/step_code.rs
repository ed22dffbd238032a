use tracing::debug;

use crate::codegen::test_body::python_string;
use crate::model::step_model::{BooleanCheck, KIND_GET_TEXT, Step, StepCode};
use crate::naming::element_name::derive_element_name;

// ============================================================================
// Server-side rendering of step code
// ============================================================================
//
// The recorder normally ships `code.methodDefinition` / `code.methodCall`
// with each step. Older recordings, and steps imported from elsewhere, may
// not carry them; these functions produce the same fragments from the
// step's kind, element and variable bindings.

/// Code fragments rendered for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCode {
    pub code: StepCode,
    /// Set for assertions that can also serve as an `if` condition
    pub boolean_check: Option<BooleanCheck>,
}

/// Assertion subtypes that have a boolean form, with that form's method.
const BOOLEAN_ASSERTS: [(&str, &str, &str, &str); 6] = [
    ("assertVisible", "is_visible_with_healing", "", "Element is not visible"),
    ("assertNotVisible", "is_not_visible_with_healing", "", "Element is visible"),
    ("assertIsClickable", "is_clickable_with_healing", "", "Element is not clickable"),
    ("assertIsNotClickable", "is_clickable_with_healing", "not ", "Element is clickable"),
    ("assertIsEnabled", "is_enabled_with_healing", "", "Element is disabled"),
    ("assertIsDisabled", "is_enabled_with_healing", "not ", "Element is enabled"),
];

/// Render the method definition and call for a step.
///
/// Returns `None` for conditionals and for kinds with no known body.
pub fn render_step_code(step: &Step) -> Option<RenderedCode> {
    if step.is_conditional() {
        return None;
    }

    let element = derive_element_name(step.data.as_ref());
    let locators = format!("self.{}_locators", element);
    let label = step.sub_type.as_deref().unwrap_or(step.kind());

    // `variableForValue` wins over `variableName` for the call argument. A
    // text read assigns to its `variableName` instead of taking it.
    let call_arg = step.value_reference().or_else(|| {
        step.variable_name
            .clone()
            .filter(|n| !n.is_empty() && step.kind() != KIND_GET_TEXT)
    });
    let param = call_arg.as_ref().map(|a| a.to_lowercase());

    let mut method_name = format!("{}_{}", label, element);
    let mut boolean_check = None;

    let body = match step.kind() {
        "click" => format!("self.do_click_with_healing({})", locators),
        "right_click" => format!("self.do_right_click_with_healing({})", locators),
        "hover" => format!("self.do_hover_with_healing({})", locators),
        "double_click" => format!("self.do_double_click_with_healing({})", locators),
        "input" => {
            let value = param.clone().unwrap_or_else(|| data_literal(step, |d| d.value.as_deref()));
            format!("self.do_clear_and_send_keys_with_healing({}, {})", locators, value)
        }
        "select" => format!(
            "self.select_option_by_visible_text({}, {})",
            locators,
            data_literal(step, |d| d.selected_text.as_deref())
        ),
        KIND_GET_TEXT => {
            method_name = format!("get_text_from_{}", element);
            format!("return self.get_text_with_healing({})", locators)
        }
        "switch_to_iframe" => format!("self.switch_to_iframe({})", locators),
        "switch_to_default_content" => {
            method_name = "switch_to_default_content".to_string();
            "self.switch_to_default_content()".to_string()
        }
        "wait" => {
            let wait_method = match step.sub_type.as_deref() {
                Some("waitVisible") => "wait_for_element_visible",
                Some("waitInvisible") => "wait_for_element_invisible",
                Some("waitClickable") => "wait_for_element_to_be_clickable",
                _ => return None,
            };
            format!("self.{}({})", wait_method, locators)
        }
        "assert" => {
            let sub_type = step.sub_type.as_deref().unwrap_or("");
            if let Some((_, check_method, negation, message)) =
                BOOLEAN_ASSERTS.iter().find(|(s, ..)| *s == sub_type)
            {
                boolean_check = Some(BooleanCheck {
                    method_name: format!("{}{}", negation, check_method),
                    locator_var_name: locators.clone(),
                });
                format!(
                    "assert {}self.{}({}), {}",
                    negation,
                    check_method,
                    locators,
                    python_string(message)
                )
            } else {
                assert_body(step, sub_type, &locators, param.as_deref())?
            }
        }
        _ => return None,
    };

    let signature = match &param {
        Some(p) => format!("(self, {})", p),
        None => "(self)".to_string(),
    };
    let call_args = match &call_arg {
        Some(a) => format!("({})", a),
        None => "()".to_string(),
    };

    let title = step_title(step, label, &element, param.as_deref());
    let method_definition = format!(
        "    @allure.step({})\n    def {}{}:\n        {}",
        python_string(&title),
        method_name,
        signature,
        body
    );

    let mut method_call = format!("page.{}{}", method_name, call_args);
    if step.kind() == KIND_GET_TEXT {
        if let Some(var) = step.variable_name.as_deref().filter(|v| !v.is_empty()) {
            method_call = format!("{} = {}", var, method_call);
        }
    }

    Some(RenderedCode {
        code: StepCode {
            method_definition: Some(method_definition),
            method_call: Some(method_call),
        },
        boolean_check,
    })
}

fn assert_body(step: &Step, sub_type: &str, locators: &str, param: Option<&str>) -> Option<String> {
    let expected = |text: Option<&String>| -> String {
        param
            .map(str::to_string)
            .unwrap_or_else(|| python_string(text.map(String::as_str).unwrap_or("")))
    };

    let body = match sub_type {
        "assertTextEquals" => format!(
            "assert self.get_text_with_healing({}) == {}",
            locators,
            expected(step.expected_text.as_ref())
        ),
        "assertValueEquals" => format!(
            "assert self.get_attribute_with_healing({}, \"value\") == {}",
            locators,
            expected(step.expected_value.as_ref())
        ),
        "assertHasCssClass" => format!(
            "assert {} in self.get_attribute_with_healing({}, \"class\")",
            python_string(step.expected_css_class.as_deref().unwrap_or("")),
            locators
        ),
        "assertAttribute" => format!(
            "assert self.get_attribute_with_healing({}, {}) == {}",
            locators,
            python_string(step.expected_attribute_name.as_deref().unwrap_or("")),
            python_string(step.expected_attribute_value.as_deref().unwrap_or(""))
        ),
        _ => return None,
    };
    Some(body)
}

fn data_literal<F>(step: &Step, field: F) -> String
where
    F: Fn(&crate::model::step_model::ElementData) -> Option<&str>,
{
    python_string(step.data.as_ref().and_then(field).unwrap_or(""))
}

/// Allure title: the recorded one with its first quoted value replaced by
/// `{param}` when the step is parameterized, else `<kind> <element>`.
fn step_title(step: &Step, label: &str, element: &str, param: Option<&str>) -> String {
    let title = step
        .allure_step
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} {}", label, element));

    match param {
        Some(p) => replace_first_quoted(&title, &format!("{{{}}}", p)),
        None => title,
    }
}

fn replace_first_quoted(text: &str, replacement: &str) -> String {
    let Some(start) = text.find('\'') else {
        return text.to_string();
    };
    let Some(len) = text[start + 1..].find('\'') else {
        return text.to_string();
    };
    let end = start + 1 + len + 1;
    format!("{}{}{}", &text[..start], replacement, &text[end..])
}

// ============================================================================
// Tree fill
// ============================================================================

/// Copy a step tree, rendering code for every step that has none.
///
/// Steps that already carry code are copied unchanged. A rendered boolean
/// check only fills an absent one.
pub fn fill_missing_code(steps: &[Step]) -> Vec<Step> {
    steps.iter().map(fill_step).collect()
}

fn fill_step(step: &Step) -> Step {
    let mut out = step.clone();

    if step.is_conditional() {
        out.condition = step.condition.as_deref().map(|c| Box::new(fill_step(c)));
        out.then_steps = fill_missing_code(&step.then_steps);
        out.else_steps = fill_missing_code(&step.else_steps);
        return out;
    }

    if step.lacks_code() {
        if let Some(rendered) = render_step_code(step) {
            debug!(kind = step.kind(), "rendered missing step code");
            out.code = Some(rendered.code);
            if out.boolean_check.is_none() {
                out.boolean_check = rendered.boolean_check;
            }
        }
    }

    out
}
