use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{is_truthy, item_list, opt_text, or_default, scalar_text, text_list};

/// Step kind that carries a condition and two branches.
pub const KIND_CONDITIONAL: &str = "conditional";

/// Step kind that reads text from the page into a variable.
pub const KIND_GET_TEXT: &str = "getText";

// ============================================================================
// Recorded step tree
// ============================================================================

/// A single recorded interaction, or a conditional node with nested branches.
///
/// Every field is optional on the wire. Shape mismatches degrade to the
/// field's default instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Behaviour tag: `click`, `input`, `assert`, `conditional`, ...
    #[serde(rename = "type", default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Refinement of `kind`, e.g. `assertVisible` under `assert`
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,

    /// Descriptive attributes of the target element
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub data: Option<ElementData>,

    /// Fallback-ordered locator expressions, first match wins
    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub locators: Vec<String>,

    /// Pre-rendered code fragments from the recorder
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub code: Option<StepCode>,

    /// Human-readable allure step title
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub allure_step: Option<String>,

    /// DDT variable this step's value is bound to
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,

    /// Reference to a variable defined elsewhere; such steps never define one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_for_value: Option<Value>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub expected_text: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub expected_css_class: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub expected_attribute_name: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub expected_attribute_value: Option<String>,

    /// Boolean form of an assertion, used when the step is a condition
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub boolean_check: Option<BooleanCheck>,

    /// Condition node of a `conditional` step
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub condition: Option<Box<Step>>,

    #[serde(rename = "then_steps", alias = "thenSteps", default, deserialize_with = "item_list", skip_serializing_if = "Vec::is_empty")]
    pub then_steps: Vec<Step>,

    #[serde(rename = "else_steps", alias = "elseSteps", default, deserialize_with = "item_list", skip_serializing_if = "Vec::is_empty")]
    pub else_steps: Vec<Step>,
}

impl Step {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("")
    }

    pub fn is_conditional(&self) -> bool {
        self.kind() == KIND_CONDITIONAL
    }

    /// Non-empty page-object method definition, if the step carries one.
    pub fn method_definition(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|c| c.method_definition.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Non-empty test-body call line, if the step carries one.
    pub fn method_call(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|c| c.method_call.as_deref())
            .filter(|c| !c.is_empty())
    }

    /// Whether this step reads its value from another variable.
    pub fn binds_value(&self) -> bool {
        self.variable_for_value.as_ref().is_some_and(is_truthy)
    }

    /// Name of the referenced variable, when `variableForValue` is text.
    pub fn value_reference(&self) -> Option<String> {
        self.variable_for_value
            .as_ref()
            .filter(|v| is_truthy(v))
            .and_then(scalar_text)
    }

    /// Whether both code fragments are missing.
    pub fn lacks_code(&self) -> bool {
        self.method_definition().is_none() && self.method_call().is_none()
    }
}

/// Pre-rendered code for one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCode {
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub method_definition: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub method_call: Option<String>,
}

/// Method and locator variable for an `if` head.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanCheck {
    #[serde(default)]
    pub method_name: String,

    #[serde(default)]
    pub locator_var_name: String,
}

// ============================================================================
// Element description
// ============================================================================

/// What the recorder captured about the target element.
///
/// Parsed from the raw key map so that a key sent as `null` still counts as
/// sent: emptiness and selector presence follow the keys the recorder wrote,
/// not the values that survived lenient parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct ElementData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Visible text of the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Typed or current value, used as a DDT literal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,

    /// Raw DOM attributes (`data-testid`, `class`, ...)
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,

    /// Set only when the recorder sent a non-empty `selectors` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Selectors>,

    /// Anything else the recorder sent (rect, iframe info, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Whether the source map had any key at all, `null`-valued ones included
    #[serde(skip)]
    pub had_keys: bool,
}

impl From<Map<String, Value>> for ElementData {
    fn from(mut raw: Map<String, Value>) -> Self {
        let had_keys = !raw.is_empty();
        let mut text = |key: &str| raw.remove(key).as_ref().and_then(scalar_text);

        let tag = text("tag");
        let text_value = text("text");
        let value = text("value");
        let selected_text = text("selectedText");

        let attributes = match raw.remove("attributes") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        // Any truthy `selectors` value means selectors were captured, even
        // when none of its entries is usable.
        let selectors = raw
            .remove("selectors")
            .filter(is_truthy)
            .map(|v| serde_json::from_value(v).unwrap_or_default());

        ElementData {
            tag,
            text: text_value,
            value,
            selected_text,
            attributes,
            selectors,
            extra: raw,
            had_keys,
        }
    }
}

impl ElementData {
    pub fn is_empty(&self) -> bool {
        !self.had_keys
            && self.tag.is_none()
            && self.text.is_none()
            && self.value.is_none()
            && self.selected_text.is_none()
            && self.attributes.is_empty()
            && self.selectors.is_none()
            && self.extra.is_empty()
    }

    /// The stable test id attribute, if present.
    pub fn test_id(&self) -> Option<String> {
        self.attributes.get("data-testid").and_then(scalar_text)
    }
}

/// Selector candidates computed by the recorder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Other selector kinds (css, xpath, fullXpath, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
