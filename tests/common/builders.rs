use serde_json::{Value, json};

use scenario_codegen::model::request_model::{GenerationRequest, TestCase};
use scenario_codegen::model::step_model::Step;

pub fn step(value: Value) -> Step {
    serde_json::from_value(value).expect("step json")
}

pub fn request(value: Value) -> GenerationRequest {
    serde_json::from_value(value).expect("request json")
}

pub fn test_case(value: Value) -> TestCase {
    serde_json::from_value(value).expect("test case json")
}

/// Method definition the recorder ships for `<kind>_<id>`.
pub fn definition(kind: &str, id: &str) -> String {
    format!(
        "    @allure.step(\"{kind} {id}\")\n    def {kind}_{id}(self):\n        self.do_{kind}_with_healing(self.{id}_locators)"
    )
}

/// A recorded action on an element with selector id `id`, code included.
pub fn action(kind: &str, id: &str) -> Value {
    json!({
        "type": kind,
        "data": { "tag": "button", "selectors": { "id": id } },
        "locators": [format!("(By.ID, \"{}\")", id), format!("(By.NAME, \"{}\")", id)],
        "code": {
            "methodDefinition": definition(kind, id),
            "methodCall": format!("page.{}_{}()", kind, id),
        }
    })
}

/// A visibility assertion usable as a condition.
pub fn visible_check(id: &str) -> Value {
    json!({
        "type": "assert",
        "subType": "assertVisible",
        "data": { "selectors": { "id": id } },
        "locators": [format!("(By.ID, \"{}\")", id)],
        "code": {
            "methodDefinition": format!(
                "    @allure.step(\"check {id}\")\n    def assertVisible_{id}(self):\n        assert self.is_visible_with_healing(self.{id}_locators)"
            ),
            "methodCall": format!("page.assertVisible_{}()", id),
        },
        "booleanCheck": {
            "methodName": "is_visible_with_healing",
            "locatorVarName": format!("{}_locators", id),
        }
    })
}

pub fn conditional(condition: Value, then_steps: Vec<Value>, else_steps: Vec<Value>) -> Value {
    json!({
        "type": "conditional",
        "condition": condition,
        "then_steps": then_steps,
        "else_steps": else_steps,
    })
}
