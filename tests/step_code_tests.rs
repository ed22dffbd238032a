use serde_json::json;

use scenario_codegen::codegen::step_code::{fill_missing_code, render_step_code};
use scenario_codegen::codegen::test_body::condition_head;

use crate::common::builders::{action, conditional, step};

mod common;

#[test]
fn click_renders_definition_and_call() {
    let rendered = render_step_code(&step(json!({
        "type": "click",
        "data": {"selectors": {"id": "login"}}
    })))
    .unwrap();

    assert_eq!(
        rendered.code.method_definition.as_deref(),
        Some("    @allure.step(\"click login\")\n    def click_login(self):\n        self.do_click_with_healing(self.login_locators)")
    );
    assert_eq!(rendered.code.method_call.as_deref(), Some("page.click_login()"));
    assert!(rendered.boolean_check.is_none());
}

#[test]
fn bound_input_takes_a_parameter() {
    let rendered = render_step_code(&step(json!({
        "type": "input",
        "data": {"selectors": {"id": "username"}, "value": "bob"},
        "variableName": "Username",
        "allureStep": "Enter 'bob' into username"
    })))
    .unwrap();

    assert_eq!(
        rendered.code.method_definition.as_deref(),
        Some("    @allure.step(\"Enter {username} into username\")\n    def input_username(self, username):\n        self.do_clear_and_send_keys_with_healing(self.username_locators, username)")
    );
    assert_eq!(rendered.code.method_call.as_deref(), Some("page.input_username(Username)"));
}

#[test]
fn unbound_input_uses_the_literal() {
    let rendered = render_step_code(&step(json!({
        "type": "input",
        "data": {"selectors": {"id": "q"}, "value": "rust"}
    })))
    .unwrap();
    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .ends_with("self.do_clear_and_send_keys_with_healing(self.q_locators, \"rust\")"));
}

#[test]
fn value_reference_wins_over_variable_name() {
    let rendered = render_step_code(&step(json!({
        "type": "input",
        "data": {"selectors": {"id": "password"}},
        "variableName": "pw",
        "variableForValue": "SECRET"
    })))
    .unwrap();
    assert_eq!(rendered.code.method_call.as_deref(), Some("page.input_password(SECRET)"));
    assert!(rendered.code.method_definition.unwrap().contains("def input_password(self, secret):"));
}

#[test]
fn get_text_assigns_its_variable() {
    let rendered = render_step_code(&step(json!({
        "type": "getText",
        "data": {"selectors": {"id": "heading"}},
        "variableName": "title"
    })))
    .unwrap();
    assert_eq!(
        rendered.code.method_call.as_deref(),
        Some("title = page.get_text_from_heading()")
    );
    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .contains("return self.get_text_with_healing(self.heading_locators)"));
}

#[test]
fn frame_exit_has_a_fixed_name() {
    let rendered = render_step_code(&step(json!({"type": "switch_to_default_content", "data": {}}))).unwrap();
    assert_eq!(rendered.code.method_call.as_deref(), Some("page.switch_to_default_content()"));
}

#[test]
fn waits_map_subtypes() {
    let rendered = render_step_code(&step(json!({
        "type": "wait",
        "subType": "waitClickable",
        "data": {"selectors": {"id": "save"}}
    })))
    .unwrap();
    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .contains("def waitClickable_save(self):\n        self.wait_for_element_to_be_clickable(self.save_locators)"));

    assert!(render_step_code(&step(json!({"type": "wait", "subType": "waitForever"}))).is_none());
}

#[test]
fn negated_assert_yields_boolean_check() {
    let rendered = render_step_code(&step(json!({
        "type": "assert",
        "subType": "assertIsDisabled",
        "data": {"selectors": {"id": "save"}}
    })))
    .unwrap();

    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .ends_with("assert not self.is_enabled_with_healing(self.save_locators), \"Element is enabled\""));
    let check = rendered.boolean_check.unwrap();
    assert_eq!(
        condition_head(&check),
        "if not page.is_enabled_with_healing(page.save_locators):"
    );
}

#[test]
fn value_asserts_compare_literals() {
    let rendered = render_step_code(&step(json!({
        "type": "assert",
        "subType": "assertTextEquals",
        "data": {"selectors": {"id": "msg"}},
        "expectedText": "Saved"
    })))
    .unwrap();
    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .ends_with("assert self.get_text_with_healing(self.msg_locators) == \"Saved\""));
    assert!(rendered.boolean_check.is_none());

    let rendered = render_step_code(&step(json!({
        "type": "assert",
        "subType": "assertAttribute",
        "data": {"selectors": {"id": "link"}},
        "expectedAttributeName": "href",
        "expectedAttributeValue": "/home"
    })))
    .unwrap();
    assert!(rendered
        .code
        .method_definition
        .unwrap()
        .ends_with("assert self.get_attribute_with_healing(self.link_locators, \"href\") == \"/home\""));
}

#[test]
fn unknown_kinds_render_nothing() {
    assert!(render_step_code(&step(json!({"type": "teleport"}))).is_none());
    assert!(render_step_code(&step(json!({"type": "assert", "subType": "assertMood"}))).is_none());
    assert!(render_step_code(&step(json!({"type": "conditional"}))).is_none());
}

#[test]
fn fill_keeps_existing_code_and_fills_branches() {
    let bare_condition = json!({
        "type": "assert",
        "subType": "assertVisible",
        "data": {"selectors": {"id": "banner"}}
    });
    let bare_click = json!({"type": "click", "data": {"selectors": {"id": "close"}}});
    let steps = vec![
        step(action("click", "login")),
        step(conditional(bare_condition, vec![bare_click], vec![])),
    ];

    let filled = fill_missing_code(&steps);
    assert_eq!(filled[0], steps[0]);

    let condition = filled[1].condition.as_deref().unwrap();
    let check = condition.boolean_check.as_ref().unwrap();
    assert_eq!(check.method_name, "is_visible_with_healing");
    assert_eq!(check.locator_var_name, "self.banner_locators");
    assert_eq!(filled[1].then_steps[0].method_call(), Some("page.click_close()"));

    // The input tree is left untouched.
    assert!(steps[1].then_steps[0].code.is_none());
}
