use serde_json::json;

use scenario_codegen::codegen::page_object::assemble_page_object;
use scenario_codegen::codegen::walker::PomCollector;

use crate::common::builders::{action, definition, step};

mod common;

#[test]
fn page_object_layout() {
    let mut collector = PomCollector::new();
    collector.walk(&[step(action("click", "login")), step(action("input", "username"))]);

    let code = assemble_page_object("LoginPage", &collector);
    let expected = format!(
        "import allure\n\
         from selenium.webdriver.common.by import By\n\
         \n\
         from pages.base_page import BasePage\n\
         \n\
         class LoginPage(BasePage):\n    \
         login_locators = [\n        \
         (By.ID, \"login\"),\n        \
         (By.NAME, \"login\")\n    \
         ]\n\
         \n    \
         username_locators = [\n        \
         (By.ID, \"username\"),\n        \
         (By.NAME, \"username\")\n    \
         ]\n\
         \n\
         {}\n\
         \n\
         {}",
        definition("click", "login"),
        definition("input", "username")
    );
    assert_eq!(code, expected);
}

#[test]
fn class_without_methods_gets_pass() {
    let mut collector = PomCollector::new();
    collector.walk(&[step(json!({
        "type": "click",
        "data": {"selectors": {"id": "login"}},
        "locators": ["(By.ID, \"login\")"]
    }))]);

    let code = assemble_page_object("MyPage", &collector);
    assert!(code.contains("class MyPage(BasePage):\n"));
    assert!(code.ends_with("    ]\n\n    pass"));
}

#[test]
fn empty_collector_still_yields_valid_class() {
    let code = assemble_page_object("EmptyPage", &PomCollector::new());
    assert!(code.ends_with("class EmptyPage(BasePage):\n\n\n    pass"));
}

#[test]
fn duplicate_methods_are_emitted_once() {
    let mut collector = PomCollector::new();
    collector.walk(&[
        step(action("click", "login")),
        step(action("click", "login")),
    ]);

    let code = assemble_page_object("LoginPage", &collector);
    assert_eq!(code.matches("def click_login(self):").count(), 1);
    assert_eq!(code.matches("login_locators = [").count(), 1);
}
