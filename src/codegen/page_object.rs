use tracing::debug;

use crate::codegen::source_builder::SourceBuilder;
use crate::codegen::walker::PomCollector;

/// Import header of every page-object unit.
const POM_IMPORTS: [&str; 4] = [
    "import allure",
    "from selenium.webdriver.common.by import By",
    "",
    "from pages.base_page import BasePage",
];

/// Base class provided by the static support library.
pub const BASE_PAGE_CLASS: &str = "BasePage";

/// Assemble one page-object class from pooled locators and methods.
///
/// ```text
/// import allure
/// from selenium.webdriver.common.by import By
///
/// from pages.base_page import BasePage
///
/// class LoginPage(BasePage):
///     login_locators = [
///         (By.ID, "login")
///     ]
///
///     @allure.step("Click login")
///     def click_login(self):
///         self.do_click_with_healing(self.login_locators)
/// ```
///
/// A class with no methods gets a `pass` body.
pub fn assemble_page_object(page_class: &str, collected: &PomCollector) -> String {
    let methods = collected.unique_methods();
    debug!(
        page_class,
        locators = collected.locators().len(),
        methods = methods.len(),
        "assembling page object"
    );

    let mut b = SourceBuilder::new();
    for line in POM_IMPORTS {
        b.line(line);
    }
    b.blank();
    b.line(format!("class {}({}):", page_class, BASE_PAGE_CLASS));

    b.indented(|b| {
        if collected.locators().is_empty() {
            b.blank();
        } else {
            b.separated(collected.locators(), |b, block| block.emit(b));
        }
        b.blank();

        if methods.is_empty() {
            b.line("pass");
        } else {
            // Definitions arrive already indented for a class body.
            b.separated(methods, |b, m| {
                b.raw(m);
            });
        }
    });

    b.finish()
}
