use std::borrow::Cow;

use tracing::debug;

use crate::codegen::base_page::BASE_PAGE_SOURCE;
use crate::codegen::page_object::assemble_page_object;
use crate::codegen::step_code::fill_missing_code;
use crate::codegen::test_body::assemble_test_body;
use crate::codegen::walker::PomCollector;
use crate::model::request_model::{GenerationRequest, TestCase};
use crate::naming::identifier::sanitize_test_function_name;

/// Returned instead of code when the request names no active scenario.
pub const NO_ACTIVE_TEST_CASE: &str = "# Error: no active test case to generate code for.";

const SECTION_SEPARATOR: &str = "\n\n";

// ============================================================================
// Generated sections
// ============================================================================

/// The separately generated parts of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSections {
    /// Page-object class name used by both sections
    pub page_class: String,

    /// pytest function name of the active scenario
    pub test_function: String,

    pub page_object: Option<String>,
    pub test: Option<String>,
    pub base_page: Option<&'static str>,
}

impl GeneratedSections {
    /// Requested sections in fixed order, separated by a blank line.
    pub fn compose(&self) -> String {
        let parts: Vec<&str> = [self.page_object.as_deref(), self.test.as_deref(), self.base_page]
            .into_iter()
            .flatten()
            .collect();
        parts.join(SECTION_SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.page_object.is_none() && self.test.is_none() && self.base_page.is_none()
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Generate the full response text for one request.
///
/// Never fails: missing optional data falls back to defaults, and a missing
/// active scenario yields a single explanatory comment line.
pub fn generate_full_code(request: &GenerationRequest) -> String {
    match generate_sections(request) {
        Some(sections) => sections.compose(),
        None => NO_ACTIVE_TEST_CASE.to_string(),
    }
}

/// Generate each requested section separately. `None` when there is no
/// active scenario.
pub fn generate_sections(request: &GenerationRequest) -> Option<GeneratedSections> {
    let active = request.active_test_case.as_ref()?;
    let options = request.options;

    let active = prepare_case(active, options.render_missing_code);

    let mut collector = PomCollector::new();
    if options.generate_pom {
        let page_cases: Vec<Cow<'_, TestCase>> = request
            .all_test_cases_for_page
            .iter()
            .map(|c| prepare_case(c, options.render_missing_code))
            .collect();
        collector.walk_cases(page_cases.iter().map(|c| &**c));
    } else {
        collector.walk(&active.recorded_steps);
    }
    debug!(
        locators = collector.locators().len(),
        methods = collector.methods().len(),
        "walked step trees"
    );

    let page_class = active.page_class().to_string();

    let page_object = options
        .generate_pom
        .then(|| assemble_page_object(&page_class, &collector));

    let test = (options.generate_test && !active.recorded_steps.is_empty())
        .then(|| assemble_test_body(&active, &request.state_data));

    let base_page = options.generate_base_page.then_some(BASE_PAGE_SOURCE);

    Some(GeneratedSections {
        test_function: sanitize_test_function_name(active.display_name()),
        page_class,
        page_object,
        test,
        base_page,
    })
}

/// Borrow the scenario as-is, or copy it with missing step code rendered.
fn prepare_case(case: &TestCase, render_missing_code: bool) -> Cow<'_, TestCase> {
    if !render_missing_code {
        return Cow::Borrowed(case);
    }
    Cow::Owned(TestCase {
        name: case.name.clone(),
        recorded_steps: fill_missing_code(&case.recorded_steps),
        page_class_name: case.page_class_name.clone(),
    })
}
