use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{item_list, opt_text, or_default, truthy};
use super::step_model::Step;

pub const DEFAULT_PAGE_CLASS: &str = "MyPage";
pub const DEFAULT_TEST_NAME: &str = "Unnamed Test";
pub const DEFAULT_FEATURE: &str = "Default Feature";
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// ============================================================================
// Generation request
// ============================================================================

/// Everything the recorder sends for one code-generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Scenario to emit a test for. `None` short-circuits generation.
    #[serde(default, deserialize_with = "or_default")]
    pub active_test_case: Option<TestCase>,

    /// Every scenario sharing the active page class; pooled into one page object
    #[serde(default, deserialize_with = "item_list")]
    pub all_test_cases_for_page: Vec<TestCase>,

    #[serde(default, deserialize_with = "or_default")]
    pub state_data: StateData,

    #[serde(default, deserialize_with = "or_default")]
    pub options: GenerationOptions,
}

/// One recorded scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "item_list")]
    pub recorded_steps: Vec<Step>,

    #[serde(default, deserialize_with = "opt_text")]
    pub page_class_name: Option<String>,
}

impl TestCase {
    /// Scenario title; an explicitly empty name stays empty.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_TEST_NAME)
    }

    /// Page-object class name, `MyPage` when absent or blank.
    pub fn page_class(&self) -> &str {
        self.page_class_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PAGE_CLASS)
    }
}

// ============================================================================
// Recorder state
// ============================================================================

/// The slice of recorder state that affects generated code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateData {
    /// Environment name -> ordered variable map
    #[serde(default, deserialize_with = "or_default")]
    pub environments: HashMap<String, Map<String, Value>>,

    #[serde(default, deserialize_with = "opt_text")]
    pub active_environment: Option<String>,

    /// Collection id -> collection metadata
    #[serde(default, deserialize_with = "or_default")]
    pub collections: HashMap<String, Collection>,

    #[serde(default, deserialize_with = "opt_text")]
    pub active_collection_id: Option<String>,
}

impl StateData {
    pub fn active_environment(&self) -> &str {
        self.active_environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Variables of the active environment, in recorded order.
    pub fn active_environment_vars(&self) -> Option<&Map<String, Value>> {
        self.environments
            .get(self.active_environment())
            .filter(|vars| !vars.is_empty())
    }

    /// Display name of the active collection, `Default Feature` on any miss.
    pub fn feature_name(&self) -> &str {
        self.active_collection_id
            .as_ref()
            .and_then(|id| self.collections.get(id))
            .and_then(|c| c.name.as_deref())
            .unwrap_or(DEFAULT_FEATURE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
}

// ============================================================================
// Generation flags
// ============================================================================

/// Which sections to emit. Every flag defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default, deserialize_with = "truthy")]
    pub generate_pom: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub generate_test: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub generate_base_page: bool,

    /// Render code server-side for steps recorded without any
    #[serde(default, deserialize_with = "truthy")]
    pub render_missing_code: bool,
}
