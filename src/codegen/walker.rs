use std::collections::HashSet;

use tracing::debug;

use crate::codegen::source_builder::SourceBuilder;
use crate::model::request_model::TestCase;
use crate::model::step_model::Step;
use crate::naming::element_name::derive_element_name;

// ============================================================================
// Locator declarations
// ============================================================================

/// Fallback-ordered locator list for one named element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorBlock {
    pub element_name: String,
    pub expressions: Vec<String>,
}

impl LocatorBlock {
    /// Attribute name on the page object: `<element>_locators`.
    pub fn var_name(&self) -> String {
        format!("{}_locators", self.element_name)
    }

    /// Emit the declaration as a class attribute (one level in).
    pub fn emit(&self, b: &mut SourceBuilder) {
        b.line(format!("{} = [", self.var_name()));
        b.indented(|b| {
            let last = self.expressions.len().saturating_sub(1);
            for (i, expr) in self.expressions.iter().enumerate() {
                if i < last {
                    b.line(format!("{},", expr));
                } else {
                    b.line(expr);
                }
            }
        });
        b.line("]");
    }
}

// ============================================================================
// Step-tree walker
// ============================================================================

/// Accumulates locator blocks and method definitions over one or more step
/// trees. Locators are unique by element name; methods are kept raw, in
/// visiting order, and deduplicated on read.
#[derive(Debug, Clone, Default)]
pub struct PomCollector {
    locators: Vec<LocatorBlock>,
    seen_names: HashSet<String>,
    methods: Vec<String>,
}

impl PomCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit an ordered step sequence.
    ///
    /// A conditional contributes its condition first, then the `then`
    /// branch, then the `else` branch.
    pub fn walk(&mut self, steps: &[Step]) {
        for step in steps {
            if step.is_conditional() {
                if let Some(condition) = step.condition.as_deref() {
                    self.walk(std::slice::from_ref(condition));
                }
                self.walk(&step.then_steps);
                self.walk(&step.else_steps);
            } else {
                self.visit(step);
            }
        }
    }

    /// Walk every scenario's recorded steps, in order.
    pub fn walk_cases<'a, I>(&mut self, cases: I)
    where
        I: IntoIterator<Item = &'a TestCase>,
    {
        for case in cases {
            self.walk(&case.recorded_steps);
        }
    }

    fn visit(&mut self, step: &Step) {
        let element_name = derive_element_name(step.data.as_ref());

        if !step.locators.is_empty() && !self.seen_names.contains(&element_name) {
            debug!(element = %element_name, count = step.locators.len(), "collected locator block");
            self.seen_names.insert(element_name.clone());
            self.locators.push(LocatorBlock {
                element_name,
                expressions: step.locators.clone(),
            });
        }

        if let Some(definition) = step.method_definition() {
            self.methods.push(definition.to_string());
        }
    }

    pub fn locators(&self) -> &[LocatorBlock] {
        &self.locators
    }

    /// Every collected definition, duplicates included.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Definitions unique by exact text, first occurrence wins.
    pub fn unique_methods(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.methods
            .iter()
            .map(String::as_str)
            .filter(|m| seen.insert(*m))
            .collect()
    }
}
