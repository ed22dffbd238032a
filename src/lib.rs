//! Code generation for recorded browser scenarios.
//!
//! A recorder captures a tree of steps (clicks, typing, assertions,
//! conditionals). This crate turns it into a pytest/selenium page object,
//! a test function, and the support library both rely on.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod model;
pub mod naming;

pub use codegen::composer::{GeneratedSections, NO_ACTIVE_TEST_CASE, generate_full_code, generate_sections};
pub use error::CodegenError;
pub use model::request_model::{GenerationOptions, GenerationRequest, StateData, TestCase};
pub use model::step_model::Step;
