use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::config::OptionOverrides;
use crate::codegen::composer::{GeneratedSections, generate_full_code, generate_sections};
use crate::error::CodegenError;
use crate::model::request_model::GenerationRequest;
use crate::model::step_model::ElementData;
use crate::naming::element_name::derive_element_name;
use crate::naming::identifier::sanitize_test_function_name;

// ============================================================================
// generate subcommand
// ============================================================================

/// Generate code for a request file, printing it or writing it out.
///
/// `overrides` are already merged (CLI over config) and are applied on top
/// of the request's own options.
pub fn cmd_generate(
    request_path: &str,
    output: Option<&str>,
    output_dir: Option<&str>,
    overrides: OptionOverrides,
) -> anyhow::Result<()> {
    let mut request = load_request(request_path)?;
    overrides.apply(&mut request.options);
    info!(request = request_path, options = ?request.options, "generating code");

    if let Some(dir) = output_dir {
        let Some(sections) = generate_sections(&request) else {
            anyhow::bail!("request has no active test case");
        };
        let written = write_project(&sections, Path::new(dir))?;
        println!("Wrote {} files to {}/", written.len(), dir);
        return Ok(());
    }

    let code = generate_full_code(&request);
    match output {
        Some(path) => {
            std::fs::write(path, &code).map_err(|e| CodegenError::io(path, e))?;
            info!(path, bytes = code.len(), "wrote generated code");
        }
        None => println!("{}", code),
    }

    Ok(())
}

/// Load a generation request from JSON, or YAML for `.yaml` / `.yml` files.
pub fn load_request(path: &str) -> Result<GenerationRequest, CodegenError> {
    let content = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
    parse_request(&content, is_yaml(Path::new(path)), path)
}

/// Parse request text. `context` names the source in error messages.
pub fn parse_request(content: &str, yaml: bool, context: &str) -> Result<GenerationRequest, CodegenError> {
    if yaml {
        serde_yaml::from_str(content).map_err(|source| CodegenError::YamlParse {
            context: context.to_string(),
            source,
        })
    } else {
        serde_json::from_str(content).map_err(|source| CodegenError::JsonParse {
            context: context.to_string(),
            source,
        })
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "yaml" || e == "yml")
}

// ============================================================================
// Project layout output
// ============================================================================

/// Write the generated sections as a pytest project:
///
/// ```text
/// <dir>/pages/<page_module>.py   page object
/// <dir>/pages/base_page.py       support library
/// <dir>/tests/<test_function>.py test, importing the page object
/// ```
///
/// Returns the written paths in that order, skipping sections not generated.
pub fn write_project(sections: &GeneratedSections, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
    let page_module = page_module_name(&sections.page_class);
    let mut written = Vec::new();

    if let Some(page_object) = &sections.page_object {
        let path = dir.join("pages").join(format!("{}.py", page_module));
        write_file(&path, &format!("{}\n", page_object))?;
        written.push(path);
    }

    if let Some(base_page) = sections.base_page {
        let path = dir.join("pages").join("base_page.py");
        write_file(&path, base_page)?;
        written.push(path);
    }

    if let Some(test) = &sections.test {
        let path = dir
            .join("tests")
            .join(format!("{}.py", sanitize_filename(&sections.test_function)));
        let content = format!(
            "import allure\n\nfrom pages.{} import {}\n\n\n{}\n",
            page_module, sections.page_class, test
        );
        write_file(&path, &content)?;
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| CodegenError::io(path, e))?;
    info!(path = %path.display(), "wrote file");
    Ok(())
}

// ============================================================================
// name subcommand
// ============================================================================

/// Derive the element name for JSON element data, or the test function
/// name for a scenario title.
pub fn cmd_name(element: Option<&str>, scenario: Option<&str>) -> anyhow::Result<String> {
    match (element, scenario) {
        (Some(json), _) => {
            let data: Option<ElementData> =
                serde_json::from_str(json).map_err(|source| CodegenError::JsonParse {
                    context: "--element".to_string(),
                    source,
                })?;
            Ok(derive_element_name(data.as_ref()))
        }
        (None, Some(name)) => Ok(sanitize_test_function_name(name)),
        (None, None) => anyhow::bail!("either --element or --scenario is required"),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Python module name for a page class: `LoginPage` -> `login_page`.
pub fn page_module_name(page_class: &str) -> String {
    let mut out = String::with_capacity(page_class.len() + 4);
    let mut prev_lower = false;
    for c in page_class.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    sanitize_filename(&out)
}

/// Sanitize a name into a safe filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_lowercase()
}
