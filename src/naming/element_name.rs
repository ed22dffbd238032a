use crate::model::step_model::ElementData;

/// Name used when there is nothing to describe the element.
pub const FALLBACK_ELEMENT_NAME: &str = "element";

/// Name used for steps that act on the page rather than an element.
pub const PAGE_CONTEXT_NAME: &str = "page_context";

pub const MAX_ELEMENT_NAME_LEN: usize = 40;

// ============================================================================
// Element name derivation
// ============================================================================

/// Derive a stable, readable identifier for the element a step targets.
///
/// Source precedence: `data-testid` attribute, selector `id`, selector
/// `name`, selector `placeholder`, element text, element tag. The chosen
/// value is reduced to `[a-z0-9_]`, at most 40 characters.
///
/// Absent data, or a map with no keys at all, yields `element`. Data whose
/// `selectors` is missing, `null` or empty (frame switches, page-level
/// waits) yields `page_context`.
pub fn derive_element_name(data: Option<&ElementData>) -> String {
    let data = match data {
        Some(d) if !d.is_empty() => d,
        _ => return FALLBACK_ELEMENT_NAME.to_string(),
    };

    let Some(selectors) = data.selectors.as_ref() else {
        return PAGE_CONTEXT_NAME.to_string();
    };

    let candidates = [
        data.test_id(),
        selectors.id.clone(),
        selectors.name.clone(),
        selectors.placeholder.clone(),
        data.text.clone(),
        data.tag.clone(),
    ];

    let source = candidates
        .into_iter()
        .flatten()
        .find(|c| !c.is_empty())
        .unwrap_or_else(|| FALLBACK_ELEMENT_NAME.to_string());

    to_element_identifier(&source)
}

/// Reduce free text to a snake_case identifier.
///
/// Drops everything but ASCII alphanumerics and whitespace, turns each
/// whitespace run into one underscore, lowercases and truncates.
pub fn to_element_identifier(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_space = false;

    for c in source.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_space = false;
        }
    }

    out.truncate(MAX_ELEMENT_NAME_LEN);

    if out.is_empty() {
        FALLBACK_ELEMENT_NAME.to_string()
    } else {
        out
    }
}
