/// Support library every generated page object inherits from.
///
/// Emitted verbatim when `generateBasePage` is set, and written to
/// `pages/base_page.py` by the project writer.
pub const BASE_PAGE_SOURCE: &str = include_str!("../../templates/base_page.py");

