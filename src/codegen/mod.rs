pub mod base_page;
pub mod composer;
pub mod page_object;
pub mod source_builder;
pub mod step_code;
pub mod test_body;
pub mod walker;
