pub mod lenient;
pub mod request_model;
pub mod step_model;
