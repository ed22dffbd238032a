pub mod element_name;
pub mod identifier;
