pub mod categorizer;
pub mod field_model;
pub mod sensitivity;
