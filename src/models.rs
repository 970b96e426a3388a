pub mod field;
pub mod profile;
