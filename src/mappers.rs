pub mod field_value_mapper;
