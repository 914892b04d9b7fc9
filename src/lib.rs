use std::result;

pub mod error;
pub mod table;

pub type Result<T> = result::Result<T, error::TableError>;
