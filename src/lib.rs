//! Loading, filtering and export of NYC restaurant inspection results.

pub mod data;

pub use data::error::{LoadError, QueryError};
