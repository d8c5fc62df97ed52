//! Natural-language product search over a static JSON catalog.

pub mod catalog;
pub mod criteria;
pub mod display;
pub mod prompt;
pub mod search;

pub use catalog::{Catalog, DEFAULT_CATALOG_PATH, Product};
pub use criteria::FilterCriteria;
pub use search::ProductSearch;
