pub mod loader;

pub use loader::{load_catalog, Catalog, CatalogError};
