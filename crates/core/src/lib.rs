//! Domain types shared by the catalog store and the HTTP layer.

pub mod request;
pub mod types;

pub use request::{CreateProductRequest, ValidationError};
pub use types::{NewProduct, Product};
