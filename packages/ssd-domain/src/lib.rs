pub mod annotation;
pub mod lexical;
pub mod normalize;
pub mod product;
pub mod query;
pub mod relevance;

pub use product::{Controller, Flash, Product, ProductSummary};
pub use query::SearchQuery;
