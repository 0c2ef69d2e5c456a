//! Ingredient parsing and the three classification engines
//!
//! The engines share an ingredient list but have no data dependency on each
//! other; the pipeline runs them concurrently over read-only catalogs.

pub mod brand;
pub mod category;
pub mod ingredients;
pub mod safety;
pub mod types;

pub use brand::BrandMatcher;
pub use category::CategoryDetector;
pub use ingredients::IngredientParser;
pub use safety::SafetyClassifier;
