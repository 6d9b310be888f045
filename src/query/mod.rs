pub mod params;
pub mod predicate;
pub mod relevance;
pub mod text;

pub use params::{normalize, PriceInversionPolicy, RawSearchParams};
pub use predicate::{compile, CompiledQuery, FacetDimension, FilterClause, Predicate};
pub use text::{SubstringMatcher, TextMatcher};
