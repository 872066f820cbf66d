//! Catalog entities as stored and as exchanged over HTTP (camelCase JSON).

mod beer;
mod brewery;
mod category;
mod filter;
mod style;

pub use beer::{Beer, BeerDraft, BeerRecord, RelationIds, RelationRef};
pub use brewery::Brewery;
pub use category::Category;
pub use filter::{BeerFilter, BreweryFilter, CategoryFilter, StyleFilter};
pub(crate) use filter::contains_ignore_case;
pub use style::Style;
