//! Services: request-level operations on top of the repositories.

mod beer;
mod catalog;
mod validation;
pub use beer::BeerService;
pub use catalog::{BreweryService, CategoryService, StyleService};
pub use validation::BeerValidator;
