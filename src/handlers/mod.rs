//! HTTP handlers for the catalog resources.

pub mod beer;
pub mod brewery;
pub mod category;
pub mod style;
