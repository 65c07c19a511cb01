//! Geographic feature collections and the file-backed feature-class store.
mod collection;
mod geometry;
mod store;
mod where_clause;

pub use collection::FeatureCollection;
pub use geometry::{Coord, Geometry};
pub use store::GeoDatabase;
pub use where_clause::Predicate;
