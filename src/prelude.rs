//! Everything you need to get going.
pub use crate::array::aggregate::Agg;
pub use crate::array::comparison::CmpOps;
pub use crate::array::TypedArray;
pub use crate::datatypes::{
    AnyValue, BooleanArray, DataType, Field, Float64Array, Int64Array, Schema, Utf8Array,
};
pub use crate::df;
pub use crate::error::{AvocetError, Result};
pub use crate::frame::group_by::GroupBy;
pub use crate::frame::select::Selection;
pub use crate::frame::ser::csv::{CsvReader, CsvWriter};
pub use crate::frame::ser::{SerReader, SerWriter};
pub use crate::frame::DataFrame;
pub use crate::geo::{Coord, FeatureCollection, GeoDatabase, Geometry, Predicate};
pub use crate::series::aggregate::{AggOp, NullStrategy};
pub use crate::series::comparison::CompareOp;
pub use crate::series::{IntoSeries, NamedFrom, Series, SortOptions};
