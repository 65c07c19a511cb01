//! # Avocet: *<small>DataFrames with a feature-class store</small>*
//!
//! Avocet is a small eager DataFrame library paired with a file-backed
//! geodata store. The tabular side gives you the usual verbs (filter, sort,
//! select, aggregate, group by) over typed, nullable columns; the `geo` side
//! reads and writes feature classes, attribute tables plus a geometry per
//! row, keyed by filesystem paths.
//!
//! ## Data structures
//! The base data structures are `DataFrame`, `Series`, and `TypedArray<T>`.
//!
//! * A [`DataFrame`](crate::frame::DataFrame) is an abstraction over
//!   `Vec<Series>` where every column has one length and a unique name.
//! * A [`Series`](crate::series::Series) is the type agnostic view of a
//!   column. Operations that need the concrete element type downcast to the
//!   typed array with `.i64()`, `.f64()`, `.utf8()` or `.bool()`.
//! * A [`TypedArray<T>`](crate::array::TypedArray) is a named vector of
//!   optional values; missing data is first-class everywhere.
//!
//! ## Quickstart
//!
//! ```
//! use avocet::prelude::*;
//!
//! # fn run() -> Result<()> {
//! let df = df! {
//!     "offense" => ["Burglary", "Theft", "Theft"],
//!     "count" => [12, 40, 31]
//! }?;
//!
//! // filter on a comparison, then summarize per group
//! let mask = df.column("count")?.i64()?.gt(20);
//! let per_offense = df
//!     .filter(&mask)?
//!     .group_by(&["offense"])?
//!     .select("count")
//!     .sum()?;
//! assert_eq!(per_offense.column("count_sum")?.get(0), AnyValue::Int64(71));
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! ## Feature classes
//!
//! ```no_run
//! use avocet::prelude::*;
//!
//! # fn run() -> Result<()> {
//! let gdb = GeoDatabase::open("Portland_crime.gdb")?;
//! let df = gdb.select(
//!     "crimes",
//!     Some(&["offense", "neighborhood"]),
//!     Some("offense = 'Burglary' AND count > 5"),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Config with ENV vars
//!
//! * `AVOCET_FMT_MAX_ROWS` -> maximum number of rows shown when formatting
//!   tables.
//! * `AVOCET_VERBOSE` -> enable verbose behavior.
pub mod array;
pub mod config;
pub mod datatypes;
pub mod error;
mod fmt;
pub mod frame;
pub mod geo;
pub mod prelude;
pub mod series;
pub mod testing;
