use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvocetError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("duplicate column name: {0}")]
    Duplicate(String),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(Cow<'static, str>),
    #[error("data types don't match: {0}")]
    DataTypeMismatch(Cow<'static, str>),
    #[error("no data: {0}")]
    NoData(Cow<'static, str>),
    #[error("out of bounds: {0}")]
    OutOfBounds(Cow<'static, str>),
    #[error("compute error: {0}")]
    ComputeError(Cow<'static, str>),
    #[error("invalid geodatabase path: {0}")]
    InvalidPath(String),
    #[error("feature class not found: {0}")]
    FeatureClassNotFound(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(Cow<'static, str>),
    #[error("could not parse where clause: {0}")]
    WhereClause(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AvocetError>;
