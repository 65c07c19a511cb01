//! Data types used by the crate.
//!
//! Every column is backed by a [`TypedArray`] whose element type is fixed by
//! one of the marker types below. [`AnyValue`] is the dynamically typed view
//! used for row access, sorting and aggregation results.
use std::cmp::Ordering;
use std::fmt;

use crate::array::TypedArray;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int64,
    Float64,
    Utf8,
}

impl DataType {
    pub fn to_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "bool",
            DataType::Int64 => "i64",
            DataType::Float64 => "f64",
            DataType::Utf8 => "str",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

pub struct BooleanType {}
pub struct Int64Type {}
pub struct Float64Type {}
pub struct Utf8Type {}

pub trait AvocetDataType: Send + Sync {
    type Native: Clone + PartialEq + Send + Sync;

    fn get_dtype() -> DataType;
}

impl AvocetDataType for BooleanType {
    type Native = bool;

    fn get_dtype() -> DataType {
        DataType::Boolean
    }
}

impl AvocetDataType for Int64Type {
    type Native = i64;

    fn get_dtype() -> DataType {
        DataType::Int64
    }
}

impl AvocetDataType for Float64Type {
    type Native = f64;

    fn get_dtype() -> DataType {
        DataType::Float64
    }
}

impl AvocetDataType for Utf8Type {
    type Native = String;

    fn get_dtype() -> DataType {
        DataType::Utf8
    }
}

pub trait AvocetNumericType: AvocetDataType {}

impl AvocetNumericType for Int64Type {}
impl AvocetNumericType for Float64Type {}

pub type BooleanArray = TypedArray<BooleanType>;
pub type Int64Array = TypedArray<Int64Type>;
pub type Float64Array = TypedArray<Float64Type>;
pub type Utf8Array = TypedArray<Utf8Type>;

/// A column name paired with the column's data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    dtype: DataType,
}

impl Field {
    pub fn new(name: &str, dtype: DataType) -> Self {
        Field {
            name: name.to_string(),
            dtype,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

/// An ordered collection of [`Field`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Schema { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A dynamically typed scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Utf8(String),
}

impl AnyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }

    pub fn dtype(&self) -> Option<DataType> {
        match self {
            AnyValue::Null => None,
            AnyValue::Boolean(_) => Some(DataType::Boolean),
            AnyValue::Int64(_) => Some(DataType::Int64),
            AnyValue::Float64(_) => Some(DataType::Float64),
            AnyValue::Utf8(_) => Some(DataType::Utf8),
        }
    }

    /// Total ordering used by sorts and comparisons. Null orders before any
    /// value, mixed Int64/Float64 compare numerically, NaN orders after every
    /// other float.
    pub(crate) fn cmp_values(&self, other: &AnyValue) -> Ordering {
        use AnyValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Int64(a), Int64(b)) => a.cmp(b),
            (Float64(a), Float64(b)) => a.total_cmp(b),
            (Int64(a), Float64(b)) => (*a as f64).total_cmp(b),
            (Float64(a), Int64(b)) => a.total_cmp(&(*b as f64)),
            (Utf8(a), Utf8(b)) => a.cmp(b),
            // columns are homogeneous; a cross-dtype comparison can only come
            // from user input and is settled by dtype rank
            (a, b) => dtype_rank(a).cmp(&dtype_rank(b)),
        }
    }
}

fn dtype_rank(v: &AnyValue) -> u8 {
    match v {
        AnyValue::Null => 0,
        AnyValue::Boolean(_) => 1,
        AnyValue::Int64(_) => 2,
        AnyValue::Float64(_) => 3,
        AnyValue::Utf8(_) => 4,
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyValue::Null => f.write_str("null"),
            AnyValue::Boolean(v) => write!(f, "{}", v),
            AnyValue::Int64(v) => write!(f, "{}", v),
            AnyValue::Float64(v) => write!(f, "{}", v),
            AnyValue::Utf8(v) => f.write_str(v),
        }
    }
}
