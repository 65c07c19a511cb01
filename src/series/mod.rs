//! Type agnostic columnar data representation.
//!
//! A [`Series`] wraps one of the typed arrays and gives the `DataFrame` a
//! uniform surface. Operations that need the concrete element type go through
//! the downcast accessors (`bool`, `i64`, `f64`, `utf8`).
use std::cmp::Ordering;

use crate::datatypes::{
    AnyValue, BooleanArray, DataType, Field, Float64Array, Int64Array, Utf8Array,
};
use crate::error::{AvocetError, Result};

pub mod aggregate;
pub mod comparison;
mod ntile;

#[derive(Clone)]
pub enum Series {
    Boolean(BooleanArray),
    Int64(Int64Array),
    Float64(Float64Array),
    Utf8(Utf8Array),
}

macro_rules! apply_method_all_series {
    ($self:expr, $method:ident, $($args:expr),*) => {
        match $self {
            Series::Boolean(a) => a.$method($($args),*),
            Series::Int64(a) => a.$method($($args),*),
            Series::Float64(a) => a.$method($($args),*),
            Series::Utf8(a) => a.$method($($args),*),
        }
    };
}

macro_rules! apply_method_and_return {
    ($self:expr, $method:ident, [$($args:expr),*], $($opt_question_mark:tt)*) => {
        match $self {
            Series::Boolean(a) => Series::Boolean(a.$method($($args),*)$($opt_question_mark)*),
            Series::Int64(a) => Series::Int64(a.$method($($args),*)$($opt_question_mark)*),
            Series::Float64(a) => Series::Float64(a.$method($($args),*)$($opt_question_mark)*),
            Series::Utf8(a) => Series::Utf8(a.$method($($args),*)$($opt_question_mark)*),
        }
    };
}

/// Options for sorting a single Series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    pub descending: bool,
    pub nulls_last: bool,
}

impl Series {
    pub fn name(&self) -> &str {
        apply_method_all_series!(self, name,)
    }

    pub fn rename(&mut self, name: &str) {
        apply_method_all_series!(self, rename, name)
    }

    pub fn len(&self) -> usize {
        apply_method_all_series!(self, len,)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        apply_method_all_series!(self, dtype,)
    }

    pub fn field(&self) -> &Field {
        apply_method_all_series!(self, field,)
    }

    /// Get a single row. Out of bounds resolves to null.
    pub fn get(&self, index: usize) -> AnyValue {
        match self {
            Series::Boolean(a) => a.get(index).map(|v| AnyValue::Boolean(*v)),
            Series::Int64(a) => a.get(index).map(|v| AnyValue::Int64(*v)),
            Series::Float64(a) => a.get(index).map(|v| AnyValue::Float64(*v)),
            Series::Utf8(a) => a.get(index).map(|v| AnyValue::Utf8(v.clone())),
        }
        .unwrap_or(AnyValue::Null)
    }

    pub fn null_count(&self) -> usize {
        apply_method_all_series!(self, null_count,)
    }

    pub fn is_null(&self) -> BooleanArray {
        apply_method_all_series!(self, is_null,)
    }

    pub fn is_not_null(&self) -> BooleanArray {
        apply_method_all_series!(self, is_not_null,)
    }

    /// Keep the rows where `mask` is true.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Series> {
        Ok(apply_method_and_return!(self, filter, [mask], ?))
    }

    /// Take rows by index, bound checked.
    pub fn take(&self, indices: &[usize]) -> Result<Series> {
        Ok(apply_method_and_return!(self, take, [indices], ?))
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Series {
        apply_method_and_return!(self, gather, [indices],)
    }

    pub fn slice(&self, offset: usize, length: usize) -> Result<Series> {
        Ok(apply_method_and_return!(self, slice, [offset, length], ?))
    }

    pub fn head(&self, length: Option<usize>) -> Series {
        apply_method_and_return!(self, head, [length],)
    }

    pub fn tail(&self, length: Option<usize>) -> Series {
        apply_method_and_return!(self, tail, [length],)
    }

    pub fn reverse(&self) -> Series {
        apply_method_and_return!(self, reverse, [],)
    }

    /// Append the rows of `other`; both sides must share one dtype.
    pub fn append(&mut self, other: &Series) -> Result<()> {
        match (self, other) {
            (Series::Boolean(a), Series::Boolean(b)) => a.append(b),
            (Series::Int64(a), Series::Int64(b)) => a.append(b),
            (Series::Float64(a), Series::Float64(b)) => a.append(b),
            (Series::Utf8(a), Series::Utf8(b)) => a.append(b),
            (lhs, rhs) => {
                return Err(AvocetError::DataTypeMismatch(
                    format!(
                        "cannot append {} values to a {} column",
                        rhs.dtype(),
                        lhs.dtype()
                    )
                    .into(),
                ))
            }
        }
        Ok(())
    }

    /// Indices that would sort this Series.
    pub fn arg_sort(&self, options: SortOptions) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&a, &b| {
            let av = self.get(a);
            let bv = self.get(b);
            compare_with_options(&av, &bv, options)
        });
        indices
    }

    /// Return a sorted clone of this Series.
    pub fn sort(&self, options: SortOptions) -> Series {
        self.gather(&self.arg_sort(options))
    }

    /// Downcast to the boolean array.
    pub fn bool(&self) -> Result<&BooleanArray> {
        match self {
            Series::Boolean(a) => Ok(a),
            _ => Err(self.downcast_error(DataType::Boolean)),
        }
    }

    /// Downcast to the i64 array.
    pub fn i64(&self) -> Result<&Int64Array> {
        match self {
            Series::Int64(a) => Ok(a),
            _ => Err(self.downcast_error(DataType::Int64)),
        }
    }

    /// Downcast to the f64 array.
    pub fn f64(&self) -> Result<&Float64Array> {
        match self {
            Series::Float64(a) => Ok(a),
            _ => Err(self.downcast_error(DataType::Float64)),
        }
    }

    /// Downcast to the string array.
    pub fn utf8(&self) -> Result<&Utf8Array> {
        match self {
            Series::Utf8(a) => Ok(a),
            _ => Err(self.downcast_error(DataType::Utf8)),
        }
    }

    fn downcast_error(&self, requested: DataType) -> AvocetError {
        AvocetError::DataTypeMismatch(
            format!(
                "cannot downcast {} column {} to {}",
                self.dtype(),
                self.name(),
                requested
            )
            .into(),
        )
    }

    /// Build a Series of the given dtype from dynamically typed values.
    /// Int64 values are accepted into a Float64 column.
    pub fn from_any_values(name: &str, dtype: DataType, values: &[AnyValue]) -> Result<Series> {
        let mismatch = |v: &AnyValue| {
            AvocetError::DataTypeMismatch(
                format!("value {:?} does not fit in a {} column {}", v, dtype, name).into(),
            )
        };
        let series = match dtype {
            DataType::Boolean => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    out.push(match v {
                        AnyValue::Null => None,
                        AnyValue::Boolean(b) => Some(*b),
                        other => return Err(mismatch(other)),
                    });
                }
                Series::Boolean(BooleanArray::from_vec(name, out))
            }
            DataType::Int64 => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    out.push(match v {
                        AnyValue::Null => None,
                        AnyValue::Int64(i) => Some(*i),
                        other => return Err(mismatch(other)),
                    });
                }
                Series::Int64(Int64Array::from_vec(name, out))
            }
            DataType::Float64 => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    out.push(match v {
                        AnyValue::Null => None,
                        AnyValue::Float64(f) => Some(*f),
                        AnyValue::Int64(i) => Some(*i as f64),
                        other => return Err(mismatch(other)),
                    });
                }
                Series::Float64(Float64Array::from_vec(name, out))
            }
            DataType::Utf8 => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    out.push(match v {
                        AnyValue::Null => None,
                        AnyValue::Utf8(s) => Some(s.clone()),
                        other => return Err(mismatch(other)),
                    });
                }
                Series::Utf8(Utf8Array::from_vec(name, out))
            }
        };
        Ok(series)
    }
}

pub(crate) fn compare_with_options(av: &AnyValue, bv: &AnyValue, options: SortOptions) -> Ordering {
    let base = match (av.is_null(), bv.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => av.cmp_values(bv),
    };
    let mut ord = if options.descending {
        base.reverse()
    } else {
        base
    };
    if options.nulls_last {
        ord = match (av.is_null(), bv.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => ord,
        };
    }
    ord
}

pub trait IntoSeries {
    fn into_series(self) -> Series
    where
        Self: Sized;
}

impl IntoSeries for Series {
    fn into_series(self) -> Series {
        self
    }
}

impl IntoSeries for BooleanArray {
    fn into_series(self) -> Series {
        Series::Boolean(self)
    }
}

impl IntoSeries for Int64Array {
    fn into_series(self) -> Series {
        Series::Int64(self)
    }
}

impl IntoSeries for Float64Array {
    fn into_series(self) -> Series {
        Series::Float64(self)
    }
}

impl IntoSeries for Utf8Array {
    fn into_series(self) -> Series {
        Series::Utf8(self)
    }
}

/// Construct a Series from a name and a slice of values.
pub trait NamedFrom<T, Phantom: ?Sized> {
    fn new(name: &str, v: T) -> Self;
}

impl<T: AsRef<[bool]>> NamedFrom<T, [bool]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Boolean(BooleanArray::new_from_slice(name, v.as_ref()))
    }
}

impl<T: AsRef<[Option<bool>]>> NamedFrom<T, [Option<bool>]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Boolean(BooleanArray::new_from_opt_slice(name, v.as_ref()))
    }
}

impl<T: AsRef<[i64]>> NamedFrom<T, [i64]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Int64(Int64Array::new_from_slice(name, v.as_ref()))
    }
}

impl<T: AsRef<[Option<i64>]>> NamedFrom<T, [Option<i64>]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Int64(Int64Array::new_from_opt_slice(name, v.as_ref()))
    }
}

impl<T: AsRef<[f64]>> NamedFrom<T, [f64]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Float64(Float64Array::new_from_slice(name, v.as_ref()))
    }
}

impl<T: AsRef<[Option<f64>]>> NamedFrom<T, [Option<f64>]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Float64(Float64Array::new_from_opt_slice(name, v.as_ref()))
    }
}

impl<'a, T: AsRef<[&'a str]>> NamedFrom<T, [&'a str]> for Series {
    fn new(name: &str, v: T) -> Self {
        let values = v.as_ref().iter().map(|s| Some(s.to_string())).collect();
        Series::Utf8(Utf8Array::from_vec(name, values))
    }
}

impl<'a, T: AsRef<[Option<&'a str>]>> NamedFrom<T, [Option<&'a str>]> for Series {
    fn new(name: &str, v: T) -> Self {
        let values = v
            .as_ref()
            .iter()
            .map(|s| s.map(|s| s.to_string()))
            .collect();
        Series::Utf8(Utf8Array::from_vec(name, values))
    }
}

impl<T: AsRef<[String]>> NamedFrom<T, [String]> for Series {
    fn new(name: &str, v: T) -> Self {
        Series::Utf8(Utf8Array::new_from_slice(name, v.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn named_from_infers_dtype() {
        assert_eq!(Series::new("a", [1, 2, 3]).dtype(), DataType::Int64);
        assert_eq!(Series::new("b", [1.0, 2.0]).dtype(), DataType::Float64);
        assert_eq!(Series::new("c", ["x", "y"]).dtype(), DataType::Utf8);
        assert_eq!(Series::new("d", [true]).dtype(), DataType::Boolean);
        assert_eq!(
            Series::new("e", [Some(1), None]).null_count(),
            1
        );
    }

    #[test]
    fn get_and_append() {
        let mut s = Series::new("a", [1, 2]);
        assert_eq!(s.get(0), AnyValue::Int64(1));
        assert_eq!(s.get(9), AnyValue::Null);

        let other = Series::new("b", [3]);
        s.append(&other).unwrap();
        assert_eq!(s.len(), 3);

        let text = Series::new("c", ["x"]);
        assert!(s.append(&text).is_err());
    }

    #[test]
    fn arg_sort_options() {
        let s = Series::new("a", [Some(2), None, Some(1)]);
        assert_eq!(s.arg_sort(SortOptions::default()), vec![1, 2, 0]);
        assert_eq!(
            s.arg_sort(SortOptions {
                descending: true,
                nulls_last: false,
            }),
            vec![0, 2, 1]
        );
        assert_eq!(
            s.arg_sort(SortOptions {
                descending: false,
                nulls_last: true,
            }),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let s = Series::new("a", ["b", "a", "b", "a"]);
        assert_eq!(s.arg_sort(SortOptions::default()), vec![1, 3, 0, 2]);
    }

    #[test]
    fn from_any_values_promotes_ints() {
        let s = Series::from_any_values(
            "a",
            DataType::Float64,
            &[AnyValue::Int64(1), AnyValue::Float64(2.5), AnyValue::Null],
        )
        .unwrap();
        assert_eq!(s.dtype(), DataType::Float64);
        assert_eq!(s.get(0), AnyValue::Float64(1.0));

        assert!(Series::from_any_values(
            "a",
            DataType::Int64,
            &[AnyValue::Utf8("x".to_string())]
        )
        .is_err());
    }
}
