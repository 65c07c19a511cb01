//! Comparison of a Series against a dynamically typed scalar.
use std::cmp::Ordering;

use crate::datatypes::{AnyValue, BooleanArray, DataType};
use crate::error::{AvocetError, Result};
use crate::series::Series;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
}

impl CompareOp {
    pub(crate) fn evaluate(&self, ord: Ordering) -> bool {
        match self {
            CompareOp::Equal => ord == Ordering::Equal,
            CompareOp::NotEqual => ord != Ordering::Equal,
            CompareOp::GreaterThan => ord == Ordering::Greater,
            CompareOp::GreaterEqual => ord != Ordering::Less,
            CompareOp::LessThan => ord == Ordering::Less,
            CompareOp::LessEqual => ord != Ordering::Greater,
        }
    }
}

fn comparable(column: DataType, value: &AnyValue) -> bool {
    match value.dtype() {
        None => false,
        Some(DataType::Int64) | Some(DataType::Float64) => column.is_numeric(),
        Some(dtype) => dtype == column,
    }
}

impl Series {
    /// Compare every row against `rhs`. Null rows compare to null, and a null
    /// `rhs` yields an all-null mask (no value is equal, unequal, or ordered
    /// against null).
    pub fn compare(&self, op: CompareOp, rhs: &AnyValue) -> Result<BooleanArray> {
        if rhs.is_null() {
            return Ok(BooleanArray::full_null(self.name(), self.len()));
        }
        if !comparable(self.dtype(), rhs) {
            return Err(AvocetError::DataTypeMismatch(
                format!(
                    "cannot compare {} column {} against {:?}",
                    self.dtype(),
                    self.name(),
                    rhs
                )
                .into(),
            ));
        }
        let values = (0..self.len())
            .map(|i| {
                let lhs = self.get(i);
                if lhs.is_null() {
                    None
                } else {
                    Some(op.evaluate(lhs.cmp_values(rhs)))
                }
            })
            .collect();
        Ok(BooleanArray::from_vec(self.name(), values))
    }
}

#[cfg(test)]
mod test {
    use super::CompareOp;
    use crate::prelude::*;

    #[test]
    fn numeric_literal_against_float_column() {
        let s = Series::new("a", [1.5, 3.0]);
        let mask = s.compare(CompareOp::GreaterThan, &AnyValue::Int64(2)).unwrap();
        assert_eq!(mask.get(0), Some(&false));
        assert_eq!(mask.get(1), Some(&true));
    }

    #[test]
    fn null_rhs_yields_null_mask() {
        let s = Series::new("a", [1, 2]);
        let mask = s.compare(CompareOp::Equal, &AnyValue::Null).unwrap();
        assert_eq!(mask.null_count(), 2);
    }

    #[test]
    fn dtype_mismatch_is_rejected() {
        let s = Series::new("a", [1, 2]);
        assert!(s
            .compare(CompareOp::Equal, &AnyValue::Utf8("x".to_string()))
            .is_err());
    }

    #[test]
    fn null_rows_compare_to_null() {
        let s = Series::new("a", [Some("x"), None]);
        let mask = s
            .compare(CompareOp::Equal, &AnyValue::Utf8("x".to_string()))
            .unwrap();
        assert_eq!(mask.get(0), Some(&true));
        assert_eq!(mask.get(1), None);
    }
}
