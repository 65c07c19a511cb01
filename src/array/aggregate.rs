//! Implementations of the Agg trait.
use num_traits::{Num, NumCast, ToPrimitive};

use crate::array::TypedArray;
use crate::datatypes::{AvocetNumericType, BooleanArray, Utf8Array};

/// Aggregations over a single column. Null values are skipped; `None` means
/// the column held no non-null value to aggregate.
pub trait Agg<N> {
    fn sum(&self) -> Option<N>;
    fn min(&self) -> Option<N>;
    fn max(&self) -> Option<N>;
    fn mean(&self) -> Option<f64>;
    fn median(&self) -> Option<f64>;
}

impl<T> Agg<T::Native> for TypedArray<T>
where
    T: AvocetNumericType,
    T::Native: Num + NumCast + ToPrimitive + PartialOrd + Copy,
{
    fn sum(&self) -> Option<T::Native> {
        self.iter()
            .flatten()
            .fold(None, |acc: Option<T::Native>, &v| match acc {
                None => Some(v),
                Some(acc) => Some(acc + v),
            })
    }

    fn min(&self) -> Option<T::Native> {
        self.iter()
            .flatten()
            .fold(None, |acc: Option<T::Native>, &v| match acc {
                None => Some(v),
                Some(acc) => Some(if v < acc { v } else { acc }),
            })
    }

    fn max(&self) -> Option<T::Native> {
        self.iter()
            .flatten()
            .fold(None, |acc: Option<T::Native>, &v| match acc {
                None => Some(v),
                Some(acc) => Some(if v > acc { v } else { acc }),
            })
    }

    fn mean(&self) -> Option<f64> {
        let count = self.len() - self.null_count();
        if count == 0 {
            return None;
        }
        self.sum().and_then(|v| v.to_f64()).map(|v| v / count as f64)
    }

    fn median(&self) -> Option<f64> {
        let mut values: Vec<f64> = self.iter().flatten().filter_map(|v| v.to_f64()).collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[mid])
        } else {
            Some((values[mid - 1] + values[mid]) / 2.0)
        }
    }
}

impl Utf8Array {
    /// Lexicographic minimum of the non-null values.
    pub fn min_str(&self) -> Option<&str> {
        self.iter().flatten().map(|s| s.as_str()).min()
    }

    /// Lexicographic maximum of the non-null values.
    pub fn max_str(&self) -> Option<&str> {
        self.iter().flatten().map(|s| s.as_str()).max()
    }
}

impl BooleanArray {
    /// Count of true values; booleans aggregate as 1 or 0.
    pub fn sum(&self) -> Option<i64> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().flatten().filter(|&&v| v).count() as i64)
    }

    pub fn mean(&self) -> Option<f64> {
        let count = self.len() - self.null_count();
        if count == 0 {
            return None;
        }
        self.sum().map(|v| v as f64 / count as f64)
    }
}
