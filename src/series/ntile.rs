//! Quantile-rank bucket labels.
use crate::datatypes::Int64Array;
use crate::error::{AvocetError, Result};
use crate::series::{Series, SortOptions};

impl Series {
    /// Assign every row a bucket label `1..=n` by value rank: rows are
    /// ordered by value and split into `n` contiguous buckets of
    /// as-equal-as-possible size, the first `len % n` buckets taking the
    /// extra row. The underlying sort is stable, so ties fall into buckets by
    /// row order. Null rows get a null label and occupy no bucket slot.
    pub fn ntile(&self, n: usize) -> Result<Series> {
        if n == 0 {
            return Err(AvocetError::ComputeError(
                "ntile requires at least one bucket".into(),
            ));
        }
        if !self.dtype().is_numeric() {
            return Err(AvocetError::DataTypeMismatch(
                format!("ntile expects a numeric column, got {}", self.dtype()).into(),
            ));
        }
        let order = self.arg_sort(SortOptions {
            descending: false,
            nulls_last: true,
        });
        let ranked = self.len() - self.null_count();

        let mut labels: Vec<Option<i64>> = vec![None; self.len()];
        let base = ranked / n;
        let remainder = ranked % n;
        let mut pos = 0;
        for bucket in 0..n {
            let size = base + usize::from(bucket < remainder);
            for _ in 0..size {
                labels[order[pos]] = Some(bucket as i64 + 1);
                pos += 1;
            }
        }
        Ok(Series::Int64(Int64Array::from_vec(self.name(), labels)))
    }
}
