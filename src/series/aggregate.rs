//! Aggregation of a Series down to a single value.
use crate::array::aggregate::Agg;
use crate::datatypes::{AnyValue, DataType};
use crate::error::{AvocetError, Result};
use crate::series::Series;

/// Aggregation functions understood by `DataFrame::agg` and `GroupBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    Sum,
    Mean,
    Min,
    Max,
    Median,
    /// The number of rows, nulls included. Use `Series::null_count` to reason
    /// about missing values separately.
    Count,
    First,
    Last,
}

impl AggOp {
    pub fn name(&self) -> &'static str {
        match self {
            AggOp::Sum => "sum",
            AggOp::Mean => "mean",
            AggOp::Min => "min",
            AggOp::Max => "max",
            AggOp::Median => "median",
            AggOp::Count => "count",
            AggOp::First => "first",
            AggOp::Last => "last",
        }
    }

    /// The dtype an aggregate over a column of dtype `input` produces.
    pub fn output_dtype(&self, input: DataType) -> DataType {
        match self {
            AggOp::Mean | AggOp::Median => DataType::Float64,
            AggOp::Count => DataType::Int64,
            AggOp::Sum if input == DataType::Boolean => DataType::Int64,
            _ => input,
        }
    }
}

/// Whether aggregates skip missing values or surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullStrategy {
    /// Skip nulls; the aggregate covers the values actually present.
    #[default]
    Ignore,
    /// Any null input makes the aggregate null.
    Propagate,
}

impl Series {
    /// Aggregate this Series to a single value. `Count`, `First` and `Last`
    /// are defined for every dtype; the numeric aggregates require a numeric
    /// column, except `Min`/`Max` which also order strings lexicographically
    /// and booleans as 0/1.
    pub fn aggregate(&self, op: AggOp, strategy: NullStrategy) -> Result<AnyValue> {
        match op {
            AggOp::Count => return Ok(AnyValue::Int64(self.len() as i64)),
            AggOp::First => return Ok(self.get(0)),
            AggOp::Last => {
                if self.is_empty() {
                    return Ok(AnyValue::Null);
                }
                return Ok(self.get(self.len() - 1));
            }
            _ => {}
        }
        if strategy == NullStrategy::Propagate && self.null_count() > 0 {
            return Ok(AnyValue::Null);
        }
        let unsupported = || {
            AvocetError::ComputeError(
                format!(
                    "cannot apply {} to {} column {}",
                    op.name(),
                    self.dtype(),
                    self.name()
                )
                .into(),
            )
        };
        let value = match self {
            Series::Int64(a) => match op {
                AggOp::Sum => a.sum().map(AnyValue::Int64),
                AggOp::Min => a.min().map(AnyValue::Int64),
                AggOp::Max => a.max().map(AnyValue::Int64),
                AggOp::Mean => a.mean().map(AnyValue::Float64),
                AggOp::Median => a.median().map(AnyValue::Float64),
                _ => unreachable!(),
            },
            Series::Float64(a) => match op {
                AggOp::Sum => a.sum().map(AnyValue::Float64),
                AggOp::Min => a.min().map(AnyValue::Float64),
                AggOp::Max => a.max().map(AnyValue::Float64),
                AggOp::Mean => a.mean().map(AnyValue::Float64),
                AggOp::Median => a.median().map(AnyValue::Float64),
                _ => unreachable!(),
            },
            Series::Boolean(a) => match op {
                AggOp::Sum => a.sum().map(AnyValue::Int64),
                AggOp::Mean => a.mean().map(AnyValue::Float64),
                AggOp::Min => a.iter().flatten().min().map(|v| AnyValue::Boolean(*v)),
                AggOp::Max => a.iter().flatten().max().map(|v| AnyValue::Boolean(*v)),
                _ => return Err(unsupported()),
            },
            Series::Utf8(a) => match op {
                AggOp::Min => a.min_str().map(|s| AnyValue::Utf8(s.to_string())),
                AggOp::Max => a.max_str().map(|s| AnyValue::Utf8(s.to_string())),
                _ => return Err(unsupported()),
            },
        };
        Ok(value.unwrap_or(AnyValue::Null))
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn ignore_skips_missing_but_count_does_not() {
        let s = Series::new("a", [Some(1), None, Some(5)]);
        assert_eq!(
            s.aggregate(AggOp::Sum, NullStrategy::Ignore).unwrap(),
            AnyValue::Int64(6)
        );
        assert_eq!(
            s.aggregate(AggOp::Mean, NullStrategy::Ignore).unwrap(),
            AnyValue::Float64(3.0)
        );
        // the row count still reflects every row present
        assert_eq!(
            s.aggregate(AggOp::Count, NullStrategy::Ignore).unwrap(),
            AnyValue::Int64(3)
        );
    }

    #[test]
    fn propagate_surfaces_missing() {
        let s = Series::new("a", [Some(1), None, Some(5)]);
        assert_eq!(
            s.aggregate(AggOp::Sum, NullStrategy::Propagate).unwrap(),
            AnyValue::Null
        );
        let full = Series::new("b", [1, 2]);
        assert_eq!(
            full.aggregate(AggOp::Sum, NullStrategy::Propagate).unwrap(),
            AnyValue::Int64(3)
        );
    }

    #[test]
    fn first_and_last() {
        let s = Series::new("a", ["x", "y", "z"]);
        assert_eq!(
            s.aggregate(AggOp::First, NullStrategy::Ignore).unwrap(),
            AnyValue::Utf8("x".to_string())
        );
        assert_eq!(
            s.aggregate(AggOp::Last, NullStrategy::Ignore).unwrap(),
            AnyValue::Utf8("z".to_string())
        );
        let empty = Series::new("e", Vec::<i64>::new());
        assert_eq!(
            empty.aggregate(AggOp::Last, NullStrategy::Ignore).unwrap(),
            AnyValue::Null
        );
    }

    #[test]
    fn string_mean_is_rejected() {
        let s = Series::new("a", ["x"]);
        assert!(s.aggregate(AggOp::Mean, NullStrategy::Ignore).is_err());
    }
}
