//! Group-by and grouped aggregation.
use hashbrown::HashMap;

use crate::datatypes::AnyValue;
use crate::error::{AvocetError, Result};
use crate::frame::select::Selection;
use crate::frame::DataFrame;
use crate::series::aggregate::{AggOp, NullStrategy};
use crate::series::Series;

impl DataFrame {
    /// Group the DataFrame by one or more key columns. Rows keep their
    /// within-group order and groups come out in first-seen key order.
    ///
    /// # Example
    ///
    /// ```
    /// use avocet::prelude::*;
    /// fn mean_per_group(df: &DataFrame) -> Result<DataFrame> {
    ///     df.group_by(&["neighborhood"])?.select("count").mean()
    /// }
    /// ```
    pub fn group_by<S: AsRef<str>>(&self, by: &[S]) -> Result<GroupBy<'_>> {
        if by.is_empty() {
            return Err(AvocetError::NoData("no group_by keys given".into()));
        }
        let keys = by
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        let groups = group_tuples(&keys, self.height());
        Ok(GroupBy {
            df: self,
            keys,
            groups,
            selection: None,
        })
    }
}

// [first idx, [all idx]] per group, appended at first sight of the key
fn group_tuples(keys: &[Series], height: usize) -> Vec<(usize, Vec<usize>)> {
    let mut table: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut buf = Vec::new();
    for row in 0..height {
        buf.clear();
        for key in keys {
            encode_value(&key.get(row), &mut buf);
        }
        match table.get(buf.as_slice()) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                table.insert(buf.clone(), groups.len());
                groups.push((row, vec![row]));
            }
        }
    }
    groups
}

// Row-key encoding: a dtype tag, then the value bytes. Floats are
// canonicalized so 0.0 == -0.0 and every NaN groups together.
fn encode_value(value: &AnyValue, buf: &mut Vec<u8>) {
    match value {
        AnyValue::Null => buf.push(0),
        AnyValue::Boolean(v) => {
            buf.push(1);
            buf.push(*v as u8);
        }
        AnyValue::Int64(v) => {
            buf.push(2);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        AnyValue::Float64(v) => {
            buf.push(3);
            let v = if *v == 0.0 {
                0.0
            } else if v.is_nan() {
                f64::NAN
            } else {
                *v
            };
            buf.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        AnyValue::Utf8(v) => {
            buf.push(4);
            buf.extend_from_slice(&(v.len() as u64).to_le_bytes());
            buf.extend_from_slice(v.as_bytes());
        }
    }
}

pub struct GroupBy<'a> {
    df: &'a DataFrame,
    keys: Vec<Series>,
    groups: Vec<(usize, Vec<usize>)>,
    selection: Option<Vec<String>>,
}

impl<'a> GroupBy<'a> {
    /// Narrow the aggregation to the given column(s). Without a selection
    /// every non-key column is aggregated.
    pub fn select<'b, S: Selection<'b>>(mut self, selection: S) -> Self {
        self.selection = Some(
            selection
                .to_selection_vec()
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
        );
        self
    }

    /// The group index tuples: first row index plus all row indices, one
    /// entry per group in first-seen order.
    pub fn groups(&self) -> &[(usize, Vec<usize>)] {
        &self.groups
    }

    // one row per group: the key values at each group's first index
    fn keys_frame(&self) -> Vec<Series> {
        let firsts: Vec<usize> = self.groups.iter().map(|(first, _)| *first).collect();
        self.keys.iter().map(|k| k.gather(&firsts)).collect()
    }

    fn agg_column_names(&self) -> Result<Vec<String>> {
        match &self.selection {
            Some(selection) => {
                for name in selection {
                    self.df.column(name)?;
                }
                Ok(selection.clone())
            }
            None => {
                let key_names: Vec<&str> = self.keys.iter().map(|k| k.name()).collect();
                Ok(self
                    .df
                    .get_column_names()
                    .into_iter()
                    .filter(|name| !key_names.contains(name))
                    .map(|name| name.to_string())
                    .collect())
            }
        }
    }

    /// Aggregate the grouped columns; every `(column, ops)` pair yields one
    /// output column per op, named `{column}_{op}`, after the key column(s).
    ///
    /// # Example
    ///
    /// ```
    /// use avocet::prelude::*;
    /// fn example(df: &DataFrame) -> Result<DataFrame> {
    ///     df.group_by(&["offense"])?
    ///         .agg(&[("count", &[AggOp::Sum, AggOp::Mean])])
    /// }
    /// ```
    pub fn agg(&self, columns_ops: &[(&str, &[AggOp])]) -> Result<DataFrame> {
        let mut out = self.keys_frame();
        for (name, ops) in columns_ops {
            let series = self.df.column(name)?;
            for op in ops.iter() {
                let mut values = Vec::with_capacity(self.groups.len());
                for (_, indices) in &self.groups {
                    let group = series.gather(indices);
                    values.push(group.aggregate(*op, NullStrategy::Ignore)?);
                }
                let new_name = format!("{}_{}", name, op.name());
                out.push(Series::from_any_values(
                    &new_name,
                    op.output_dtype(series.dtype()),
                    &values,
                )?);
            }
        }
        DataFrame::new(out)
    }

    fn agg_all(&self, op: AggOp) -> Result<DataFrame> {
        let names = self.agg_column_names()?;
        let pairs: Vec<(&str, &[AggOp])> = names
            .iter()
            .map(|name| (name.as_str(), std::slice::from_ref(&op)))
            .collect();
        self.agg(&pairs)
    }

    /// Aggregate the grouped columns and compute the mean per group.
    pub fn mean(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Mean)
    }

    /// Aggregate the grouped columns and compute the sum per group.
    pub fn sum(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Sum)
    }

    /// Aggregate the grouped columns and compute the minimum per group.
    pub fn min(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Min)
    }

    /// Aggregate the grouped columns and compute the maximum per group.
    pub fn max(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Max)
    }

    /// Aggregate the grouped columns and compute the median per group.
    pub fn median(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Median)
    }

    /// Count the rows per group.
    pub fn count(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Count)
    }

    /// Take the first value per group.
    pub fn first(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::First)
    }

    /// Take the last value per group.
    pub fn last(&self) -> Result<DataFrame> {
        self.agg_all(AggOp::Last)
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    fn crime_frame() -> DataFrame {
        df! {
            "offense" => ["theft", "assault", "theft", "burglary", "assault", "theft"],
            "count" => [10, 2, 20, 5, 4, 30],
            "rate" => [1.0, 0.2, 2.0, 0.5, 0.4, 3.0]
        }
        .unwrap()
    }

    #[test]
    fn groups_come_out_in_first_seen_order() {
        let df = crime_frame();
        let out = df.group_by(&["offense"]).unwrap().select("count").sum().unwrap();
        assert_eq!(out.shape(), (3, 2));
        let keys = out.column("offense").unwrap();
        assert_eq!(keys.get(0), AnyValue::Utf8("theft".into()));
        assert_eq!(keys.get(1), AnyValue::Utf8("assault".into()));
        assert_eq!(keys.get(2), AnyValue::Utf8("burglary".into()));
        let sums = out.column("count_sum").unwrap();
        assert_eq!(sums.get(0), AnyValue::Int64(60));
        assert_eq!(sums.get(1), AnyValue::Int64(6));
        assert_eq!(sums.get(2), AnyValue::Int64(5));
    }

    #[test]
    fn default_selection_is_all_non_key_columns() {
        let df = crime_frame();
        let out = df.group_by(&["offense"]).unwrap().count().unwrap();
        assert_eq!(
            out.get_column_names(),
            vec!["offense", "count_count", "rate_count"]
        );
    }

    #[test]
    fn single_group_mean_matches_ungrouped() {
        let df = df! {
            "k" => ["only", "only", "only"],
            "v" => [1.0, 2.0, 6.0]
        }
        .unwrap();
        let grouped = df.group_by(&["k"]).unwrap().select("v").mean().unwrap();
        let plain = df.agg(&[("v", &[AggOp::Mean])], NullStrategy::Ignore).unwrap();
        assert_eq!(
            grouped.column("v_mean").unwrap().get(0),
            plain.column("v_mean").unwrap().get(0)
        );
    }

    #[test]
    fn multiple_key_columns() {
        let df = df! {
            "a" => ["x", "x", "y", "x"],
            "b" => [1, 1, 1, 2],
            "v" => [10, 20, 30, 40]
        }
        .unwrap();
        let out = df.group_by(&["a", "b"]).unwrap().select("v").sum().unwrap();
        assert_eq!(out.shape(), (3, 3));
        assert_eq!(out.column("v_sum").unwrap().get(0), AnyValue::Int64(30));
        assert_eq!(out.column("v_sum").unwrap().get(1), AnyValue::Int64(30));
        assert_eq!(out.column("v_sum").unwrap().get(2), AnyValue::Int64(40));
    }

    #[test]
    fn null_keys_form_their_own_group() {
        let df = df! {
            "k" => [Some("a"), None, Some("a"), None],
            "v" => [1, 2, 3, 4]
        }
        .unwrap();
        let out = df.group_by(&["k"]).unwrap().select("v").sum().unwrap();
        assert_eq!(out.shape(), (2, 2));
        assert_eq!(out.column("v_sum").unwrap().get(1), AnyValue::Int64(6));
    }

    #[test]
    fn unknown_key_errors() {
        let df = crime_frame();
        assert!(df.group_by(&["nope"]).is_err());
        assert!(df
            .group_by(&["offense"])
            .unwrap()
            .select("nope")
            .sum()
            .is_err());
    }

    #[test]
    fn agg_multiple_ops() {
        let df = crime_frame();
        let out = df
            .group_by(&["offense"])
            .unwrap()
            .agg(&[("count", &[AggOp::Min, AggOp::Max])])
            .unwrap();
        assert_eq!(
            out.get_column_names(),
            vec!["offense", "count_min", "count_max"]
        );
        assert_eq!(out.column("count_min").unwrap().get(0), AnyValue::Int64(10));
        assert_eq!(out.column("count_max").unwrap().get(0), AnyValue::Int64(30));
    }
}
