//! DataFrame module.
use rayon::prelude::*;

use crate::datatypes::{AnyValue, BooleanArray, DataType, Field, Schema};
use crate::error::{AvocetError, Result};
use crate::frame::select::Selection;
use crate::series::aggregate::{AggOp, NullStrategy};
use crate::series::{IntoSeries, Series, SortOptions};

pub mod group_by;
pub mod select;
pub mod ser;

/// A 2 dimensional structure backed by a `Vec<Series>`. Every column shares
/// one length and column names are unique.
#[derive(Clone)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl Default for DataFrame {
    fn default() -> Self {
        DataFrame::new_no_checks(Vec::with_capacity(0))
    }
}

impl DataFrame {
    /// Create a DataFrame from a vector of Series.
    ///
    /// # Example
    ///
    /// ```
    /// use avocet::prelude::*;
    /// let s0 = Series::new("days", [0, 1, 2]);
    /// let s1 = Series::new("temp", [22.1, 19.9, 7.0]);
    /// let df = DataFrame::new(vec![s0, s1]).unwrap();
    /// ```
    pub fn new<S: IntoSeries>(columns: Vec<S>) -> Result<Self> {
        let mut first_len = None;
        let mut series_cols = Vec::with_capacity(columns.len());

        // check length equality and name uniqueness in one pass
        for s in columns {
            let series = s.into_series();
            match first_len {
                Some(len) => {
                    if series.len() != len {
                        return Err(AvocetError::ShapeMismatch(
                            format!(
                                "could not create a new DataFrame: column {} has length {} while the first column has length {}",
                                series.name(),
                                series.len(),
                                len
                            )
                            .into(),
                        ));
                    }
                }
                None => first_len = Some(series.len()),
            }
            if series_cols
                .iter()
                .any(|c: &Series| c.name() == series.name())
            {
                return Err(AvocetError::Duplicate(series.name().to_string()));
            }
            series_cols.push(series)
        }
        Ok(DataFrame {
            columns: series_cols,
        })
    }

    // doesn't check column invariants.
    pub(crate) fn new_no_checks(columns: Vec<Series>) -> DataFrame {
        DataFrame { columns }
    }

    fn name_to_idx(&self, name: &str) -> Result<usize> {
        self.find_idx_by_name(name)
            .ok_or_else(|| AvocetError::ColumnNotFound(name.to_string()))
    }

    /// Get a reference to the DataFrame schema.
    pub fn schema(&self) -> Schema {
        Schema::new(self.fields())
    }

    /// Get a reference to the DataFrame columns.
    #[inline]
    pub fn get_columns(&self) -> &[Series] {
        &self.columns
    }

    /// Get the column labels of the DataFrame.
    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.name()).collect()
    }

    /// Get the data types of the columns in the DataFrame.
    pub fn dtypes(&self) -> Vec<DataType> {
        self.columns.iter().map(|s| s.dtype()).collect()
    }

    /// Get the schema fields of the DataFrame.
    pub fn fields(&self) -> Vec<Field> {
        self.columns.iter().map(|s| s.field().clone()).collect()
    }

    /// Get (height x width)
    pub fn shape(&self) -> (usize, usize) {
        match self.columns.first() {
            Some(s) => (s.len(), self.columns.len()),
            None => (0, 0),
        }
    }

    /// Get the width of the DataFrame.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Get the height of the DataFrame.
    pub fn height(&self) -> usize {
        self.shape().0
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Add multiple Series to the DataFrame. The Series must have the same
    /// length and may not reuse a column name.
    pub fn hstack(&mut self, columns: &[Series]) -> Result<&mut Self> {
        let height = self.height();
        for col in columns {
            if !self.columns.is_empty() && col.len() != height {
                return Err(AvocetError::ShapeMismatch(
                    format!(
                        "could not horizontally stack: Series length {} differs from the DataFrame height {}",
                        col.len(),
                        height
                    )
                    .into(),
                ));
            }
            if self.find_idx_by_name(col.name()).is_some() {
                return Err(AvocetError::Duplicate(col.name().to_string()));
            }
            self.columns.push(col.clone());
        }
        Ok(self)
    }

    /// Concatenate a DataFrame below this DataFrame.
    pub fn vstack(&mut self, other: &DataFrame) -> Result<&mut Self> {
        if self.width() != other.width() {
            return Err(AvocetError::ShapeMismatch(
                format!(
                    "could not vertically stack: the appended width {} differs from the parent width {}",
                    other.width(),
                    self.width()
                )
                .into(),
            ));
        }
        if self.get_column_names() != other.get_column_names() {
            return Err(AvocetError::SchemaMismatch(
                "cannot vstack: column names differ".into(),
            ));
        }
        for (left, right) in self.columns.iter_mut().zip(other.columns.iter()) {
            left.append(right)?;
        }
        Ok(self)
    }

    /// Create a new DataFrame with the column added.
    pub fn with_column<S: IntoSeries>(&self, column: S) -> Result<Self> {
        let mut df = self.clone();
        df.hstack(&[column.into_series()])?;
        Ok(df)
    }

    /// Get a row of the DataFrame. Beware this is slow.
    pub fn get(&self, idx: usize) -> Option<Vec<AnyValue>> {
        if idx >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|s| s.get(idx)).collect())
    }

    /// Select a Series by index.
    pub fn select_at_idx(&self, idx: usize) -> Option<&Series> {
        self.columns.get(idx)
    }

    /// Get the column index of a Series by name.
    pub fn find_idx_by_name(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|s| s.name() == name)
    }

    /// Select a single column by name.
    pub fn column(&self, name: &str) -> Result<&Series> {
        let idx = self.name_to_idx(name)?;
        Ok(&self.columns[idx])
    }

    /// Select column(s) from this DataFrame and return a new DataFrame.
    ///
    /// # Example
    ///
    /// ```
    /// use avocet::prelude::*;
    /// fn example(df: &DataFrame) -> Result<DataFrame> {
    ///     df.select(&["neighborhood", "count"])
    /// }
    /// ```
    pub fn select<'a, S: Selection<'a>>(&self, selection: S) -> Result<Self> {
        let selected = self.select_series(selection)?;
        Ok(DataFrame::new_no_checks(selected))
    }

    /// Select column(s) from this DataFrame and return them in a vector.
    pub fn select_series<'a, S: Selection<'a>>(&self, selection: S) -> Result<Vec<Series>> {
        selection
            .to_selection_vec()
            .iter()
            .map(|name| self.column(name).cloned())
            .collect()
    }

    /// Drop a column by name. This is a pure method and returns a new
    /// DataFrame with the remaining columns in original order.
    pub fn drop(&self, name: &str) -> Result<Self> {
        let idx = self.name_to_idx(name)?;
        let mut new_cols = Vec::with_capacity(self.columns.len() - 1);
        for (i, s) in self.columns.iter().enumerate() {
            if i != idx {
                new_cols.push(s.clone())
            }
        }
        Ok(DataFrame::new_no_checks(new_cols))
    }

    /// Drop every listed column; names that don't resolve are ignored.
    pub fn drop_many<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let names: Vec<&str> = names.iter().map(|s| s.as_ref()).collect();
        let new_cols = self
            .columns
            .iter()
            .filter(|s| !names.contains(&s.name()))
            .cloned()
            .collect();
        DataFrame::new_no_checks(new_cols)
    }

    /// Remove a column by name and return it.
    pub fn drop_in_place(&mut self, name: &str) -> Result<Series> {
        let idx = self.name_to_idx(name)?;
        Ok(self.columns.remove(idx))
    }

    /// Return a new DataFrame where every row holding a null is dropped.
    pub fn drop_nulls(&self) -> Result<Self> {
        let mut iter = self.columns.iter();
        let mut mask = match iter.next() {
            Some(s) => s.is_not_null(),
            None => return Ok(self.clone()),
        };
        for s in iter {
            mask = &mask & &s.is_not_null();
        }
        self.filter(&mask)
    }

    /// Take DataFrame rows by a boolean mask. A null mask slot drops the row.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Self> {
        if mask.len() != self.height() {
            return Err(AvocetError::ShapeMismatch(
                format!(
                    "filter mask length {} does not match the DataFrame height {}",
                    mask.len(),
                    self.height()
                )
                .into(),
            ));
        }
        let new_cols = self
            .columns
            .par_iter()
            .map(|col| col.filter(mask))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new_no_checks(new_cols))
    }

    /// Take DataFrame rows by index values, bound checked.
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let new_cols = self
            .columns
            .par_iter()
            .map(|s| s.take(indices))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new_no_checks(new_cols))
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        let new_cols = self
            .columns
            .par_iter()
            .map(|s| s.gather(indices))
            .collect::<Vec<_>>();
        DataFrame::new_no_checks(new_cols)
    }

    /// Rename a column in the DataFrame.
    pub fn rename(&mut self, column: &str, name: &str) -> Result<&mut Self> {
        if column != name && self.find_idx_by_name(name).is_some() {
            return Err(AvocetError::Duplicate(name.to_string()));
        }
        let idx = self.name_to_idx(column)?;
        self.columns[idx].rename(name);
        Ok(self)
    }

    /// Return a clone of this DataFrame sorted by the given columns. Every
    /// key carries its own `descending` flag (a single flag broadcasts); ties
    /// are broken by the subsequent keys and fully tied rows keep their
    /// original order.
    pub fn sort<S: AsRef<str>>(&self, by: &[S], descending: &[bool]) -> Result<Self> {
        let indices = self.arg_sort_multiple(by, descending)?;
        Ok(self.gather(&indices))
    }

    /// Sort the DataFrame in place by the given columns.
    pub fn sort_in_place<S: AsRef<str>>(
        &mut self,
        by: &[S],
        descending: &[bool],
    ) -> Result<&mut Self> {
        let indices = self.arg_sort_multiple(by, descending)?;
        self.columns = self.gather(&indices).columns;
        Ok(self)
    }

    fn arg_sort_multiple<S: AsRef<str>>(
        &self,
        by: &[S],
        descending: &[bool],
    ) -> Result<Vec<usize>> {
        if by.is_empty() {
            return Err(AvocetError::NoData("no sort keys given".into()));
        }
        let descending: Vec<bool> = match descending.len() {
            1 => vec![descending[0]; by.len()],
            n if n == by.len() => descending.to_vec(),
            _ => {
                return Err(AvocetError::ShapeMismatch(
                    format!(
                        "{} descending flags given for {} sort keys",
                        descending.len(),
                        by.len()
                    )
                    .into(),
                ))
            }
        };
        let keys = by
            .iter()
            .map(|name| self.column(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut indices: Vec<usize> = (0..self.height()).collect();
        indices.sort_by(|&a, &b| {
            for (key, &desc) in keys.iter().zip(descending.iter()) {
                let ord = crate::series::compare_with_options(
                    &key.get(a),
                    &key.get(b),
                    SortOptions {
                        descending: desc,
                        nulls_last: false,
                    },
                );
                if ord != std::cmp::Ordering::Equal {
                    return ord;
                }
            }
            std::cmp::Ordering::Equal
        });
        Ok(indices)
    }

    /// Slice the DataFrame along the rows.
    pub fn slice(&self, offset: usize, length: usize) -> Result<Self> {
        let cols = self
            .columns
            .iter()
            .map(|s| s.slice(offset, length))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame::new_no_checks(cols))
    }

    /// Get the head of the DataFrame.
    pub fn head(&self, length: Option<usize>) -> Self {
        let cols = self.columns.iter().map(|s| s.head(length)).collect();
        DataFrame::new_no_checks(cols)
    }

    /// Get the tail of the DataFrame.
    pub fn tail(&self, length: Option<usize>) -> Self {
        let cols = self.columns.iter().map(|s| s.tail(length)).collect();
        DataFrame::new_no_checks(cols)
    }

    /// Get a DataFrame with the rows in reversed order.
    pub fn reverse(&self) -> Self {
        let cols = self.columns.iter().map(|s| s.reverse()).collect();
        DataFrame::new_no_checks(cols)
    }

    /// Drop duplicate rows, keeping the first occurrence in original order.
    pub fn unique(&self) -> Result<Self> {
        if self.columns.is_empty() {
            return Ok(self.clone());
        }
        let gb = self.group_by(&self.get_column_names())?;
        let firsts: Vec<usize> = gb.groups().iter().map(|(first, _)| *first).collect();
        Ok(self.gather(&firsts))
    }

    /// Aggregate columns to a single-row DataFrame. Every `(column, ops)`
    /// pair yields one output column per op, named `{column}_{op}`.
    ///
    /// # Example
    ///
    /// ```
    /// use avocet::prelude::*;
    /// fn example(df: &DataFrame) -> Result<DataFrame> {
    ///     df.agg(&[("count", &[AggOp::Mean, AggOp::Max])], NullStrategy::Ignore)
    /// }
    /// ```
    pub fn agg(
        &self,
        columns_ops: &[(&str, &[AggOp])],
        strategy: NullStrategy,
    ) -> Result<DataFrame> {
        let mut out = Vec::new();
        for (name, ops) in columns_ops {
            let series = self.column(name)?;
            for op in ops.iter() {
                let value = series.aggregate(*op, strategy)?;
                let new_name = format!("{}_{}", name, op.name());
                out.push(Series::from_any_values(
                    &new_name,
                    op.output_dtype(series.dtype()),
                    &[value],
                )?);
            }
        }
        DataFrame::new(out)
    }

    /// Pipe different functions/closure operations that work on a DataFrame
    /// together.
    pub fn pipe<F, B>(self, f: F) -> Result<B>
    where
        F: Fn(DataFrame) -> Result<B>,
    {
        f(self)
    }

    /// Pipe different functions/closure operations that work on a DataFrame
    /// together.
    pub fn pipe_mut<F, B>(&mut self, f: F) -> Result<B>
    where
        F: Fn(&mut DataFrame) -> Result<B>,
    {
        f(self)
    }

    /// Pipe a function that takes extra arguments along with the DataFrame.
    pub fn pipe_with_args<F, B, Args>(self, f: F, args: Args) -> Result<B>
    where
        F: Fn(DataFrame, Args) -> Result<B>,
    {
        f(self, args)
    }
}

/// Build a DataFrame from column name / values pairs.
///
/// ```
/// use avocet::prelude::*;
/// let df = df! {
///     "days" => [0, 1, 2],
///     "temp" => [22.1, 19.9, 7.0]
/// }
/// .unwrap();
/// assert_eq!(df.shape(), (3, 2));
/// ```
#[macro_export]
macro_rules! df {
    ($($name:expr => $values:expr),+ $(,)?) => {
        $crate::frame::DataFrame::new(vec![
            $(<$crate::series::Series as $crate::series::NamedFrom<_, _>>::new($name, $values)),+
        ])
    };
}
