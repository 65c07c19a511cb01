//! Value equality helpers used by tests.
use crate::frame::DataFrame;
use crate::series::Series;

impl Series {
    /// Check rowwise value equality; null equals null. Column names are not
    /// compared.
    pub fn series_equal(&self, other: &Series) -> bool {
        if self.dtype() != other.dtype() || self.len() != other.len() {
            return false;
        }
        (0..self.len()).all(|i| self.get(i) == other.get(i))
    }
}

impl DataFrame {
    /// Check whether two DataFrames hold equal columns in the same order.
    pub fn frame_equal(&self, other: &DataFrame) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.get_columns()
            .iter()
            .zip(other.get_columns().iter())
            .all(|(a, b)| a.name() == b.name() && a.series_equal(b))
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_series_equal() {
        let a = Series::new("a", [1, 2, 3]);
        let b = Series::new("b", [1, 2, 3]);
        assert!(a.series_equal(&b));

        let c = Series::new("c", [1.0, 2.0, 3.0]);
        assert!(!a.series_equal(&c));
    }

    #[test]
    fn null_equals_null() {
        let a = Series::new("a", [Some(1), None]);
        let b = Series::new("b", [Some(1), None]);
        assert!(a.series_equal(&b));
    }

    #[test]
    fn test_df_equal() {
        let df1 = df! {
            "a" => [1, 2, 3],
            "b" => ["x", "y", "z"]
        }
        .unwrap();
        let df2 = df1.clone();
        assert!(df1.frame_equal(&df2));
        assert!(!df1.frame_equal(&df1.head(Some(2))));
    }
}
