use crate::array::TypedArray;
use crate::datatypes::{AvocetDataType, BooleanArray};
use crate::error::{AvocetError, Result};

impl<T: AvocetDataType> TypedArray<T> {
    /// Keep the rows where `mask` is true. Null mask slots drop the row.
    pub fn filter(&self, mask: &BooleanArray) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(AvocetError::ShapeMismatch(
                format!(
                    "filter mask length {} does not match array length {}",
                    mask.len(),
                    self.len()
                )
                .into(),
            ));
        }
        let values = self
            .values()
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| matches!(keep, Some(true)))
            .map(|(v, _)| v.clone())
            .collect();
        Ok(Self::from_vec(self.name(), values))
    }

    /// Take values by index, bound checked.
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&oob) = indices.iter().find(|&&i| i >= len) {
            return Err(AvocetError::OutOfBounds(
                format!("take index {} exceeds array length {}", oob, len).into(),
            ));
        }
        Ok(self.gather(indices))
    }

    // Take values by index without bound checks; callers pass indices they
    // derived from this array's own length.
    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        let values = indices.iter().map(|&i| self.values()[i].clone()).collect();
        Self::from_vec(self.name(), values)
    }
}
