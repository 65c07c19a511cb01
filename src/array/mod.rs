//! The typed heart of every Series column.
use crate::datatypes::{AvocetDataType, BooleanArray, DataType, Field};
use crate::error::{AvocetError, Result};

pub mod aggregate;
pub mod comparison;
mod ops;

/// A named column of optional values with a fixed element type.
pub struct TypedArray<T: AvocetDataType> {
    field: Field,
    values: Vec<Option<T::Native>>,
}

impl<T: AvocetDataType> Clone for TypedArray<T> {
    fn clone(&self) -> Self {
        TypedArray {
            field: self.field.clone(),
            values: self.values.clone(),
        }
    }
}

impl<T: AvocetDataType> TypedArray<T> {
    pub fn new_from_slice(name: &str, v: &[T::Native]) -> Self {
        Self::from_vec(name, v.iter().cloned().map(Some).collect())
    }

    pub fn new_from_opt_slice(name: &str, v: &[Option<T::Native>]) -> Self {
        Self::from_vec(name, v.to_vec())
    }

    pub(crate) fn from_vec(name: &str, values: Vec<Option<T::Native>>) -> Self {
        TypedArray {
            field: Field::new(name, T::get_dtype()),
            values,
        }
    }

    pub fn full_null(name: &str, length: usize) -> Self {
        Self::from_vec(name, vec![None; length])
    }

    pub fn name(&self) -> &str {
        self.field.name()
    }

    pub fn rename(&mut self, name: &str) {
        self.field.rename(name)
    }

    pub fn dtype(&self) -> DataType {
        self.field.dtype()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a single value. Out of bounds and null both resolve to `None`.
    pub fn get(&self, index: usize) -> Option<&T::Native> {
        self.values.get(index).and_then(|v| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&T::Native>> + '_ {
        self.values.iter().map(|v| v.as_ref())
    }

    pub(crate) fn values(&self) -> &[Option<T::Native>] {
        &self.values
    }

    /// Count the null values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Get a mask of the null values.
    pub fn is_null(&self) -> BooleanArray {
        BooleanArray::from_vec(
            self.name(),
            self.values.iter().map(|v| Some(v.is_none())).collect(),
        )
    }

    /// Get a mask of the non-null values.
    pub fn is_not_null(&self) -> BooleanArray {
        BooleanArray::from_vec(
            self.name(),
            self.values.iter().map(|v| Some(v.is_some())).collect(),
        )
    }

    /// Append the values of `other` to this array.
    pub fn append(&mut self, other: &Self) {
        self.values.extend(other.values.iter().cloned());
    }

    /// Slice the array along the rows.
    pub fn slice(&self, offset: usize, length: usize) -> Result<Self> {
        if offset + length > self.len() {
            return Err(AvocetError::OutOfBounds(
                format!(
                    "slice offset {} with length {} exceeds array length {}",
                    offset,
                    length,
                    self.len()
                )
                .into(),
            ));
        }
        Ok(Self::from_vec(
            self.name(),
            self.values[offset..offset + length].to_vec(),
        ))
    }

    pub fn head(&self, length: Option<usize>) -> Self {
        let length = std::cmp::min(length.unwrap_or(10), self.len());
        Self::from_vec(self.name(), self.values[..length].to_vec())
    }

    pub fn tail(&self, length: Option<usize>) -> Self {
        let length = std::cmp::min(length.unwrap_or(10), self.len());
        Self::from_vec(self.name(), self.values[self.len() - length..].to_vec())
    }

    pub fn reverse(&self) -> Self {
        Self::from_vec(self.name(), self.values.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn construction() {
        let a = Int64Array::new_from_slice("a", &[1, 2, 3]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.dtype(), DataType::Int64);
        assert_eq!(a.get(1), Some(&2));
        assert_eq!(a.get(10), None);
    }

    #[test]
    fn null_handling() {
        let a = Float64Array::new_from_opt_slice("a", &[Some(1.0), None, Some(3.0)]);
        assert_eq!(a.null_count(), 1);
        assert_eq!(
            Vec::from_iter(a.is_null().iter().map(|v| v.copied())),
            vec![Some(false), Some(true), Some(false)]
        );
    }

    #[test]
    fn slice_bounds() {
        let a = Int64Array::new_from_slice("a", &[1, 2, 3]);
        assert_eq!(a.slice(1, 2).unwrap().len(), 2);
        assert!(a.slice(2, 2).is_err());
    }

    #[test]
    fn head_tail_reverse() {
        let a = Int64Array::new_from_slice("a", &[1, 2, 3, 4]);
        assert_eq!(a.head(Some(2)).get(1), Some(&2));
        assert_eq!(a.tail(Some(1)).get(0), Some(&4));
        assert_eq!(a.reverse().get(0), Some(&4));
    }
}
