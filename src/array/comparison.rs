//! Comparisons between typed arrays and scalars, producing boolean masks.
//!
//! A null slot propagates into the mask; `DataFrame::filter` drops such rows,
//! which gives comparisons SQL semantics.
use std::ops::{BitAnd, BitOr, Not};

use crate::array::TypedArray;
use crate::datatypes::{AvocetNumericType, BooleanArray, Utf8Array};

/// Compare a column against a scalar of the matching native type.
pub trait CmpOps<Rhs> {
    fn eq(&self, rhs: Rhs) -> BooleanArray;
    fn neq(&self, rhs: Rhs) -> BooleanArray;
    fn gt(&self, rhs: Rhs) -> BooleanArray;
    fn gt_eq(&self, rhs: Rhs) -> BooleanArray;
    fn lt(&self, rhs: Rhs) -> BooleanArray;
    fn lt_eq(&self, rhs: Rhs) -> BooleanArray;
}

impl<T> CmpOps<T::Native> for TypedArray<T>
where
    T: AvocetNumericType,
    T::Native: PartialOrd + Copy,
{
    fn eq(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v == rhs)
    }

    fn neq(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v != rhs)
    }

    fn gt(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v > rhs)
    }

    fn gt_eq(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v >= rhs)
    }

    fn lt(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v < rhs)
    }

    fn lt_eq(&self, rhs: T::Native) -> BooleanArray {
        self.scalar_mask(|v| *v <= rhs)
    }
}

impl<'a> CmpOps<&'a str> for Utf8Array {
    fn eq(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v == rhs)
    }

    fn neq(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v != rhs)
    }

    fn gt(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v.as_str() > rhs)
    }

    fn gt_eq(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v.as_str() >= rhs)
    }

    fn lt(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v.as_str() < rhs)
    }

    fn lt_eq(&self, rhs: &str) -> BooleanArray {
        self.scalar_mask(|v| v.as_str() <= rhs)
    }
}

impl CmpOps<bool> for BooleanArray {
    fn eq(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| *v == rhs)
    }

    fn neq(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| *v != rhs)
    }

    fn gt(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| *v & !rhs)
    }

    fn gt_eq(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| *v >= rhs)
    }

    fn lt(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| !*v & rhs)
    }

    fn lt_eq(&self, rhs: bool) -> BooleanArray {
        self.scalar_mask(|v| *v <= rhs)
    }
}

impl<T: crate::datatypes::AvocetDataType> TypedArray<T> {
    fn scalar_mask<F>(&self, f: F) -> BooleanArray
    where
        F: Fn(&T::Native) -> bool,
    {
        BooleanArray::from_vec(self.name(), self.iter().map(|v| v.map(&f)).collect())
    }
}

macro_rules! impl_mask_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &BooleanArray {
            type Output = BooleanArray;

            fn $method(self, rhs: &BooleanArray) -> BooleanArray {
                let values = self
                    .iter()
                    .zip(rhs.iter())
                    .map(|(a, b)| match (a, b) {
                        (Some(a), Some(b)) => Some(*a $op *b),
                        _ => None,
                    })
                    .collect();
                BooleanArray::from_vec(self.name(), values)
            }
        }
    };
}

impl_mask_binop!(BitAnd, bitand, &);
impl_mask_binop!(BitOr, bitor, |);

impl Not for &BooleanArray {
    type Output = BooleanArray;

    fn not(self) -> BooleanArray {
        BooleanArray::from_vec(self.name(), self.iter().map(|v| v.map(|v| !v)).collect())
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn scalar_comparison_propagates_null() {
        let a = Int64Array::new_from_opt_slice("a", &[Some(1), None, Some(3)]);
        let mask = a.gt(1);
        assert_eq!(
            Vec::from_iter(mask.iter().map(|v| v.copied())),
            vec![Some(false), None, Some(true)]
        );
    }

    #[test]
    fn utf8_comparison() {
        let a = Utf8Array::new_from_slice("a", &["ham".to_string(), "spam".to_string()]);
        let mask = a.eq("spam");
        assert_eq!(mask.get(0), Some(&false));
        assert_eq!(mask.get(1), Some(&true));
    }

    #[test]
    fn mask_combinators() {
        let a = BooleanArray::new_from_opt_slice("a", &[Some(true), Some(false), None]);
        let b = BooleanArray::new_from_slice("b", &[true, true, true]);
        let and = &a & &b;
        assert_eq!(
            Vec::from_iter(and.iter().map(|v| v.copied())),
            vec![Some(true), Some(false), None]
        );
        let or = &a | &b;
        assert_eq!(or.get(1), Some(&true));
        let not = !&a;
        assert_eq!(not.get(0), Some(&false));
    }
}
