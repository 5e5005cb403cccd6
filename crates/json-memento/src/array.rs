//! Multi-dimensional numeric arrays.
//!
//! The engine only needs one thing from an array: [`ArrayLike::to_nested`],
//! which flattens it to nested sequences of plain numbers. [`DenseArray`] is a
//! small row-major implementation covering every primitive numeric width.

use std::any::Any;
use std::fmt;

use crate::error::{BoxError, MementoError, Result};
use crate::instance::Instance;
use crate::value::Value;

pub trait ArrayLike {
    /// Nested sequences, one level per dimension.
    fn to_nested(&self) -> std::result::Result<Value, BoxError>;
}

/// Numeric element of a [`DenseArray`].
pub trait Element: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    fn to_value(self) -> Value;
}

macro_rules! element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn to_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

element!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Row-major n-dimensional array.
///
/// Floating-point elements follow [`Value::from`]: NaN and infinities have no
/// JSON form and flatten to `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseArray<T: Element> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Element> DenseArray<T> {
    /// Creates an array, checking that `shape` accounts for every element.
    ///
    /// Shapes whose element count overflows, or which would flatten to more
    /// nested sequences than can be allocated, are rejected.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
        if element_count(&shape) != Some(data.len()) {
            return Err(MementoError::InvalidShape {
                shape,
                len: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    fn nest(&self, dims: &[usize], data: &[T]) -> Value {
        match dims.split_first() {
            // Zero-dimensional: a scalar.
            None => data.first().map_or(Value::Null, |x| x.to_value()),
            Some((_, [])) => Value::Seq(data.iter().map(|x| x.to_value()).collect()),
            Some((&len, rest)) => {
                let stride: usize = rest.iter().product();
                Value::Seq(
                    (0..len)
                        .map(|i| self.nest(rest, &data[i * stride..(i + 1) * stride]))
                        .collect(),
                )
            }
        }
    }
}

/// Product of the dimensions, or `None` when some prefix of them either
/// overflows or names more values than a single allocation can hold.
fn element_count(shape: &[usize]) -> Option<usize> {
    let limit = isize::MAX as usize / std::mem::size_of::<Value>();
    shape.iter().try_fold(1usize, |count, &dim| {
        count.checked_mul(dim).filter(|&count| count <= limit)
    })
}

impl<T: Element> ArrayLike for DenseArray<T> {
    fn to_nested(&self) -> std::result::Result<Value, BoxError> {
        Ok(self.nest(&self.shape, &self.data))
    }
}

impl<T: Element> Instance for DenseArray<T> {
    fn type_name(&self) -> &str {
        "DenseArray"
    }

    fn as_array(&self) -> Option<&dyn ArrayLike> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Instance) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_dimensional() {
        let array = DenseArray::from_vec(vec![1u8, 2, 3]);
        assert_eq!(array.to_nested().unwrap(), Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn test_two_dimensional() {
        let array = DenseArray::new(vec![2, 3], vec![1i32, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(
            array.to_nested().unwrap(),
            Value::from(vec![vec![1, 2, 3], vec![4, 5, 6]])
        );
    }

    #[test]
    fn test_three_dimensional() {
        let array = DenseArray::new(vec![2, 1, 2], vec![0.5f64, 1.5, 2.5, 3.5]).unwrap();
        assert_eq!(
            array.to_nested().unwrap(),
            Value::from(vec![vec![vec![0.5, 1.5]], vec![vec![2.5, 3.5]]])
        );
    }

    #[test]
    fn test_empty_dimension() {
        let array = DenseArray::<f32>::new(vec![2, 0], vec![]).unwrap();
        assert_eq!(
            array.to_nested().unwrap(),
            Value::Seq(vec![Value::Seq(vec![]), Value::Seq(vec![])])
        );
    }

    #[test]
    fn test_scalar() {
        let array = DenseArray::new(vec![], vec![7i64]).unwrap();
        assert_eq!(array.to_nested().unwrap(), Value::from(7));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = DenseArray::new(vec![2, 2], vec![1i16, 2, 3]).unwrap_err();
        assert!(matches!(err, MementoError::InvalidShape { len: 3, .. }));
    }

    #[test]
    fn test_shape_overflow() {
        let err = DenseArray::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
        assert!(matches!(err, MementoError::InvalidShape { len: 0, .. }));
    }

    #[test]
    fn test_huge_leading_dimension_over_empty_axis() {
        let err = DenseArray::<u8>::new(vec![usize::MAX, 0], vec![]).unwrap_err();
        assert!(matches!(err, MementoError::InvalidShape { .. }));
    }

    #[test]
    fn test_non_finite_elements_become_null() {
        let array = DenseArray::from_vec(vec![1.0f64, f64::NAN, f64::INFINITY]);
        assert_eq!(
            array.to_nested().unwrap(),
            Value::Seq(vec![Value::from(1.0), Value::Null, Value::Null])
        );
    }

    #[test]
    fn test_dyn_eq_compares_contents() {
        let a = Value::object(DenseArray::from_vec(vec![1u32, 2]));
        let b = Value::object(DenseArray::from_vec(vec![1u32, 2]));
        let c = Value::object(DenseArray::from_vec(vec![1u32, 3]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
