use std::{
    fmt,
    hash::{Hash, Hasher},
    slice,
};

use crate::{metadata::constants::Constant, Error, Result};

/// An ordered list of constant values with freeze-once mutability.
///
/// Arrays start out mutable so callers can build them up element by element, then become
/// permanently read-only through [`set_immutable`](ConstArray::set_immutable). Every pushed
/// element must itself already be immutable, so a frozen array is transitively frozen.
///
/// Equality and hashing cover the elements only; the lifecycle state of two arrays never
/// affects whether they compare equal.
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::constants::{ConstArray, Constant};
///
/// let mut array = ConstArray::new();
/// array.push(Constant::Integer(1))?;
/// array.push(Constant::Integer(2))?;
/// array.set_immutable();
///
/// assert_eq!(array.len(), 2);
/// assert!(array.push(Constant::Integer(3)).is_err());
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConstArray {
    /// The element values, in insertion order
    elements: Vec<Constant>,
    /// False once the array has been frozen
    mutable: bool,
}

impl ConstArray {
    /// Creates a new, empty, mutable array
    #[must_use]
    pub fn new() -> Self {
        ConstArray {
            elements: Vec::new(),
            mutable: true,
        }
    }

    /// Creates a new mutable array with room for `capacity` elements
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ConstArray {
            elements: Vec::with_capacity(capacity),
            mutable: true,
        }
    }

    /// Appends a value to the array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Immutable`] if the array has been frozen, or [`Error::Mutable`] if
    /// `value` embeds an annotation or array that is itself still mutable.
    pub fn push(&mut self, value: Constant) -> Result<()> {
        if !self.mutable {
            return Err(Error::Immutable);
        }
        value.require_immutable()?;

        self.elements.push(value);
        Ok(())
    }

    /// Freezes the array, rejecting every later [`push`](ConstArray::push)
    pub fn set_immutable(&mut self) {
        self.mutable = false;
    }

    /// True while the array still accepts elements
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Returns the element at `index`, if present
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Constant> {
        self.elements.get(index)
    }

    /// Returns the number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the array holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the elements in insertion order
    pub fn iter(&self) -> slice::Iter<'_, Constant> {
        self.elements.iter()
    }

    /// Builds an already-frozen array from collected elements.
    ///
    /// Callers must only pass elements that are themselves immutable.
    pub(crate) fn frozen_from(elements: Vec<Constant>) -> Self {
        ConstArray {
            elements,
            mutable: false,
        }
    }
}

impl Default for ConstArray {
    fn default() -> Self {
        ConstArray::new()
    }
}

impl PartialEq for ConstArray {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for ConstArray {}

impl Hash for ConstArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl<'a> IntoIterator for &'a ConstArray {
    type Item = &'a Constant;
    type IntoIter = slice::Iter<'a, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for ConstArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, value) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut array = ConstArray::new();
        array.push(Constant::Integer(9)).unwrap();
        array.push(Constant::Null).unwrap();
        array.set_immutable();

        assert_eq!(array.len(), 2);
        assert!(!array.is_empty());
        assert_eq!(array.get(0), Some(&Constant::Integer(9)));
        assert_eq!(array.get(1), Some(&Constant::Null));
        assert_eq!(array.get(2), None);
    }

    #[test]
    fn test_push_after_freeze_fails() {
        let mut array = ConstArray::new();
        array.push(Constant::Integer(1)).unwrap();
        array.set_immutable();

        assert!(!array.is_mutable());
        assert!(matches!(
            array.push(Constant::Integer(2)),
            Err(Error::Immutable)
        ));
        // The failed push must not have changed the contents
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_push_rejects_mutable_nested_array() {
        let inner = ConstArray::new();
        let mut outer = ConstArray::new();

        assert!(matches!(
            outer.push(Constant::Array(inner)),
            Err(Error::Mutable)
        ));
    }

    #[test]
    fn test_equality_ignores_lifecycle_state() {
        let mut frozen = ConstArray::new();
        frozen.push(Constant::Integer(7)).unwrap();
        frozen.set_immutable();

        let mut open = ConstArray::new();
        open.push(Constant::Integer(7)).unwrap();

        assert_eq!(frozen, open);
    }

    #[test]
    fn test_iteration_order() {
        let mut array = ConstArray::with_capacity(3);
        for value in 0..3 {
            array.push(Constant::Integer(value)).unwrap();
        }
        array.set_immutable();

        let seen: Vec<i32> = array
            .iter()
            .map(|value| match value {
                Constant::Integer(raw) => *raw,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
