//! Constant values carried by annotation elements.
//!
//! Annotation elements hold values drawn from a closed set: interned strings, interned
//! types, interned method references, integers, nested arrays, nested annotations and the
//! known-null value. [`Constant`] is that closed set; the interned variants share identity
//! through [`InternPool`](crate::metadata::pool::InternPool), and the container variants
//! carry their own freeze-once lifecycle.
//!
//! # Key Components
//!
//! - [`Constant`]: The closed value set for annotation elements
//! - [`DexString`]: Interned text with UTF-16 sizing and MUTF-8 encoding
//! - [`MethodRef`]: Interned class/name/prototype method reference
//! - [`ConstArray`]: Ordered value list with freeze-once mutability
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::{constants::Constant, pool::InternPool};
//!
//! let pool = InternPool::new();
//! let value = Constant::Type(pool.intern_type("Ljava/util/List;")?);
//!
//! assert_eq!(value.type_name(), "type");
//! assert_eq!(format!("{}", value), "java.util.List");
//! # Ok::<(), dexscope::Error>(())
//! ```

mod array;
mod method;
mod string;

use std::fmt;

pub use array::ConstArray;
pub use method::{MethodRef, MethodRefRc};
pub use string::{DexString, DexStringRc};

use crate::{
    metadata::{annotations::Annotation, typesystem::DexTypeRc},
    Error, Result,
};

/// A constant value carried by an annotation element.
///
/// The set is closed: every value an annotation element can hold is one of these variants.
/// String, type and method values are interned, so equal values share identity; array and
/// annotation values embed their container and must be frozen before they are stored in an
/// enclosing container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// An interned string value
    String(DexStringRc),
    /// An interned type value
    Type(DexTypeRc),
    /// An interned method reference value
    Method(MethodRefRc),
    /// A 32-bit integer value
    Integer(i32),
    /// A nested value array
    Array(ConstArray),
    /// A nested annotation
    Annotation(Annotation),
    /// The known-null value
    Null,
}

impl Constant {
    /// Returns the fixed name of this value's kind
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Constant::String(_) => "string",
            Constant::Type(_) => "type",
            Constant::Method(_) => "method",
            Constant::Integer(_) => "int",
            Constant::Array(_) => "array",
            Constant::Annotation(_) => "annotation",
            Constant::Null => "known-null",
        }
    }

    /// Verifies that this value may be embedded into a container.
    ///
    /// Interned and scalar values are always embeddable; array and annotation values must
    /// have been frozen first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mutable`] if the value is an array or annotation that is still
    /// mutable.
    pub fn require_immutable(&self) -> Result<()> {
        match self {
            Constant::Array(array) if array.is_mutable() => Err(Error::Mutable),
            Constant::Annotation(annotation) if annotation.is_mutable() => Err(Error::Mutable),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::String(value) => write!(f, "{:?}", value.as_str()),
            Constant::Type(value) => f.write_str(&value.human_name()),
            Constant::Method(value) => write!(f, "{value}"),
            Constant::Integer(value) => write!(f, "{value}"),
            Constant::Array(value) => write!(f, "{value}"),
            Constant::Annotation(value) => write!(f, "{value}"),
            Constant::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::pool::InternPool;

    #[test]
    fn test_type_names() {
        let pool = InternPool::new();

        assert_eq!(
            Constant::String(pool.intern_string("x")).type_name(),
            "string"
        );
        assert_eq!(Constant::Integer(0).type_name(), "int");
        assert_eq!(Constant::Array(ConstArray::new()).type_name(), "array");
        assert_eq!(Constant::Null.type_name(), "known-null");
    }

    #[test]
    fn test_display_scalars() {
        let pool = InternPool::new();

        assert_eq!(
            format!("{}", Constant::String(pool.intern_string("hi\nthere"))),
            "\"hi\\nthere\""
        );
        assert_eq!(
            format!("{}", Constant::Type(pool.intern_type("[I").unwrap())),
            "int[]"
        );
        assert_eq!(format!("{}", Constant::Integer(-8)), "-8");
        assert_eq!(format!("{}", Constant::Null), "null");
    }

    #[test]
    fn test_display_array() {
        let pool = InternPool::new();
        let mut array = ConstArray::new();
        array
            .push(Constant::String(pool.intern_string("a")))
            .unwrap();
        array.push(Constant::Integer(2)).unwrap();
        array.set_immutable();

        assert_eq!(format!("{}", Constant::Array(array)), "{\"a\", 2}");
    }

    #[test]
    fn test_require_immutable() {
        assert!(Constant::Integer(1).require_immutable().is_ok());
        assert!(Constant::Null.require_immutable().is_ok());

        let open = ConstArray::new();
        assert!(matches!(
            Constant::Array(open).require_immutable(),
            Err(Error::Mutable)
        ));

        let mut frozen = ConstArray::new();
        frozen.set_immutable();
        assert!(Constant::Array(frozen).require_immutable().is_ok());
    }

    #[test]
    fn test_interned_values_compare_by_content() {
        let pool = InternPool::new();
        let left = Constant::Type(pool.intern_type("Ljava/util/List;").unwrap());
        let right = Constant::Type(pool.intern_type("Ljava/util/List;").unwrap());

        assert_eq!(left, right);
        assert_ne!(left, Constant::Null);
    }
}
