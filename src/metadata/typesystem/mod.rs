//! Type representation for Dalvik type descriptors.
//!
//! This module models the closed type system the annotation layer works with: the eight
//! primitive types, `void`, class types and array types, each identified by its canonical
//! descriptor string. Types are interned through
//! [`InternPool`](crate::metadata::pool::InternPool), so one descriptor maps to one shared
//! [`DexType`] instance for the lifetime of the pool.
//!
//! # Key Components
//!
//! - [`DexType`]: An interned type, carrying its descriptor, flavor and array component
//! - [`TypeFlavor`]: The type category a descriptor denotes
//! - [`DESCRIPTOR`]: The one-byte descriptor codes for primitive types and `void`
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::pool::InternPool;
//!
//! let pool = InternPool::new();
//!
//! let list = pool.intern_type("Ljava/util/List;")?;
//! assert_eq!(list.human_name(), "java.util.List");
//!
//! let ints = pool.intern_type("[I")?;
//! assert_eq!(ints.human_name(), "int[]");
//! # Ok::<(), dexscope::Error>(())
//! ```

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::metadata::constants::DexStringRc;

/// A reference-counted pointer to an interned [`DexType`]
pub type DexTypeRc = Arc<DexType>;

/// One-byte descriptor codes for the primitive types and `void`
#[allow(non_snake_case)]
pub mod DESCRIPTOR {
    /// `boolean`
    pub const BOOLEAN: u8 = b'Z';
    /// `byte`
    pub const BYTE: u8 = b'B';
    /// `short`
    pub const SHORT: u8 = b'S';
    /// `char`
    pub const CHAR: u8 = b'C';
    /// `int`
    pub const INT: u8 = b'I';
    /// `long`
    pub const LONG: u8 = b'J';
    /// `float`
    pub const FLOAT: u8 = b'F';
    /// `double`
    pub const DOUBLE: u8 = b'D';
    /// `void`
    pub const VOID: u8 = b'V';
}

/// The category of type a descriptor denotes.
///
/// Primitive flavors and [`Void`](TypeFlavor::Void) correspond to a single descriptor byte;
/// [`Class`](TypeFlavor::Class) covers `L...;` descriptors and [`Array`](TypeFlavor::Array)
/// covers `[...` descriptors of any dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum TypeFlavor {
    /// `boolean`, descriptor `Z`
    Boolean,
    /// `byte`, descriptor `B`
    Byte,
    /// `short`, descriptor `S`
    Short,
    /// `char`, descriptor `C`
    Char,
    /// `int`, descriptor `I`
    Int,
    /// `long`, descriptor `J`
    Long,
    /// `float`, descriptor `F`
    Float,
    /// `double`, descriptor `D`
    Double,
    /// `void`, descriptor `V`, valid only as a method return type
    Void,
    /// A class or interface type, descriptor `L<binary name>;`
    Class,
    /// An array type, descriptor `[` followed by the component descriptor
    Array,
}

impl TypeFlavor {
    /// Returns the one-byte descriptor code for this flavor, `None` for [`Class`](TypeFlavor::Class)
    /// and [`Array`](TypeFlavor::Array)
    #[must_use]
    pub fn descriptor_byte(&self) -> Option<u8> {
        match self {
            TypeFlavor::Boolean => Some(DESCRIPTOR::BOOLEAN),
            TypeFlavor::Byte => Some(DESCRIPTOR::BYTE),
            TypeFlavor::Short => Some(DESCRIPTOR::SHORT),
            TypeFlavor::Char => Some(DESCRIPTOR::CHAR),
            TypeFlavor::Int => Some(DESCRIPTOR::INT),
            TypeFlavor::Long => Some(DESCRIPTOR::LONG),
            TypeFlavor::Float => Some(DESCRIPTOR::FLOAT),
            TypeFlavor::Double => Some(DESCRIPTOR::DOUBLE),
            TypeFlavor::Void => Some(DESCRIPTOR::VOID),
            TypeFlavor::Class | TypeFlavor::Array => None,
        }
    }

    /// Resolves a one-byte descriptor code back to its flavor
    #[must_use]
    pub fn from_descriptor_byte(byte: u8) -> Option<TypeFlavor> {
        TypeFlavor::iter().find(|flavor| flavor.descriptor_byte() == Some(byte))
    }

    /// Returns the source-level name for primitive flavors and `void`, `None` otherwise
    #[must_use]
    pub fn primitive_name(&self) -> Option<&'static str> {
        match self {
            TypeFlavor::Boolean => Some("boolean"),
            TypeFlavor::Byte => Some("byte"),
            TypeFlavor::Short => Some("short"),
            TypeFlavor::Char => Some("char"),
            TypeFlavor::Int => Some("int"),
            TypeFlavor::Long => Some("long"),
            TypeFlavor::Float => Some("float"),
            TypeFlavor::Double => Some("double"),
            TypeFlavor::Void => Some("void"),
            TypeFlavor::Class | TypeFlavor::Array => None,
        }
    }

    /// True for the flavors encoded as a single descriptor byte, including `void`
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeFlavor::Class | TypeFlavor::Array)
    }
}

/// An interned type, identified by its canonical descriptor.
///
/// Two `DexType` values are equal exactly when their descriptors are equal; ordering and
/// hashing follow the descriptor text as well. Array types keep a reference to their
/// component type, so `[[I` links to `[I` which links to `I`.
///
/// Instances are created only by
/// [`InternPool::intern_type`](crate::metadata::pool::InternPool::intern_type), which
/// validates the descriptor and guarantees identity sharing.
pub struct DexType {
    /// The canonical descriptor, e.g. `Ljava/lang/String;` or `[I`
    descriptor: DexStringRc,
    /// The category this descriptor denotes
    flavor: TypeFlavor,
    /// The component type, present exactly for [`TypeFlavor::Array`]
    component: Option<DexTypeRc>,
}

impl DexType {
    /// Creates a new type; callers go through the intern pool instead.
    pub(crate) fn new(
        descriptor: DexStringRc,
        flavor: TypeFlavor,
        component: Option<DexTypeRc>,
    ) -> Self {
        DexType {
            descriptor,
            flavor,
            component,
        }
    }

    /// Returns the canonical descriptor string
    #[must_use]
    pub fn descriptor(&self) -> &DexStringRc {
        &self.descriptor
    }

    /// Returns the type category
    #[must_use]
    pub fn flavor(&self) -> TypeFlavor {
        self.flavor
    }

    /// Returns the component type for arrays, `None` for every other flavor
    #[must_use]
    pub fn component(&self) -> Option<&DexTypeRc> {
        self.component.as_ref()
    }

    /// True if this is an array type
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.flavor == TypeFlavor::Array
    }

    /// Returns the source-level spelling of this type.
    ///
    /// Primitives use their keyword, class types use their dotted binary name and arrays
    /// append `[]` per dimension: `Ljava/util/Map$Entry;` becomes `java.util.Map$Entry`
    /// and `[[I` becomes `int[][]`.
    #[must_use]
    pub fn human_name(&self) -> String {
        match self.flavor {
            TypeFlavor::Class => {
                let descriptor = self.descriptor.as_str();
                descriptor[1..descriptor.len() - 1].replace('/', ".")
            }
            TypeFlavor::Array => {
                let mut name = match self.component() {
                    Some(component) => component.human_name(),
                    None => String::new(),
                };
                name.push_str("[]");
                name
            }
            // Covered exhaustively by primitive_name
            _ => self.flavor.primitive_name().unwrap_or_default().to_string(),
        }
    }
}

impl PartialEq for DexType {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for DexType {}

impl PartialOrd for DexType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DexType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.descriptor.cmp(&other.descriptor)
    }
}

impl Hash for DexType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
    }
}

impl fmt::Debug for DexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DexType({})", self.descriptor.as_str())
    }
}

impl fmt::Display for DexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor.as_str())
    }
}
