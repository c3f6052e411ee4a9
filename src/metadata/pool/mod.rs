//! Thread-safe interning of strings, types and method references.
//!
//! Every constant the annotation layer stores is interned here first: equal text, equal
//! descriptors and equal method triples all resolve to one shared instance for the lifetime
//! of the pool, so identity comparison with [`Arc::ptr_eq`] is meaningful and repeated
//! values cost one allocation total.
//!
//! Interning is idempotent and safe to call from any number of threads without external
//! locking. When two threads race to intern the same key, one insertion wins and both
//! callers receive the winning instance.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use dexscope::metadata::pool::InternPool;
//!
//! let pool = InternPool::new();
//!
//! let first = pool.intern_type("Ljava/lang/String;")?;
//! let second = pool.intern_type("Ljava/lang/String;")?;
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok::<(), dexscope::Error>(())
//! ```

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        constants::{DexString, DexStringRc, MethodRef, MethodRefRc},
        typesystem::{DexType, DexTypeRc, TypeFlavor},
    },
    Error, Result,
};

/// Central intern pool for strings, types and method references.
///
/// The pool owns every instance it hands out. String and type entries are keyed by their
/// text and kept in sorted order, so [`strings`](InternPool::strings) and
/// [`types`](InternPool::types) iterate deterministically; method entries are keyed by
/// their class/name/prototype triple.
///
/// # Thread Safety
///
/// All operations take `&self` and use lock-free or sharded containers internally, so an
/// `InternPool` can be shared across threads directly or behind an [`Arc`].
pub struct InternPool {
    /// Interned strings, keyed and ordered by their text
    strings: SkipMap<String, DexStringRc>,
    /// Interned types, keyed and ordered by their descriptor
    types: SkipMap<String, DexTypeRc>,
    /// Interned method references, keyed by class descriptor, name and prototype
    methods: DashMap<(String, String, String), MethodRefRc>,
}

impl InternPool {
    /// Creates a new, empty pool
    #[must_use]
    pub fn new() -> Self {
        InternPool {
            strings: SkipMap::new(),
            types: SkipMap::new(),
            methods: DashMap::new(),
        }
    }

    /// Interns a string, returning the shared instance for its text.
    ///
    /// Calling this twice with equal text returns the same instance.
    pub fn intern_string(&self, text: &str) -> DexStringRc {
        if let Some(entry) = self.strings.get(text) {
            return entry.value().clone();
        }

        self.strings
            .get_or_insert(text.to_string(), Arc::new(DexString::new(text)))
            .value()
            .clone()
    }

    /// Interns a type by its descriptor, returning the shared instance.
    ///
    /// The descriptor is validated first; array descriptors intern their component types
    /// as well, so `[[I` guarantees `[I` and `I` are present afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if `descriptor` is not a single well-formed
    /// type descriptor. `V` is accepted as a plain type but rejected as an array component.
    pub fn intern_type(&self, descriptor: &str) -> Result<DexTypeRc> {
        if let Some(entry) = self.types.get(descriptor) {
            return Ok(entry.value().clone());
        }

        let (flavor, component) = self.parse_descriptor(descriptor)?;
        let built = Arc::new(DexType::new(
            self.intern_string(descriptor),
            flavor,
            component,
        ));

        Ok(self
            .types
            .get_or_insert(descriptor.to_string(), built)
            .value()
            .clone())
    }

    /// Interns a method reference, returning the shared instance for the triple.
    ///
    /// The class descriptor must denote a class type and `prototype` must be a well-formed
    /// `(<parameters>)<return>` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if the class descriptor or the prototype is
    /// malformed.
    pub fn intern_method(
        &self,
        class_descriptor: &str,
        name: &str,
        prototype: &str,
    ) -> Result<MethodRefRc> {
        let key = (
            class_descriptor.to_string(),
            name.to_string(),
            prototype.to_string(),
        );
        if let Some(found) = self.methods.get(&key) {
            return Ok(found.clone());
        }

        // Validate both descriptors before touching any pool, so a failed intern
        // leaves no partial entries behind
        if !class_descriptor.starts_with('L') {
            return Err(Error::InvalidDescriptor(class_descriptor.to_string()));
        }
        validate_prototype(prototype)?;

        let class = self.intern_type(class_descriptor)?;
        let built = Arc::new(MethodRef::new(
            class,
            self.intern_string(name),
            self.intern_string(prototype),
        ));

        Ok(self.methods.entry(key).or_insert(built).clone())
    }

    /// Returns the number of interned strings
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Returns the number of interned types
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the number of interned method references
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Iterates the interned strings in ascending text order
    pub fn strings(&self) -> impl Iterator<Item = DexStringRc> + '_ {
        self.strings.iter().map(|entry| entry.value().clone())
    }

    /// Iterates the interned types in ascending descriptor order
    pub fn types(&self) -> impl Iterator<Item = DexTypeRc> + '_ {
        self.types.iter().map(|entry| entry.value().clone())
    }

    /// Splits a validated descriptor into its flavor and, for arrays, its interned
    /// component type.
    fn parse_descriptor(&self, descriptor: &str) -> Result<(TypeFlavor, Option<DexTypeRc>)> {
        let bytes = descriptor.as_bytes();

        match bytes.first() {
            Some(b'[') => {
                let component = &descriptor[1..];
                if component.starts_with('V') {
                    return Err(Error::InvalidDescriptor(descriptor.to_string()));
                }
                let component = self
                    .intern_type(component)
                    .map_err(|_| Error::InvalidDescriptor(descriptor.to_string()))?;
                Ok((TypeFlavor::Array, Some(component)))
            }
            Some(b'L') => {
                if bytes.len() < 3 || bytes[bytes.len() - 1] != b';' {
                    return Err(Error::InvalidDescriptor(descriptor.to_string()));
                }
                // The binary name between 'L' and ';' may not restart a descriptor
                if bytes[1..bytes.len() - 1]
                    .iter()
                    .any(|byte| matches!(byte, b'.' | b'(' | b')' | b';' | b'['))
                {
                    return Err(Error::InvalidDescriptor(descriptor.to_string()));
                }
                Ok((TypeFlavor::Class, None))
            }
            Some(&byte) if bytes.len() == 1 => match TypeFlavor::from_descriptor_byte(byte) {
                Some(flavor) => Ok((flavor, None)),
                None => Err(Error::InvalidDescriptor(descriptor.to_string())),
            },
            _ => Err(Error::InvalidDescriptor(descriptor.to_string())),
        }
    }
}

impl Default for InternPool {
    fn default() -> Self {
        InternPool::new()
    }
}

/// Validates a `(<parameters>)<return>` prototype descriptor.
fn validate_prototype(prototype: &str) -> Result<()> {
    let bytes = prototype.as_bytes();
    if bytes.first() != Some(&b'(') {
        return Err(Error::InvalidDescriptor(prototype.to_string()));
    }

    let mut at = 1;
    while at < bytes.len() && bytes[at] != b')' {
        // Parameters are field descriptors, so void is not allowed here
        if bytes[at] == b'V' {
            return Err(Error::InvalidDescriptor(prototype.to_string()));
        }
        at = scan_field_descriptor(prototype, at)?;
    }
    if at >= bytes.len() {
        return Err(Error::InvalidDescriptor(prototype.to_string()));
    }

    at += 1;
    if at < bytes.len() && bytes[at] == b'V' {
        at += 1;
    } else {
        at = scan_field_descriptor(prototype, at)?;
    }

    if at == bytes.len() {
        Ok(())
    } else {
        Err(Error::InvalidDescriptor(prototype.to_string()))
    }
}

/// Scans one field descriptor starting at `at`, returning the offset just past it.
fn scan_field_descriptor(prototype: &str, at: usize) -> Result<usize> {
    let bytes = prototype.as_bytes();
    let mut cursor = at;

    while bytes.get(cursor) == Some(&b'[') {
        cursor += 1;
    }

    match bytes.get(cursor) {
        Some(b'L') => match bytes[cursor..].iter().position(|&byte| byte == b';') {
            Some(offset) => Ok(cursor + offset + 1),
            None => Err(Error::InvalidDescriptor(prototype.to_string())),
        },
        Some(&byte) if byte != b'V' && TypeFlavor::from_descriptor_byte(byte).is_some() => {
            Ok(cursor + 1)
        }
        _ => Err(Error::InvalidDescriptor(prototype.to_string())),
    }
}
