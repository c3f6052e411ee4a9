use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::metadata::{constants::DexStringRc, typesystem::DexTypeRc};

/// A reference-counted pointer to an interned [`MethodRef`]
pub type MethodRefRc = Arc<MethodRef>;

/// An interned reference to a method: defining class, member name and prototype descriptor.
///
/// The prototype descriptor is the raw `(<parameters>)<return>` form, e.g.
/// `(ILjava/lang/String;)V`. Equality, ordering and hashing cover all three parts, so two
/// methods with the same name on different classes are distinct.
///
/// Instances are created only by
/// [`InternPool::intern_method`](crate::metadata::pool::InternPool::intern_method).
pub struct MethodRef {
    /// The class the method is defined on
    class: DexTypeRc,
    /// The member name, e.g. `toString`
    name: DexStringRc,
    /// The prototype descriptor, e.g. `()Ljava/lang/String;`
    descriptor: DexStringRc,
}

impl MethodRef {
    /// Creates a new method reference; callers go through the intern pool instead.
    pub(crate) fn new(class: DexTypeRc, name: DexStringRc, descriptor: DexStringRc) -> Self {
        MethodRef {
            class,
            name,
            descriptor,
        }
    }

    /// Returns the defining class
    #[must_use]
    pub fn class(&self) -> &DexTypeRc {
        &self.class
    }

    /// Returns the member name
    #[must_use]
    pub fn name(&self) -> &DexStringRc {
        &self.name
    }

    /// Returns the prototype descriptor
    #[must_use]
    pub fn descriptor(&self) -> &DexStringRc {
        &self.descriptor
    }
}

impl PartialEq for MethodRef {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.name == other.name && self.descriptor == other.descriptor
    }
}

impl Eq for MethodRef {}

impl PartialOrd for MethodRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MethodRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.descriptor.cmp(&other.descriptor))
    }
}

impl Hash for MethodRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.name.hash(state);
        self.descriptor.hash(state);
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MethodRef({}->{}{})",
            self.class.descriptor().as_str(),
            self.name.as_str(),
            self.descriptor.as_str()
        )
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}:{}",
            self.class.human_name(),
            self.name.as_str(),
            self.descriptor.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::pool::InternPool;

    #[test]
    fn test_accessors() {
        let pool = InternPool::new();
        let method = pool
            .intern_method("Ljava/util/List;", "get", "(I)Ljava/lang/Object;")
            .unwrap();

        assert_eq!(method.class().descriptor().as_str(), "Ljava/util/List;");
        assert_eq!(method.name().as_str(), "get");
        assert_eq!(method.descriptor().as_str(), "(I)Ljava/lang/Object;");
    }

    #[test]
    fn test_equality_covers_all_parts() {
        let pool = InternPool::new();
        let get = pool
            .intern_method("Ljava/util/List;", "get", "(I)Ljava/lang/Object;")
            .unwrap();
        let same = pool
            .intern_method("Ljava/util/List;", "get", "(I)Ljava/lang/Object;")
            .unwrap();
        let other_name = pool
            .intern_method("Ljava/util/List;", "remove", "(I)Ljava/lang/Object;")
            .unwrap();
        let other_class = pool
            .intern_method("Ljava/util/Set;", "get", "(I)Ljava/lang/Object;")
            .unwrap();

        assert_eq!(get, same);
        assert_ne!(get, other_name);
        assert_ne!(get, other_class);
    }

    #[test]
    fn test_display_uses_human_class_name() {
        let pool = InternPool::new();
        let method = pool
            .intern_method("Ljava/lang/Object;", "toString", "()Ljava/lang/String;")
            .unwrap();

        assert_eq!(
            format!("{}", method),
            "java.lang.Object.toString:()Ljava/lang/String;"
        );
    }
}
