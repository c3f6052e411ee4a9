use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Access flags as they appear in class, field and method definitions.
    ///
    /// The numeric values match the container format, so a flag set round-trips through
    /// [`bits`](AccessFlags::bits) losslessly. Bits without a defined name are preserved by
    /// [`from_bits_retain`](AccessFlags::from_bits_retain) but skipped when rendering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// Visible only to the defining class
        const PRIVATE = 0x0002;
        /// Visible to the package and subclasses
        const PROTECTED = 0x0004;
        /// Per-class rather than per-instance
        const STATIC = 0x0008;
        /// Not subclassable, overridable or reassignable
        const FINAL = 0x0010;
        /// Lock acquired around method invocation
        const SYNCHRONIZED = 0x0020;
        /// On fields: special access rules for concurrency. On methods: a compiler-added
        /// type bridge
        const VOLATILE_BRIDGE = 0x0040;
        /// On fields: excluded from default serialization. On methods: final argument is a
        /// rest argument
        const TRANSIENT_VARARGS = 0x0080;
        /// Implemented in native code
        const NATIVE = 0x0100;
        /// An interface rather than a class
        const INTERFACE = 0x0200;
        /// Not directly instantiable
        const ABSTRACT = 0x0400;
        /// Strict floating-point arithmetic
        const STRICT = 0x0800;
        /// Not directly present in source code
        const SYNTHETIC = 0x1000;
        /// An annotation interface
        const ANNOTATION = 0x2000;
        /// An enum class or an enum constant field
        const ENUM = 0x4000;
        /// A constructor method
        const CONSTRUCTOR = 0x1_0000;
        /// Method was declared `synchronized` in source
        const DECLARED_SYNCHRONIZED = 0x2_0000;
    }
}

impl fmt::Display for AccessFlags {
    /// Renders the named flags lowercase, space separated, in ascending bit order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(&name.to_lowercase())?;
            first = false;
        }
        Ok(())
    }
}
