//! Annotation records and the system annotations built on top of them.
//!
//! An [`Annotation`] is a kind, a visibility and an ordered list of named constant values.
//! Classes, fields and methods each carry at most one annotation per kind, collected in an
//! [`Annotations`] set. Both containers follow a freeze-once lifecycle: populated while
//! mutable, then frozen exactly once, after which they are safe to share across threads.
//!
//! The toolchain itself communicates through annotations as well. Nested-class structure,
//! generic signatures, declared exceptions and annotation-interface defaults are recorded
//! as [`Visibility::System`] annotations under the well-known kinds in
//! [`SYSTEM_ANNOTATION`], assembled by the `make_*` builder functions.
//!
//! # Key Components
//!
//! - [`Annotation`] / [`AnnotationElement`]: One record and its named values
//! - [`Annotations`]: The per-item set, unique by kind, iterated in kind order
//! - [`Visibility`]: Runtime observability of a record, with its container encodings
//! - [`make_annotation_default`], [`make_enclosing_class`], [`make_enclosing_method`],
//!   [`make_inner_class`], [`make_member_classes`], [`make_signature`], [`make_throws`]:
//!   Builders for the seven system annotation kinds
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::{
//!     access::AccessFlags,
//!     annotations::{make_inner_class, Annotations},
//!     pool::InternPool,
//! };
//!
//! let pool = InternPool::new();
//! let inner = make_inner_class(
//!     &pool,
//!     Some(pool.intern_string("Builder")),
//!     AccessFlags::PUBLIC | AccessFlags::STATIC,
//! )?;
//!
//! let mut attached = Annotations::new();
//! attached.add(inner)?;
//! attached.set_immutable();
//! assert_eq!(attached.len(), 1);
//! # Ok::<(), dexscope::Error>(())
//! ```

mod system;
mod types;

pub use system::{
    make_annotation_default, make_enclosing_class, make_enclosing_method, make_inner_class,
    make_member_classes, make_signature, make_throws, make_type_array, SYSTEM_ANNOTATION,
};
pub use types::{Annotation, AnnotationElement, Annotations, Visibility, VISIBILITY};
