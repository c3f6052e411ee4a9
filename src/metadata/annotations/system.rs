//! Construction of the system annotations the toolchain attaches on its own behalf.
//!
//! Nested classes, generic signatures, declared exceptions and annotation-interface
//! defaults all travel as ordinary annotations with [`Visibility::System`], under fixed
//! kinds in the `dalvik/annotation` namespace. One builder function per kind assembles the
//! record from already-resolved constants, freezes it and hands it back; the caller only
//! decides where to attach it.
//!
//! Builders never validate the meaning of their inputs. They intern the well-known kind
//! descriptors and element names through the supplied pool and perform structural assembly
//! only.
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::{annotations::make_throws, pool::InternPool};
//!
//! let pool = InternPool::new();
//! let declared = [
//!     pool.intern_type("Ljava/io/IOException;")?,
//!     pool.intern_type("Ljava/lang/InterruptedException;")?,
//! ];
//!
//! let throws = make_throws(&pool, &declared)?;
//! assert_eq!(
//!     format!("{}", throws),
//!     "system-annotation Ldalvik/annotation/Throws; \
//!      {value: {java.io.IOException, java.lang.InterruptedException}}"
//! );
//! # Ok::<(), dexscope::Error>(())
//! ```

use crate::{
    metadata::{
        access::AccessFlags,
        annotations::{Annotation, AnnotationElement, Visibility},
        constants::{ConstArray, Constant, DexStringRc, MethodRefRc},
        pool::InternPool,
        signatures::split_signature,
        typesystem::DexTypeRc,
    },
    Result,
};

/// Kind descriptors of the system annotations
#[allow(non_snake_case)]
pub mod SYSTEM_ANNOTATION {
    /// Holds the default element values of an annotation interface
    pub const ANNOTATION_DEFAULT: &str = "Ldalvik/annotation/AnnotationDefault;";
    /// Names the class an anonymous or local class is defined in
    pub const ENCLOSING_CLASS: &str = "Ldalvik/annotation/EnclosingClass;";
    /// Names the method an anonymous or local class is defined in
    pub const ENCLOSING_METHOD: &str = "Ldalvik/annotation/EnclosingMethod;";
    /// Records a nested class's simple name and original access flags
    pub const INNER_CLASS: &str = "Ldalvik/annotation/InnerClass;";
    /// Lists the classes a class declares as members
    pub const MEMBER_CLASSES: &str = "Ldalvik/annotation/MemberClasses;";
    /// Carries a generic signature as a segmented string array
    pub const SIGNATURE: &str = "Ldalvik/annotation/Signature;";
    /// Lists the checked exceptions a method declares
    pub const THROWS: &str = "Ldalvik/annotation/Throws;";
}

/// Starts a mutable system annotation of the given kind.
fn system_annotation(pool: &InternPool, kind: &str) -> Result<Annotation> {
    Ok(Annotation::new(pool.intern_type(kind)?, Visibility::System))
}

/// Builds an `AnnotationDefault` annotation wrapping the default element values of an
/// annotation interface.
///
/// # Errors
///
/// Returns [`Error::Mutable`](crate::Error::Mutable) if `defaults` has not been frozen.
pub fn make_annotation_default(pool: &InternPool, defaults: Annotation) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::ANNOTATION_DEFAULT)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Annotation(defaults),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds an `EnclosingClass` annotation naming the class a nested class is defined in.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
pub fn make_enclosing_class(pool: &InternPool, enclosing: DexTypeRc) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::ENCLOSING_CLASS)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Type(enclosing),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds an `EnclosingMethod` annotation naming the method a local or anonymous class is
/// defined in.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
pub fn make_enclosing_method(pool: &InternPool, enclosing: MethodRefRc) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::ENCLOSING_METHOD)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Method(enclosing),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds an `InnerClass` annotation recording a nested class's simple name and its
/// original access flags.
///
/// An anonymous class has no simple name; passing `None` stores the explicit known-null
/// value, so the `name` element is always present. The flags are stored as their raw bits.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
#[allow(clippy::cast_possible_wrap)]
pub fn make_inner_class(
    pool: &InternPool,
    name: Option<DexStringRc>,
    access_flags: AccessFlags,
) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::INNER_CLASS)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("name"),
        match name {
            Some(name) => Constant::String(name),
            None => Constant::Null,
        },
    ))?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("accessFlags"),
        Constant::Integer(access_flags.bits() as i32),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds a `MemberClasses` annotation listing the given member classes in order.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
pub fn make_member_classes(pool: &InternPool, members: &[DexTypeRc]) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::MEMBER_CLASSES)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Array(make_type_array(members)),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds a `Signature` annotation carrying the given signature as a segmented string
/// array.
///
/// The signature is split by [`split_signature`] so that class-type references become
/// standalone segments, each segment is interned, and the pieces concatenate back to the
/// original text.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
pub fn make_signature(pool: &InternPool, signature: &DexStringRc) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::SIGNATURE)?;
    let segments = split_signature(signature.as_str())
        .map(|segment| Constant::String(pool.intern_string(segment)))
        .collect();
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Array(ConstArray::frozen_from(segments)),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Builds a `Throws` annotation listing the declared exception types in order.
///
/// # Errors
///
/// Returns an error only if interning the well-known kind fails.
pub fn make_throws(pool: &InternPool, exceptions: &[DexTypeRc]) -> Result<Annotation> {
    let mut annotation = system_annotation(pool, SYSTEM_ANNOTATION::THROWS)?;
    annotation.add(AnnotationElement::new(
        pool.intern_string("value"),
        Constant::Array(make_type_array(exceptions)),
    ))?;
    annotation.set_immutable();
    Ok(annotation)
}

/// Wraps an ordered list of types as a frozen value array, preserving order.
#[must_use]
pub fn make_type_array(types: &[DexTypeRc]) -> ConstArray {
    ConstArray::frozen_from(
        types
            .iter()
            .map(|entry| Constant::Type(entry.clone()))
            .collect(),
    )
}
