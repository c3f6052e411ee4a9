//! # dexscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! functions from the dexscope library. Import this module to get quick access to the
//! essential pieces for building annotation metadata.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dexscope operations
pub use crate::Error;

/// The result type used throughout dexscope
pub use crate::Result;

// ================================================================================================
// Interning
// ================================================================================================

/// Thread-safe intern pool for strings, types and method references
pub use crate::metadata::pool::InternPool;

// ================================================================================================
// Type System
// ================================================================================================

/// Descriptor-based type representation
pub use crate::metadata::typesystem::{DexType, DexTypeRc, TypeFlavor, DESCRIPTOR};

// ================================================================================================
// Constants
// ================================================================================================

/// Constant values annotation elements carry
pub use crate::metadata::constants::{
    ConstArray, Constant, DexString, DexStringRc, MethodRef, MethodRefRc,
};

// ================================================================================================
// Annotations
// ================================================================================================

/// Annotation records and per-item annotation sets
pub use crate::metadata::annotations::{
    Annotation, AnnotationElement, Annotations, Visibility, SYSTEM_ANNOTATION, VISIBILITY,
};

/// Builders for the system annotation kinds
pub use crate::metadata::annotations::{
    make_annotation_default, make_enclosing_class, make_enclosing_method, make_inner_class,
    make_member_classes, make_signature, make_throws, make_type_array,
};

// ================================================================================================
// Access Flags and Signatures
// ================================================================================================

/// The DEX access-flag set
pub use crate::metadata::access::AccessFlags;

/// Signature segmentation
pub use crate::metadata::signatures::{split_signature, SignatureSegments};
