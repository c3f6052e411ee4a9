//! Metadata representation for DEX annotation construction.
//!
//! This module contains the constant model, interning and annotation machinery a class
//! emitter draws on while laying out a DEX file: interned strings, types and method
//! references, the closed constant-value set, freeze-once annotation records and the
//! system annotations the toolchain attaches on its own behalf.
//!
//! # Key Components
//!
//! - [`pool`] - Thread-safe interning of strings, types and method references
//! - [`typesystem`] - Descriptor-based type representation
//! - [`constants`] - The closed constant-value set for annotation elements
//! - [`annotations`] - Annotation records, per-item sets and the system builders
//! - [`signatures`] - Signature segmentation for the signature annotation
//! - [`access`] - The DEX access-flag set
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::{annotations::make_signature, pool::InternPool};
//!
//! let pool = InternPool::new();
//! let signature = pool.intern_string("Ljava/util/List<Ljava/lang/String;>;");
//!
//! let annotation = make_signature(&pool, &signature)?;
//! println!("{}", annotation);
//! # Ok::<(), dexscope::Error>(())
//! ```

/// Implementation of the DEX access-flag set
pub mod access;
/// Implementation of annotation records and the system annotation builders
pub mod annotations;
/// Implementation of the constant values annotation elements carry
pub mod constants;
/// Implementation of string, type and method interning
pub mod pool;
/// Implementation of signature segmentation
pub mod signatures;
/// Implementation of the descriptor-based type system
pub mod typesystem;
