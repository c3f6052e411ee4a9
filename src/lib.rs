// Copyright 2025 dexscope Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(dead_code)]

//! # dexscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/dexscope.svg)](https://crates.io/crates/dexscope)
//! [![Documentation](https://docs.rs/dexscope/badge.svg)](https://docs.rs/dexscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/dexscope/dexscope/blob/main/LICENSE-APACHE)
//!
//! Construction of DEX annotation metadata in pure Rust. `dexscope` models the constants,
//! interning and annotation records a Dalvik/ART class emitter produces while laying out a
//! DEX file: interned strings, type descriptors and method references, freeze-once
//! annotation containers, and the system annotations the toolchain attaches to describe
//! nested classes, generic signatures, declared exceptions and annotation defaults.
//!
//! ## Features
//!
//! - **Interned constants** - Strings, types and method references share one identity per
//!   value through a thread-safe pool
//! - **System annotations** - One builder per `dalvik/annotation` kind, returning frozen,
//!   schema-exact records
//! - **Signature segmentation** - Lossless splitting of generic signatures along
//!   class-type references for constant-pool reuse
//! - **Freeze-once containers** - Annotations and value arrays are populated while
//!   mutable, frozen exactly once, then safely shared across threads
//! - **MUTF-8 aware strings** - Interned strings carry their UTF-16 size and cached
//!   Modified UTF-8 encoding
//! - **Memory safe** - No unsafe code, with typed errors for every contract violation
//!
//! ## Quick Start
//!
//! Add `dexscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dexscope = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use dexscope::prelude::*;
//!
//! let pool = InternPool::new();
//! let inner = make_inner_class(
//!     &pool,
//!     Some(pool.intern_string("Builder")),
//!     AccessFlags::PUBLIC | AccessFlags::STATIC,
//! )?;
//! assert_eq!(inner.visibility(), Visibility::System);
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust
//! use dexscope::metadata::{annotations::make_signature, pool::InternPool};
//!
//! let pool = InternPool::new();
//!
//! // The signature annotation stores its string pre-split along class references
//! let signature = pool.intern_string("Ljava/util/List<Ljava/lang/String;>;");
//! let annotation = make_signature(&pool, &signature)?;
//!
//! println!("{}", annotation);
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `dexscope` is organized into a handful of focused modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and functions
//! - [`metadata::pool`] - Thread-safe interning of strings, types and method references
//! - [`metadata::typesystem`] - Descriptor-based type representation
//! - [`metadata::constants`] - The closed constant-value set annotation elements carry
//! - [`metadata::annotations`] - Annotation records, per-item sets and system builders
//! - [`metadata::signatures`] - Signature segmentation
//! - [`Error`] and [`Result`] - Typed error handling
//!
//! ### Interning
//!
//! The [`InternPool`] is the entry point. Every string, type descriptor and method
//! reference is resolved through it, so equal values share one [`std::sync::Arc`]
//! identity. A deduplicating constant pool falls out of this directly: identity equality
//! is value equality.
//!
//! ### System Annotations
//!
//! The toolchain records structural facts as annotations with system visibility, one
//! fixed kind each. The builders in [`metadata::annotations`] assemble these records from
//! already-resolved constants and freeze them before returning, so a returned annotation
//! can never be altered afterwards.
//!
//! ## Thread Safety
//!
//! The pool takes `&self` everywhere and is safe to share across threads directly or
//! behind an [`std::sync::Arc`]; racing interns of the same value converge on one
//! instance. Frozen annotations and arrays permit no further mutation, which makes them
//! safe for concurrent read-only sharing in however many worker threads a surrounding
//! pipeline uses.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Contract violations are
//! typed, not panics:
//!
//! ```rust
//! use dexscope::{metadata::pool::InternPool, Error};
//!
//! let pool = InternPool::new();
//! match pool.intern_type("Ljava/util/List") {
//!     Ok(_) => unreachable!("descriptor is unterminated"),
//!     Err(Error::InvalidDescriptor(descriptor)) => {
//!         println!("rejected: {}", descriptor);
//!     }
//!     Err(other) => println!("unexpected: {}", other),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! The test suite covers the segmentation edge cases, schema exactness of every system
//! annotation kind and cross-thread interning identity:
//!
//! ```bash
//! cargo test
//! cargo bench  # criterion benchmarks for the segmenter
//! ```

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// This module provides a curated selection of the most frequently used pieces from
/// across the dexscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use dexscope::prelude::*;
///
/// let pool = InternPool::new();
/// let list = pool.intern_type("Ljava/util/List;")?;
/// assert_eq!(list.human_name(), "java.util.List");
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod prelude;

/// Constant model, interning and annotation machinery for DEX emission
///
/// This module implements the metadata layer a class emitter works against:
///
/// # Key Components
///
/// ## Interning
/// - [`metadata::pool`] - Thread-safe pools for strings, types and method references
/// - [`metadata::typesystem`] - Interned types with descriptor, flavor and component
///
/// ## Constants
/// - [`metadata::constants`] - The closed constant-value set for annotation elements
/// - [`metadata::access`] - The DEX access-flag set
///
/// ## Annotations
/// - [`metadata::annotations`] - Records, per-item sets and the system builders
/// - [`metadata::signatures`] - Segmentation behind the signature annotation
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::{annotations::make_throws, pool::InternPool};
///
/// let pool = InternPool::new();
/// let declared = [pool.intern_type("Ljava/io/IOException;")?];
/// let throws = make_throws(&pool, &declared)?;
/// assert!(!throws.is_mutable());
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod metadata;

/// `dexscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use dexscope::{metadata::typesystem::DexTypeRc, prelude::InternPool, Result};
///
/// fn intern_pair(pool: &InternPool) -> Result<(DexTypeRc, DexTypeRc)> {
///     Ok((pool.intern_type("I")?, pool.intern_type("[I")?))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dexscope` Error type
///
/// The main error type for all operations in this crate. Covers lifecycle violations of
/// the freeze-once containers, duplicate names and kinds, and malformed descriptors.
///
/// # Examples
///
/// ```rust
/// use dexscope::{metadata::pool::InternPool, Error};
///
/// let pool = InternPool::new();
/// match pool.intern_type("not a descriptor") {
///     Err(Error::InvalidDescriptor(text)) => println!("rejected: {}", text),
///     other => println!("unexpected: {:?}", other.is_ok()),
/// }
/// ```
pub use error::Error;

/// Central intern pool for strings, types and method references.
///
/// See [`metadata::pool::InternPool`] for the interning contract and thread-safety
/// guarantees.
///
/// # Example
///
/// ```rust
/// use dexscope::InternPool;
///
/// let pool = InternPool::new();
/// let name = pool.intern_string("accessFlags");
/// assert_eq!(name.utf16_size(), 11);
/// ```
pub use metadata::pool::InternPool;
