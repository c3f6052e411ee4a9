use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while interning constants and
/// assembling annotation records. Each variant is a specific, typed contract violation so that
/// callers can distinguish programming errors (mutating a frozen value) from bad input
/// (a malformed type descriptor).
///
/// # Error Categories
///
/// ## Mutability Contract Errors
/// - [`Error::Immutable`] - Mutation attempted on an already-frozen instance
/// - [`Error::Mutable`] - A frozen instance was required but a mutable one was supplied
///
/// ## Structural Errors
/// - [`Error::DuplicateElement`] - An annotation already carries an element with that name
/// - [`Error::DuplicateAnnotation`] - An annotation set already carries that annotation kind
///
/// ## Intern Pool Errors
/// - [`Error::InvalidDescriptor`] - A type descriptor does not have a recognizable shape
///
/// # Examples
///
/// ```rust
/// use dexscope::{Error, metadata::pool::InternPool};
///
/// let pool = InternPool::new();
/// match pool.intern_type("Qjava/util/List;") {
///     Ok(_) => println!("interned"),
///     Err(Error::InvalidDescriptor(descriptor)) => {
///         eprintln!("rejected descriptor: {}", descriptor);
///     }
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Mutation was attempted on an instance that has already been frozen.
    ///
    /// Every [`Annotation`](crate::metadata::annotations::Annotation),
    /// [`Annotations`](crate::metadata::annotations::Annotations) and
    /// [`ConstArray`](crate::metadata::constants::ConstArray) is populated while mutable and
    /// then frozen exactly once. Inserting into a frozen instance is a programming-contract
    /// violation, never a recoverable runtime condition, so it aborts the operation instead of
    /// being silently ignored.
    #[error("Instance is immutable")]
    Immutable,

    /// A frozen instance was required, but the supplied one is still mutable.
    ///
    /// Nesting a mutable annotation inside a constant would allow the "immutable" value graph
    /// to change after construction; the embedding site rejects it up front.
    #[error("Instance is still mutable")]
    Mutable,

    /// The annotation already carries an element with the given name.
    ///
    /// Element names are unique within one annotation. `add` fails fast on a duplicate;
    /// use `put` for replace-in-place semantics.
    #[error("Duplicate annotation element name - {0}")]
    DuplicateElement(String),

    /// The annotation set already carries an annotation of the given kind.
    ///
    /// An element (class, field or method) carries at most one annotation per kind; the
    /// duplicate kind's descriptor is attached for diagnostics.
    #[error("Duplicate annotation kind - {0}")]
    DuplicateAnnotation(String),

    /// The given type descriptor does not have a recognizable shape.
    ///
    /// Accepted shapes are the single-character primitive codes (`V Z B S C I J F D`),
    /// class forms `Lpkg/Name;` and array forms `[` followed by a valid descriptor. The
    /// offending descriptor is attached for diagnostics.
    #[error("Bad type descriptor - {0}")]
    InvalidDescriptor(String),
}
