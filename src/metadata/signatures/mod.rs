//! Signature segmentation for generic signature annotations.
//!
//! Generic type and method shapes are carried through the container as plain signature
//! strings. A signature is not stored as one string constant, though: it is split into an
//! ordered sequence of substrings whose boundaries align with class-type references, and
//! the signature annotation stores that sequence as a string array.
//!
//! Qualified class-type references (`Lpkg/Class;`) are the substrings most likely to
//! repeat verbatim across many signatures in one artifact. Isolating each reference as its
//! own segment lets a deduplicating constant pool store it once no matter how many
//! signatures mention it, while the surrounding filler text (array markers, primitive
//! codes, generic delimiters, type-variable names) stays merged.
//!
//! # Segmentation Rules
//!
//! Scanning runs left to right in a single pass:
//!
//! - A segment starting at `L` extends through the next `;` (included), or stops just
//!   before a `<` that opens generic arguments, or runs to end-of-string if neither
//!   appears.
//! - Any other segment extends up to the next `L`, or to end-of-string.
//!
//! Segments are never empty, and concatenating them in order reproduces the input
//! exactly. Unterminated class references are not an error; segmentation is lossless
//! splitting, not signature validation.
//!
//! # Examples
//!
//! ```rust
//! use dexscope::metadata::signatures::split_signature;
//!
//! let segments: Vec<&str> =
//!     split_signature("Ljava/util/List<Ljava/lang/String;>;").collect();
//! assert_eq!(
//!     segments,
//!     vec!["Ljava/util/List", "<", "Ljava/lang/String;", ">;"]
//! );
//!
//! // A signature with no class reference stays whole
//! let segments: Vec<&str> = split_signature("(II)J").collect();
//! assert_eq!(segments, vec!["(II)J"]);
//! ```

mod segmenter;

pub use segmenter::SignatureSegments;

/// Splits a signature string into its segments.
///
/// Returns a lazy iterator over borrowed substrings of `signature`; an empty input yields
/// an empty sequence. See the [module documentation](self) for the boundary rules.
#[must_use]
pub fn split_signature(signature: &str) -> SignatureSegments<'_> {
    SignatureSegments::new(signature)
}
