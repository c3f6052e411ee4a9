use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};

/// A reference-counted pointer to an interned [`DexString`]
pub type DexStringRc = Arc<DexString>;

/// An interned, immutable string constant.
///
/// `DexString` carries the logical text plus the two encoding facts the container format
/// needs for string data items: the UTF-16 code-unit count (the length header of a string
/// data entry) and the MUTF-8 byte encoding (CESU-8 with `U+0000` encoded as the two-byte
/// sequence `0xC0 0x80`, and supplementary characters encoded as surrogate pairs of
/// three-byte sequences).
///
/// Instances are created only by [`InternPool::intern_string`](crate::metadata::pool::InternPool::intern_string),
/// which guarantees that equal text shares one identity. Equality, ordering and hashing are
/// by the logical text; the cached MUTF-8 bytes never participate.
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::pool::InternPool;
///
/// let pool = InternPool::new();
/// let name = pool.intern_string("value");
///
/// assert_eq!(name.as_str(), "value");
/// assert_eq!(name.utf16_size(), 5);
/// assert_eq!(name.mutf8_bytes(), b"value");
/// ```
pub struct DexString {
    /// The logical text value
    string: String,
    /// Lazily computed MUTF-8 encoding of `string`
    mutf8: OnceLock<Vec<u8>>,
}

impl DexString {
    /// Creates a new string constant; callers go through the intern pool instead.
    pub(crate) fn new(value: impl Into<String>) -> Self {
        DexString {
            string: value.into(),
            mutf8: OnceLock::new(),
        }
    }

    /// Returns the logical text value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Returns the number of UTF-16 code units the text occupies.
    ///
    /// This is the unit of the length header in a string data item, not the number of
    /// characters: supplementary characters count as two.
    #[must_use]
    pub fn utf16_size(&self) -> usize {
        self.string.encode_utf16().count()
    }

    /// Returns the MUTF-8 encoding of the text, computing and caching it on first use.
    #[must_use]
    pub fn mutf8_bytes(&self) -> &[u8] {
        self.mutf8.get_or_init(|| mutf8_encode(&self.string))
    }

    /// Returns the number of bytes the MUTF-8 encoding occupies
    #[must_use]
    pub fn mutf8_size(&self) -> usize {
        self.mutf8_bytes().len()
    }
}

/// Encodes text as MUTF-8: one byte per ASCII character except NUL, two bytes for `U+0000`
/// and `U+0080..=U+07FF`, and three bytes per UTF-16 code unit for everything else
/// (supplementary characters become two three-byte surrogate encodings).
#[allow(clippy::cast_possible_truncation)]
fn mutf8_encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());

    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => bytes.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                bytes.push(0xC0 | (unit >> 6) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                bytes.push(0xE0 | (unit >> 12) as u8);
                bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }

    bytes
}

impl PartialEq for DexString {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for DexString {}

impl PartialOrd for DexString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DexString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string.cmp(&other.string)
    }
}

impl Hash for DexString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl AsRef<str> for DexString {
    fn as_ref(&self) -> &str {
        &self.string
    }
}

impl fmt::Debug for DexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DexString({:?})", self.string)
    }
}

impl fmt::Display for DexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        let value = DexString::new("Ljava/util/List;");
        assert_eq!(value.as_str(), "Ljava/util/List;");
        assert_eq!(value.as_ref(), "Ljava/util/List;");
    }

    #[test]
    fn test_utf16_size_ascii() {
        assert_eq!(DexString::new("value").utf16_size(), 5);
        assert_eq!(DexString::new("").utf16_size(), 0);
    }

    #[test]
    fn test_utf16_size_bmp() {
        // Two-byte and three-byte UTF-8 characters are still one UTF-16 unit each
        assert_eq!(DexString::new("héllo").utf16_size(), 5);
        assert_eq!(DexString::new("€").utf16_size(), 1);
    }

    #[test]
    fn test_utf16_size_supplementary() {
        // U+1D11E is a surrogate pair in UTF-16
        assert_eq!(DexString::new("𝄞").utf16_size(), 2);
        assert_eq!(DexString::new("a𝄞b").utf16_size(), 4);
    }

    #[test]
    fn test_mutf8_ascii() {
        let value = DexString::new("accessFlags");
        assert_eq!(value.mutf8_bytes(), b"accessFlags");
        assert_eq!(value.mutf8_size(), 11);
    }

    #[test]
    fn test_mutf8_nul_is_two_bytes() {
        let value = DexString::new("a\u{0}b");
        assert_eq!(value.mutf8_bytes(), &[0x61, 0xC0, 0x80, 0x62]);
    }

    #[test]
    fn test_mutf8_two_byte_range() {
        // U+00E9 encodes the same as regular UTF-8
        let value = DexString::new("é");
        assert_eq!(value.mutf8_bytes(), &[0xC3, 0xA9]);
    }

    #[test]
    fn test_mutf8_three_byte_range() {
        // U+20AC encodes the same as regular UTF-8
        let value = DexString::new("€");
        assert_eq!(value.mutf8_bytes(), &[0xE2, 0x82, 0xAC]);
    }

    #[test]
    fn test_mutf8_supplementary_is_surrogate_encoded() {
        // U+1D11E: UTF-16 surrogates 0xD834 0xDD1E, each encoded as three bytes
        let value = DexString::new("𝄞");
        assert_eq!(
            value.mutf8_bytes(),
            &[0xED, 0xA0, 0xB4, 0xED, 0xB4, 0x9E]
        );
        assert_eq!(value.mutf8_size(), 6);
    }

    #[test]
    fn test_mutf8_is_cached() {
        let value = DexString::new("cached");
        let first = value.mutf8_bytes().as_ptr();
        let second = value.mutf8_bytes().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_equality_ignores_cache() {
        let left = DexString::new("same");
        let right = DexString::new("same");
        // Filling the cache on one side must not affect equality or hashing
        let _ = left.mutf8_bytes();
        assert_eq!(left, right);
        assert_ne!(DexString::new("same"), DexString::new("other"));
    }

    #[test]
    fn test_ordering_is_by_text() {
        let a = DexString::new("Ljava/lang/Object;");
        let b = DexString::new("Ljava/util/List;");
        assert!(a < b);
    }

    #[test]
    fn test_display_and_debug() {
        let value = DexString::new("Ljava/util/List;");
        assert_eq!(format!("{}", value), "Ljava/util/List;");
        assert_eq!(format!("{:?}", value), "DexString(\"Ljava/util/List;\")");
    }
}
