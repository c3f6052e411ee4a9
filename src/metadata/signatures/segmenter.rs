use std::iter::FusedIterator;

/// Lazy iterator over the segments of one signature string.
///
/// Created by [`split_signature`](crate::metadata::signatures::split_signature). Yields
/// borrowed, non-empty substrings of the input whose in-order concatenation reproduces the
/// input exactly. Scanning is byte-wise; every boundary byte (`L`, `;`, `<`) is ASCII, so
/// all split points fall on UTF-8 character boundaries and non-ASCII identifier characters
/// flow through unsplit.
pub struct SignatureSegments<'a> {
    /// The signature being segmented
    raw: &'a str,
    /// Start of the next segment, equal to `raw.len()` once exhausted
    at: usize,
}

impl<'a> SignatureSegments<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        SignatureSegments { raw, at: 0 }
    }
}

impl<'a> Iterator for SignatureSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.raw.as_bytes();
        if self.at >= bytes.len() {
            return None;
        }

        let start = self.at;
        let mut end = start + 1;

        if bytes[start] == b'L' {
            // A class-type reference: runs through its ';', or up to a '<' that opens
            // generic arguments, or to end-of-string if neither appears
            while end < bytes.len() {
                let byte = bytes[end];
                if byte == b';' {
                    end += 1;
                    break;
                }
                if byte == b'<' {
                    break;
                }
                end += 1;
            }
        } else {
            // Filler text: runs up to the next class-type reference
            while end < bytes.len() && bytes[end] != b'L' {
                end += 1;
            }
        }

        self.at = end;
        Some(&self.raw[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.raw.len() - self.at;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for SignatureSegments<'_> {}
