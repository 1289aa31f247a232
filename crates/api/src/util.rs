//! Buffer partition helpers for concatenated composite encodings
//!
//! Composite keys, ciphertexts, and signatures are ordered concatenations of
//! their component encodings with no framing; component sizes are fixed and
//! known from the scheme, so splitting is total once the overall length
//! matches.

/// Splits `buf` into consecutive frames of the given sizes.
///
/// Returns `None` unless the sizes sum to exactly `buf.len()`.
pub fn partition<'a>(buf: &'a [u8], sizes: &[usize]) -> Option<Vec<&'a [u8]>> {
    let mut rest = buf;
    let mut frames = Vec::with_capacity(sizes.len());
    for &size in sizes {
        if rest.len() < size {
            return None;
        }
        let (frame, tail) = rest.split_at(size);
        frames.push(frame);
        rest = tail;
    }
    if rest.is_empty() {
        Some(frames)
    } else {
        None
    }
}
