use core::cmp::Ordering;

/// Compare two encoded map keys by the RFC 8949 deterministic-ordering rule.
///
/// RFC 8949 §4.2.1 orders map entries by the bytewise lexicographic order of their
/// deterministic encodings, comparing bytes as unsigned values. Because preferred
/// serialization makes the first byte encode both major type and argument width,
/// this differs from the older RFC 7049 length-first rule: a longer encoding can
/// sort before a shorter one (`82 01 02` precedes `f4`).
///
/// Equal encodings compare equal; duplicates are neither detected nor rejected.
#[inline]
#[must_use]
pub fn cmp_encoded_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}
