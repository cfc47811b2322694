//! Stable content hashing.
//!
//! `std::hash` makes no cross-run guarantee, so document content is hashed
//! with the classic 31-multiplier polynomial over UTF-16 code units using
//! wrapping `i32` arithmetic. Equal strings always produce equal hashes.

/// Hash `content` to a stable `i32`. The empty string hashes to 0.
#[must_use]
pub fn content_hash(content: &str) -> i32 {
    content
        .encode_utf16()
        .fold(0_i32, |acc, unit| {
            acc.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}
