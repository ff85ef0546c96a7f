//! Time-ordered comb identifier generation.
//!
//! # Responsibility
//! - Produce globally unique 128-bit identifiers whose leading bytes sort by
//!   creation time when compared as raw bytes.
//! - Stay lock-free: every call is pure, seeded from the thread-safe random
//!   source behind `Uuid::new_v4` and the system clock.
//!
//! # Invariants
//! - Bytes 0..6 hold the UTC creation time in milliseconds, big-endian.
//! - The remaining bytes keep their random payload, so collisions stay
//!   negligible even across concurrent generators.
//! - Version/variant bits of the underlying v4 UUID are untouched.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const TIME_PREFIX_BYTES: usize = 6;

/// Generates a new comb identifier.
///
/// A clock regression only degrades ordering quality; uniqueness is carried
/// by the random payload and is never affected.
pub fn new_comb() -> Uuid {
    comb_with_millis(unix_millis_now())
}

/// Extracts the embedded creation time (epoch milliseconds) from a comb id.
pub fn timestamp_millis(id: Uuid) -> i64 {
    let bytes = id.as_bytes();
    let mut millis: i64 = 0;
    for byte in &bytes[..TIME_PREFIX_BYTES] {
        millis = (millis << 8) | i64::from(*byte);
    }
    millis
}

fn comb_with_millis(millis: i64) -> Uuid {
    let mut bytes = Uuid::new_v4().into_bytes();
    // Low 48 bits of the millisecond clock, most significant byte first.
    let prefix = (millis as u64 & 0xFFFF_FFFF_FFFF).to_be_bytes();
    bytes[..TIME_PREFIX_BYTES].copy_from_slice(&prefix[8 - TIME_PREFIX_BYTES..]);
    Uuid::from_bytes(bytes)
}

pub(crate) fn unix_millis_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{comb_with_millis, new_comb, timestamp_millis};

    #[test]
    fn prefix_roundtrips_to_the_encoded_millis() {
        let id = comb_with_millis(1_700_000_000_123);
        assert_eq!(timestamp_millis(id), 1_700_000_000_123);
    }

    #[test]
    fn version_and_variant_bits_survive_the_prefix_overwrite() {
        let id = new_comb();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn later_millis_sort_higher_as_raw_bytes() {
        let earlier = comb_with_millis(1_000);
        let later = comb_with_millis(2_000);
        assert!(earlier.as_bytes()[..6] < later.as_bytes()[..6]);
    }
}
