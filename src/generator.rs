//! UUIDv1 generator-related types

use crate::{NodeId, Uuid, Variant};
use rand::RngCore;

/// Number of 100-nanosecond intervals between the Gregorian reform date
/// (1582-10-15) and the Unix epoch.
pub const GREGORIAN_UNIX_OFFSET_TICKS: u64 = 0x01b2_1dd2_1381_4000;

const MAX_SEQUENCE: u16 = (1 << 14) - 1;

/// Represents a UUIDv1 generator that owns the last-used timestamp and the
/// clock sequence mandated by RFC4122 §4.1.5.
///
/// The clock sequence is seeded from the random number generator at
/// construction and incremented whenever the tick count fails to advance, so
/// identifiers stay distinct across clock stalls and rollbacks. The scope of
/// that guarantee is the generator instance; the following example shares one
/// generator across threads with Rust's standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid1::V1Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V1Generator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R> {
    ticks: u64,
    sequence: u16,
    node: NodeId,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> V1Generator<R> {
    /// Creates a generator with a random node identifier substitute.
    pub fn new(mut rng: R) -> Self {
        let node = NodeId::random(&mut rng);
        Self::with_node(rng, node)
    }

    /// Creates a generator that stamps UUIDs with the given node identifier.
    pub fn with_node(mut rng: R, node: NodeId) -> Self {
        let sequence = rng.next_u32() as u16 & MAX_SEQUENCE;
        Self {
            ticks: 0,
            sequence,
            node,
            rng,
        }
    }

    /// Returns the node identifier stamped into generated UUIDs.
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Generates a new UUIDv1 object from the current system time.
    pub fn generate(&mut self) -> Uuid {
        use std::time;
        let since_unix = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards");
        self.generate_core(
            GREGORIAN_UNIX_OFFSET_TICKS
                + since_unix.as_secs() * 10_000_000
                + u64::from(since_unix.subsec_nanos()) / 100,
        )
    }

    /// Generates a new UUIDv1 object from a given tick count (100-nanosecond
    /// intervals since 1582-10-15).
    ///
    /// The clock sequence is incremented modulo 2^14 when `ticks` does not
    /// advance past the previously used value; otherwise it is retained.
    ///
    /// # Panics
    ///
    /// Panics if the argument is not a 60-bit positive integer.
    pub fn generate_core(&mut self, ticks: u64) -> Uuid {
        assert!(
            0 < ticks && ticks < 1 << 60,
            "`ticks` must be a 60-bit positive integer"
        );

        if ticks <= self.ticks {
            // clock stalled or rolled back
            self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
        }
        self.ticks = ticks;

        Uuid::from_fields_v1(
            ticks,
            1,
            Variant::Rfc4122.to_bits(),
            self.sequence,
            self.node.as_bytes().to_vec(),
        )
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1
/// object for each call of `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid1::V1Generator;
///
/// V1Generator::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RngCore> Iterator for V1Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RngCore> std::iter::FusedIterator for V1Generator<R> {}

#[cfg(test)]
mod tests {
    use super::{V1Generator, GREGORIAN_UNIX_OFFSET_TICKS, MAX_SEQUENCE};
    use crate::{NodeId, Variant};
    use rand::rngs::mock::StepRng;

    const TICKS: u64 = 0x0123_4567_89ab_cdef;

    fn test_generator() -> V1Generator<StepRng> {
        let rng = StepRng::new(0x0123_4567_89ab_cdef, 0x1111_1111_1111_1111);
        V1Generator::with_node(rng, NodeId::from_bytes([0x08, 0x06, 0x07, 0x05, 0x03, 0x09]))
    }

    /// Holds the clock sequence while the tick count advances
    #[test]
    fn holds_clock_sequence_while_ticks_advance() {
        let mut g = test_generator();
        let first = g.generate_core(TICKS);
        let second = g.generate_core(TICKS + 1);
        let third = g.generate_core(TICKS + 100);
        assert_eq!(second.clock_sequence(), first.clock_sequence());
        assert_eq!(third.clock_sequence(), first.clock_sequence());
        assert_eq!(third.timestamp(), TICKS + 100);
    }

    /// Increments the clock sequence on clock stalls and rollbacks
    #[test]
    fn increments_clock_sequence_on_stall_and_rollback() {
        let mut g = test_generator();
        let seq = g.generate_core(TICKS).clock_sequence();

        let stalled = g.generate_core(TICKS);
        assert_eq!(stalled.clock_sequence(), (seq + 1) & MAX_SEQUENCE);
        assert_eq!(stalled.timestamp(), TICKS);

        let rolled_back = g.generate_core(TICKS - 5_000);
        assert_eq!(rolled_back.clock_sequence(), (seq + 2) & MAX_SEQUENCE);
        assert_eq!(rolled_back.timestamp(), TICKS - 5_000);
    }

    /// Wraps the clock sequence at fourteen bits
    #[test]
    fn wraps_clock_sequence_at_fourteen_bits() {
        let mut g = test_generator();
        let seq = g.generate_core(TICKS).clock_sequence();
        let mut last = seq;
        for _ in 0..(1 << 14) {
            last = g.generate_core(TICKS).clock_sequence();
        }
        assert_eq!(last, seq);
    }

    /// Stamps version, variant, and node into every UUID
    #[test]
    fn stamps_version_variant_and_node() {
        let mut g = test_generator();
        let e = g.generate_core(TICKS);
        assert_eq!(e.version(), 1);
        assert_eq!(e.variant(), Variant::Rfc4122);
        assert_eq!(e.node(), g.node().as_bytes());
        assert_eq!(e.size(), 16);
    }

    /// Produces distinct pairs of timestamp and clock sequence
    #[test]
    fn produces_distinct_timestamp_sequence_pairs() {
        use std::collections::HashSet;
        let mut g = test_generator();
        let mut seen = HashSet::new();
        for i in 0..10_000u64 {
            let e = g.generate_core(TICKS - i.min(4_000));
            assert!(seen.insert((e.timestamp(), e.clock_sequence())));
        }
    }

    /// Encodes an up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        let mut g = V1Generator::new(rand::thread_rng());
        for _ in 0..1_000 {
            let since_unix = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards");
            let ticks_now = GREGORIAN_UNIX_OFFSET_TICKS
                + since_unix.as_secs() * 10_000_000
                + u64::from(since_unix.subsec_nanos()) / 100;
            // within one second
            assert!(g.generate().timestamp().abs_diff(ticks_now) < 10_000_000);
        }
    }
}
