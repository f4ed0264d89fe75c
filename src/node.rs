//! Node identifier types for time-based UUIDs.

use rand::RngCore;

/// A 48-bit node identifier, typically an IEEE-802 hardware address or a
/// randomized substitute.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId([u8; 6]);

impl NodeId {
    /// Wraps explicit node bytes, e.g. a hardware address read from the host.
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Draws a random substitute for a hardware address.
    ///
    /// The multicast bit of the first octet is set so the result cannot
    /// collide with any IEEE-802 address (RFC4122 §4.5).
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 6];
        rng.fill_bytes(&mut bytes);
        bytes[0] |= 0x01;
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl From<[u8; 6]> for NodeId {
    fn from(src: [u8; 6]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::NodeId;
    use rand::rngs::mock::StepRng;

    /// Sets the multicast bit on random substitutes
    #[test]
    fn sets_multicast_bit_on_random_substitutes() {
        let mut rng = StepRng::new(0, 0x0123_4567_89ab_cdef);
        for _ in 0..64 {
            assert_eq!(NodeId::random(&mut rng).as_bytes()[0] & 0x01, 0x01);
        }
    }

    /// Passes explicit hardware address bytes through unchanged
    #[test]
    fn passes_explicit_bytes_through() {
        let bytes = [0x08, 0x06, 0x07, 0x05, 0x03, 0x09];
        assert_eq!(NodeId::from_bytes(bytes).as_bytes(), &bytes);
        assert_eq!(NodeId::from(bytes).as_ref(), &bytes);
    }
}
