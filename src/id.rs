use std::fmt;

/// Number of fixed bytes ahead of the node in the wire layout.
const FIXED_LEN: usize = 10;

/// Mask selecting the clock-sequence bits of `sequence_hi_and_variant`.
const VARIANT_CLEAR: u8 = 0x3f;

/// Represents an RFC4122 time-based (Version 1) UUID record.
///
/// The record keeps the five fixed wire fields in unpacked form together with
/// the trailing node identifier bytes. The node is conventionally six bytes
/// long, but the record itself places no bound on it; the total wire size is
/// always ten fixed bytes plus the node length.
///
/// Values are immutable once constructed: build them with
/// [`from_fields_v1`](Uuid::from_fields_v1) or decode them with
/// [`from_slice`](Uuid::from_slice).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Uuid {
    time_low: u32,
    time_mid: u16,
    time_hi_and_version: u16,
    sequence_hi_and_variant: u8,
    sequence_low: u8,
    node: Vec<u8>,
}

impl Uuid {
    /// Total wire size of the standard layout with a six-byte node.
    pub const STANDARD_SIZE: usize = 16;

    /// Creates a UUID record from Version 1 field values.
    ///
    /// `ticks` is the 60-bit count of 100-nanosecond intervals since
    /// 1582-10-15; `version` is packed into the high nibble of
    /// `time_hi_and_version`; `variant` is a pre-shifted bit pattern (see
    /// [`Variant::to_bits`]) OR'd into the high bits of the clock-sequence
    /// high byte; `sequence` is the 14-bit clock sequence.
    ///
    /// # Panics
    ///
    /// Panics if `ticks`, `version`, or `sequence` exceed their field widths.
    pub fn from_fields_v1(
        ticks: u64,
        version: u8,
        variant: u8,
        sequence: u16,
        node: Vec<u8>,
    ) -> Self {
        if ticks >= 1 << 60 || version >= 1 << 4 || sequence >= 1 << 14 {
            panic!("invalid field value");
        }

        Self {
            time_low: ticks as u32,
            time_mid: (ticks >> 32) as u16,
            time_hi_and_version: ((ticks >> 48) as u16 & 0x0fff) | ((version as u16) << 12),
            sequence_hi_and_variant: ((sequence >> 8) as u8 & VARIANT_CLEAR) | variant,
            sequence_low: sequence as u8,
            node,
        }
    }

    /// Returns the total wire size in bytes (ten fixed bytes plus the node).
    pub fn size(&self) -> usize {
        FIXED_LEN + self.node.len()
    }

    /// Returns the 4-bit version tag from the high nibble of
    /// `time_hi_and_version`.
    pub const fn version(&self) -> u8 {
        (self.time_hi_and_version >> 12) as u8
    }

    /// Reports the variant field classification of the UUID per RFC4122
    /// §4.1.1.
    pub const fn variant(&self) -> Variant {
        // evaluated from the coarsest mask to the finest; the cutover points
        // must stay bit-exact
        let bits = self.sequence_hi_and_variant;
        if bits & 0x80 == 0x00 {
            Variant::ReservedNcs
        } else if bits & 0xc0 == 0x80 {
            Variant::Rfc4122
        } else if bits & 0xe0 == 0xc0 {
            Variant::ReservedMicrosoft
        } else {
            Variant::ReservedFuture
        }
    }

    /// Returns a copy carrying the RFC4122 `10` pattern in the variant bits,
    /// with the low six clock-sequence bits untouched.
    pub fn with_rfc4122_variant(mut self) -> Self {
        self.sequence_hi_and_variant &= VARIANT_CLEAR;
        self.sequence_hi_and_variant |= Variant::Rfc4122.to_bits();
        self
    }

    /// Returns the node identifier bytes.
    pub fn node(&self) -> &[u8] {
        &self.node
    }

    /// Reassembles the 60-bit timestamp tick count from the three packed
    /// time fields.
    pub const fn timestamp(&self) -> u64 {
        ((self.time_hi_and_version & 0x0fff) as u64) << 48
            | (self.time_mid as u64) << 32
            | self.time_low as u64
    }

    /// Reassembles the 14-bit clock sequence from the two packed sequence
    /// fields.
    pub const fn clock_sequence(&self) -> u16 {
        ((self.sequence_hi_and_variant & VARIANT_CLEAR) as u16) << 8 | self.sequence_low as u16
    }

    /// Encodes the record into the big-endian wire layout.
    ///
    /// The output length always equals [`size`](Uuid::size); encoding is pure
    /// and cannot fail.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.size());
        data.extend_from_slice(&self.time_low.to_be_bytes());
        data.extend_from_slice(&self.time_mid.to_be_bytes());
        data.extend_from_slice(&self.time_hi_and_version.to_be_bytes());
        data.push(self.sequence_hi_and_variant);
        data.push(self.sequence_low);
        data.extend_from_slice(&self.node);
        data
    }

    /// Decodes the standard 16-byte Version 1 layout with a six-byte node.
    ///
    /// Input of any other length is rejected as a [`DecodeError`].
    pub fn from_slice(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != Self::STANDARD_SIZE {
            return Err(DecodeError::new(Self::STANDARD_SIZE, data.len()));
        }
        Self::from_slice_with_size(data, Self::STANDARD_SIZE)
    }

    /// Decodes a layout whose expected total size is given explicitly, with
    /// `size - 10` node bytes following the fixed fields.
    ///
    /// Bytes beyond `size` are ignored. Fails with a [`DecodeError`] if
    /// `size` leaves no room for the fixed fields or the input is shorter
    /// than `size`.
    pub fn from_slice_with_size(data: &[u8], size: usize) -> Result<Self, DecodeError> {
        if size < FIXED_LEN {
            return Err(DecodeError::new(FIXED_LEN, size));
        }
        if data.len() < size {
            return Err(DecodeError::new(size, data.len()));
        }

        Ok(Self {
            time_low: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            time_mid: u16::from_be_bytes([data[4], data[5]]),
            time_hi_and_version: u16::from_be_bytes([data[6], data[7]]),
            sequence_hi_and_variant: data[8],
            sequence_low: data[9],
            node: data[FIXED_LEN..size].to_vec(),
        })
    }
}

impl fmt::Display for Uuid {
    /// Returns the hyphenated lowercase hexadecimal representation with the
    /// fixed 8-4-4-2-2 digit groups followed by the node digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let bytes = self.to_bytes();
        let mut buffer = String::with_capacity(bytes.len() * 2 + 5);
        for (i, &b) in bytes.iter().enumerate() {
            let e = b as usize;
            buffer.push(DIGITS[e >> 4] as char);
            buffer.push(DIGITS[e & 15] as char);
            if i == 3 || i == 5 || i == 7 || i == 8 || (i == 9 && bytes.len() > FIXED_LEN) {
                buffer.push('-');
            }
        }
        f.write_str(&buffer)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl From<Uuid> for Vec<u8> {
    fn from(src: Uuid) -> Self {
        src.to_bytes()
    }
}

/// UUID layout family reported by the variant bits (RFC4122 §4.1.1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Reserved, NCS backward compatibility (`0xx`).
    ReservedNcs,
    /// The variant specified by RFC4122 (`10x`).
    Rfc4122,
    /// Reserved, Microsoft Corporation backward compatibility (`110`).
    ReservedMicrosoft,
    /// Reserved for future definition (`111`).
    ReservedFuture,
}

impl Variant {
    /// Returns the pre-shifted bit pattern of the variant, ready to be OR'd
    /// into the high bits of the clock-sequence high byte.
    pub const fn to_bits(self) -> u8 {
        match self {
            Self::ReservedNcs => 0x00,
            Self::Rfc4122 => 0x80,
            Self::ReservedMicrosoft => 0xc0,
            Self::ReservedFuture => 0xe0,
        }
    }
}

/// Error decoding a malformed binary representation of UUID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct DecodeError {
    expected: usize,
    actual: usize,
}

impl DecodeError {
    const fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    /// Number of bytes the decoder needed.
    pub const fn expected(&self) -> usize {
        self.expected
    }

    /// Number of bytes actually available.
    pub const fn actual(&self) -> usize {
        self.actual
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed binary representation: expected {} bytes, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for DecodeError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::{DecodeError, Uuid, FIXED_LEN};

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            let b = src.as_bytes();
            Self {
                time_low: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
                time_mid: u16::from_be_bytes([b[4], b[5]]),
                time_hi_and_version: u16::from_be_bytes([b[6], b[7]]),
                sequence_hi_and_variant: b[8],
                sequence_low: b[9],
                node: b[FIXED_LEN..].to_vec(),
            }
        }
    }

    impl TryFrom<&Uuid> for uuid::Uuid {
        type Error = DecodeError;

        /// Fails unless the record carries the standard six-byte node.
        fn try_from(src: &Uuid) -> Result<Self, Self::Error> {
            if src.size() != Uuid::STANDARD_SIZE {
                return Err(DecodeError::new(Uuid::STANDARD_SIZE, src.size()));
            }
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(&src.to_bytes());
            Ok(uuid::Uuid::from_bytes(bytes))
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_string())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    /// Accepts the binary wire form only; the hyphenated string form is a
    /// write-only representation.
    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_bytes(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a binary UUID representation")
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice_with_size(value, value.len()).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_ser_tokens, assert_tokens, Configure, Token};

        const BYTES: &[u8] = &[
            0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0x1d, 0xef, 0x80, 0x01, 0x02, 0x03, 0x04, 0x05,
            0x06, 0x07,
        ];

        /// Serializes human-readable forms as the canonical string
        #[test]
        fn serializes_readable_form_as_canonical_string() {
            let e = Uuid::from_slice(BYTES).unwrap();
            assert_ser_tokens(
                &e.readable(),
                &[Token::Str("12345678-9abc-1def-80-01-020304050607")],
            );
        }

        /// Round-trips the compact form through the wire bytes
        #[test]
        fn round_trips_compact_form_through_wire_bytes() {
            let e = Uuid::from_slice(BYTES).unwrap();
            assert_tokens(&e.compact(), &[Token::Bytes(BYTES)]);
        }
    }
}
