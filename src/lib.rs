//! An implementation of the RFC4122 time-based UUID version 1
//!
//! ```rust
//! use uuid1::uuid1;
//!
//! let uuid = uuid1();
//! println!("{}", uuid); // e.g. "8a2e63fa-7fc4-11f1-92-3d-29f8fb24c379"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian sequence
//! ```
//!
//! See [RFC4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|   seq_hi  |    seq_low    |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          node (cont.)                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp counts 100-nanosecond intervals since the Gregorian
//!   reform date (1582-10-15) and is split over `time_low` (lowest 32 bits),
//!   `time_mid` (middle 16 bits), and `time_high` (top 12 bits).
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`; `seq_hi` and `seq_low` carry the
//!   14-bit clock sequence that keeps identifiers distinct when the system
//!   clock stalls or rolls back.
//! - The trailing `node` bytes carry the node identifier, conventionally a
//!   48-bit hardware address or a randomized substitute.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{DecodeError, Uuid, Variant};

mod node;
pub use node::NodeId;

pub mod generator;
#[doc(inline)]
pub use generator::V1Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::uuid1;
