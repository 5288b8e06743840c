//! Numeric and identifier codecs shared by the DAO action encoders.
//!
//! All functions here are pure and validate their input before producing
//! any output: fixed-precision ratios, fixed-width integer buffers, 256 bit
//! boolean bitmaps and nonce-based proposal identifiers.

pub mod bitmap;
pub mod buffer;
pub mod error;
pub mod proposal_id;
pub mod ratio;

pub use bitmap::{bitmap_to_bool_array, bool_array_to_bitmap, parse_bitmap};
pub use buffer::{big_int_to_buffer, buffer_to_big_int, Endian};
pub use error::EncodingError;
pub use proposal_id::{decode_proposal_id, encode_proposal_id, is_proposal_id, ProposalId};
pub use ratio::{decode_ratio, encode_ratio};
