//! # cbor-item
//!
//! CBOR (RFC 8949) data items as owned [`Value`] trees, with tolerant decoding and
//! deterministic encoding.
//!
//! ## Design principles
//!
//! - **Decode what the wire allows.**
//!   The decoder accepts every well-formed RFC 8949 data item: definite and
//!   indefinite-length containers, chunked byte and text strings, every simple
//!   value, and all three float widths. It enforces structure (UTF-8, nesting
//!   depth, chunk discipline, trailing bytes), not application profiles.
//! - **Encode what the receiver prefers.**
//!   The encoder emits only definite-length, shortest-width prefixes. One flag,
//!   [`EncodeOptions::canonical`], switches on RFC 8949 §4.2 deterministic output:
//!   map entries sorted by the bytewise lexicographic order of their encoded keys
//!   and floats reduced to the narrowest width that preserves the bit pattern.
//! - **The value model is the contract.**
//!   Decoding then re-encoding (non-canonically) yields bytes that decode back to
//!   an equal value. Equality is structural, with floats compared by bit pattern.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CborError`].
//! - `simdutf8`: accelerated UTF-8 validation for decoded text strings.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible; it requires an allocator.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod alloc_util;
mod decode;
mod encode;
mod error;
mod float;
mod options;
mod order;
mod utf8;
mod value;

pub use crate::decode::{decode_value, Decoder};
pub use crate::encode::{encode_canonical, encode_value, Encoder};
pub use crate::error::{CborError, ErrorCode};
pub use crate::options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use crate::order::cmp_encoded_keys;
pub use crate::value::{Sign, Value};
