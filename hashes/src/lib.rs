// SPDX-License-Identifier: CC0-1.0

//! Rust SipHash-2-4 library.
//!
//! SipHash is a keyed pseudorandom function tuned for short messages, used to
//! protect hash tables against hash flooding. It is *not* a general purpose
//! cryptographic hash: it makes no collision resistance claim beyond what a
//! 64-bit PRF gives, and it is not a key derivation function.
//!
//! The [`siphash24::HashEngine`] absorbs input incrementally and can produce a
//! digest at any point without disturbing the data absorbed so far. The
//! one-shot functions on [`siphash24::Hash`] and [`siphash24_128::Hash`] hash a
//! complete message in a single call.
//!
//! ## Commonly used operations
//!
//! Hashing a single byte slice:
//!
//! ```rust
//! use sip_hashes::siphash24;
//!
//! let bytes = b"Hello world";
//! let digest = siphash24::Hash::hash_to_u64_with_keys(0, 0, bytes);
//! assert_eq!(digest, 0xc9e8a3021f3822d9);
//! ```
//!
//! Hashing content in pieces, peeking at the digest in between:
//!
//! ```rust
//! use sip_hashes::{siphash24, HashEngine as _};
//!
//! let mut engine = siphash24::HashEngine::new([0u8; 16]);
//! engine.input(b"Hello ");
//! let _so_far = engine.digest();
//! engine.input(b"world");
//! assert_eq!(engine.digest().to_u64(), 0xc9e8a3021f3822d9);
//! ```
//!
//! Hashing content from a reader:
//!
//! ```rust
//! use sip_hashes::siphash24;
//!
//! # fn main() -> std::io::Result<()> {
//! let mut reader: &[u8] = b"Hello world";
//! let mut engine = siphash24::HashEngine::new([0u8; 16]);
//! std::io::copy(&mut reader, &mut engine)?;
//! assert_eq!(engine.digest_u64(), 0xc9e8a3021f3822d9);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Experimental features we need.
#![cfg_attr(bench, feature(test))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// Coding conventions.
#![warn(missing_docs)]

#[cfg(feature = "serde")]
/// A generic serialization/deserialization framework.
pub extern crate serde;

#[cfg(all(test, feature = "serde"))]
extern crate serde_test;
#[cfg(bench)]
extern crate test;

/// Re-export the `hex-conservative` crate.
pub extern crate hex;

mod internal_macros;
pub mod serde_macros;

#[cfg(any(feature = "std", feature = "io"))]
mod impls;
#[cfg(any(test, not(feature = "small-hash")))]
mod oneshot;
pub mod siphash24;
pub mod siphash24_128;

use core::{convert, fmt, hash, str};

pub use crate::siphash24::InvalidKeyLengthError;

/// A hashing engine which bytes can be serialized into.
pub trait HashEngine: Clone {
    /// Length of the hash's internal block size, in bytes.
    const BLOCK_SIZE: usize;

    /// Add data to the hash engine.
    fn input(&mut self, data: &[u8]);

    /// Return the number of bytes already input into the engine.
    fn n_bytes_hashed(&self) -> usize;
}

/// Trait which applies to hashes of all types.
pub trait Hash:
    Copy
    + Clone
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + hash::Hash
    + fmt::Debug
    + fmt::Display
    + fmt::LowerHex
    + convert::AsRef<[u8]>
    + str::FromStr
{
    /// A hashing engine which bytes can be serialized into. It is expected
    /// to implement the `io::Write` trait, and to never return errors under
    /// any conditions.
    type Engine: HashEngine;

    /// The byte array that represents the hash internally.
    type Bytes: Copy + convert::AsRef<[u8]>;

    /// Length of the hash, in bytes.
    const LEN: usize;

    /// Produces a hash from the current state of a given engine.
    fn from_engine(e: Self::Engine) -> Self;

    /// Copies a byte slice into a hash object.
    fn from_slice(sl: &[u8]) -> Result<Self, FromSliceError>;

    /// Returns the underlying byte array.
    fn to_byte_array(self) -> Self::Bytes;

    /// Returns a reference to the underlying byte array.
    fn as_byte_array(&self) -> &Self::Bytes;

    /// Constructs a hash from the underlying byte array.
    fn from_byte_array(bytes: Self::Bytes) -> Self;

    /// Returns an all zero hash.
    ///
    /// An all zeros hash is a made up construct and is never the output of a
    /// real hashing run.
    fn all_zeros() -> Self;
}

/// Attempted to create a hash from an invalid length slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromSliceError {
    expected: usize,
    got: usize,
}

impl FromSliceError {
    pub(crate) fn new(expected: usize, got: usize) -> Self { FromSliceError { expected, got } }

    /// Returns the expected slice length.
    pub fn expected_length(&self) -> usize { self.expected }

    /// Returns the invalid slice length.
    pub fn invalid_length(&self) -> usize { self.got }
}

impl fmt::Display for FromSliceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid slice length {} (expected {})", self.got, self.expected)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromSliceError {}
