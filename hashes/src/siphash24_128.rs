// SPDX-License-Identifier: CC0-1.0

//! 128-bit SipHash 2-4 output.
//!
//! **Experimental.** The SipHash authors consider the 128-bit output
//! experimental and give it weaker security assurances than the 64-bit
//! output. Prefer [`siphash24`](crate::siphash24) unless 128 bits are
//! actually required.
//!
//! The low word is exactly the 64-bit SipHash24 of the same key and message.
//! The high word continues from the finalized state: `v1 ^= 0xdd`, four more
//! rounds, then the four state words are folded again. As bytes the digest is
//! the low word followed by the high word, both little-endian.

use crate::siphash24;

crate::internal_macros::hash_type! {
    128,
    "Output of the experimental 128-bit SipHash24 hash function."
}

type HashEngine = siphash24::HashEngine;

fn from_engine(e: HashEngine) -> Hash {
    let (lo, hi) = Hash::from_engine_to_u64s(e);
    Hash::from_u64s(lo, hi)
}

impl Hash {
    /// Hashes the given data with an engine with the provided keys.
    pub fn hash_with_keys(k0: u64, k1: u64, data: &[u8]) -> Hash {
        let (lo, hi) = Hash::hash_to_u64s_with_keys(k0, k1, data);
        Hash::from_u64s(lo, hi)
    }

    /// Hashes the given data directly to a `(low, high)` pair of u64s with an
    /// engine with the provided keys.
    pub fn hash_to_u64s_with_keys(k0: u64, k1: u64, data: &[u8]) -> (u64, u64) {
        #[cfg(not(feature = "small-hash"))]
        let ret = crate::oneshot::hash128(k0, k1, data);

        #[cfg(feature = "small-hash")]
        let ret = {
            use crate::HashEngine as _;

            let mut engine = HashEngine::with_keys(k0, k1);
            engine.input(data);
            Hash::from_engine_to_u64s(engine)
        };

        ret
    }

    /// Produces a hash as a `(low, high)` pair of u64s from the current state
    /// of a given engine.
    #[inline]
    pub fn from_engine_to_u64s(e: HashEngine) -> (u64, u64) { e.finish128() }

    /// Returns the `(low, high)` 64-bit integer halves of the hash value.
    pub fn to_u64s(self) -> (u64, u64) {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&self.0[..8]);
        hi.copy_from_slice(&self.0[8..]);
        (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    /// Creates a hash from its `(low, high)` 64-bit integer halves.
    pub fn from_u64s(lo: u64, hi: u64) -> Hash {
        let mut ret = [0u8; 16];
        ret[..8].copy_from_slice(&lo.to_le_bytes());
        ret[8..].copy_from_slice(&hi.to_le_bytes());
        Hash(ret)
    }

    /// Returns the hash value as a single little-endian `u128`.
    pub fn to_u128(self) -> u128 { u128::from_le_bytes(self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hash as _, HashEngine as _};

    #[test]
    fn low_word_is_siphash24() {
        let (k0, k1) = (0x0706050403020100, 0x0f0e0d0c0b0a0908);
        let msg: Vec<u8> = (0..64).collect();
        for len in 0..msg.len() {
            let (lo, hi) = Hash::hash_to_u64s_with_keys(k0, k1, &msg[..len]);
            let short = siphash24::Hash::hash_to_u64_with_keys(k0, k1, &msg[..len]);
            assert_eq!(lo, short, "length {}", len);
            assert_ne!(lo, hi, "length {}", len);
        }

        let (lo, _) = Hash::hash_to_u64s_with_keys(0, 0, b"Hello world");
        assert_eq!(lo, 0xc9e8a3021f3822d9);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let data: Vec<u8> = (0..200u16).map(|i| (i * 7) as u8).collect();
        let expected = Hash::hash_with_keys(3, 4, &data);

        let mut engine = siphash24::HashEngine::with_keys(3, 4);
        for chunk in data.chunks(13) {
            engine.input(chunk);
            // Reading in between must not change the end result.
            let _ = engine.digest128();
        }
        assert_eq!(engine.digest128(), expected);
        assert_eq!(Hash::from_engine(engine), expected);
    }

    #[test]
    fn high_word_depends_on_second_pass() {
        let engine = siphash24::HashEngine::with_keys(0, 0);
        let (lo, hi) = Hash::from_engine_to_u64s(engine.clone());
        assert_eq!(lo, 0x1e924b9d737700d7);
        assert_eq!(hi, 0x4acf7abb23205282);
        assert_eq!(engine.digest_u64(), lo);
    }

    #[test]
    fn known_answers() {
        let counting_msg: Vec<u8> = (0..15).collect();
        #[rustfmt::skip]
        let vectors: [(u64, u64, &[u8], (u64, u64), &str); 3] = [
            (
                0x0706050403020100, 0x0f0e0d0c0b0a0908, &counting_msg,
                (0xa129ca6149be45e5, 0x0f4f947d0175f7d4),
                "e545be4961ca29a1d4f775017d944f0f",
            ),
            (
                0, 0, b"",
                (0x1e924b9d737700d7, 0x4acf7abb23205282),
                "d70077739d4b921e82522023bb7acf4a",
            ),
            (
                0, 0, b"Hello world",
                (0xc9e8a3021f3822d9, 0xab4fa3058979a669),
                "d922381f02a3e8c969a6798905a34fab",
            ),
        ];

        for (i, (k0, k1, msg, expected, hex)) in vectors.iter().enumerate() {
            assert_eq!(Hash::hash_to_u64s_with_keys(*k0, *k1, msg), *expected, "vector {}", i);

            let mut engine = siphash24::HashEngine::with_keys(*k0, *k1);
            engine.input(msg);
            assert_eq!(engine.digest128().to_u64s(), *expected, "vector {}", i);
            assert_eq!(engine.digest128().to_string(), *hex, "vector {}", i);
        }
    }

    #[test]
    fn byte_layout() {
        let hash = Hash::from_u64s(0x0706050403020100, 0x0f0e0d0c0b0a0908);
        let bytes: Vec<u8> = (0..16).collect();
        assert_eq!(&hash[..], &bytes[..]);
        assert_eq!(hash.to_u64s(), (0x0706050403020100, 0x0f0e0d0c0b0a0908));
        assert_eq!(hash.to_u128(), 0x0f0e0d0c0b0a09080706050403020100);
        assert_eq!(hash.to_string(), "000102030405060708090a0b0c0d0e0f");
        assert_eq!("000102030405060708090a0b0c0d0e0f".parse::<Hash>().expect("valid hex"), hash);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn siphash128_serde() {
        use serde_test::{assert_tokens, Configure, Token};

        #[rustfmt::skip]
        static HASH_BYTES: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        ];

        let hash = Hash::from_slice(&HASH_BYTES).expect("right number of bytes");
        assert_tokens(&hash.compact(), &[Token::BorrowedBytes(&HASH_BYTES[..])]);
        assert_tokens(&hash.readable(), &[Token::Str("000102030405060708090a0b0c0d0e0f")]);
    }
}
