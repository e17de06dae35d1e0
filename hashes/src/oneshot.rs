// SPDX-License-Identifier: CC0-1.0

//! One-shot SipHash24 kernel.
//!
//! Hashes a complete in-memory message without the engine's tail
//! bookkeeping: full blocks are read straight from the slice, four at a time,
//! and the trailing bytes are packed once into the padding word. Only the
//! one-shot functions use it; streaming input always goes through the
//! [`HashEngine`](crate::siphash24::HashEngine).

use crate::siphash24::{load_le, State};

/// Absorbs every complete block of `data`, returns the state and the packed
/// trailing bytes.
#[inline]
fn absorb(k0: u64, k1: u64, data: &[u8]) -> (State, u64) {
    let mut state = State::with_keys(k0, k1);

    let mut wide = data.chunks_exact(32);
    for chunk in &mut wide {
        state.compress_word(load_le(&chunk[0..8]));
        state.compress_word(load_le(&chunk[8..16]));
        state.compress_word(load_le(&chunk[16..24]));
        state.compress_word(load_le(&chunk[24..32]));
    }

    let mut blocks = wide.remainder().chunks_exact(8);
    for block in &mut blocks {
        state.compress_word(load_le(block));
    }

    (state, load_le(blocks.remainder()))
}

/// 64-bit SipHash24 of `data`.
pub(crate) fn hash(k0: u64, k1: u64, data: &[u8]) -> u64 {
    let (mut state, tail) = absorb(k0, k1, data);
    state.finish(data.len(), tail)
}

/// 128-bit SipHash24 of `data` as `(low, high)`.
pub(crate) fn hash128(k0: u64, k1: u64, data: &[u8]) -> (u64, u64) {
    let (mut state, tail) = absorb(k0, k1, data);
    let lo = state.finish(data.len(), tail);
    (lo, state.finish_high())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siphash24::HashEngine;
    use crate::HashEngine as _;

    const KEYS: [(u64, u64); 4] = [
        (0, 0),
        (0x0706050403020100, 0x0f0e0d0c0b0a0908),
        (u64::MAX, 1),
        (0xdeadbeefcafebabe, 0x0123456789abcdef),
    ];

    fn message(len: usize) -> Vec<u8> { (0..len).map(|i| (i * 31 + 7) as u8).collect() }

    #[test]
    fn kernel_matches_engine() {
        for &(k0, k1) in &KEYS {
            for len in 0..300 {
                let data = message(len);
                let mut engine = HashEngine::with_keys(k0, k1);
                engine.input(&data);

                assert_eq!(hash(k0, k1, &data), engine.digest_u64(), "length {}", len);
                assert_eq!(
                    hash128(k0, k1, &data),
                    crate::siphash24_128::Hash::from_engine_to_u64s(engine),
                    "length {}",
                    len
                );
            }
        }
    }

    #[test]
    fn kernel_reference_vectors() {
        let (k0, k1) = KEYS[1];
        let msg: Vec<u8> = (0..15).collect();
        assert_eq!(hash(k0, k1, &msg), 0xa129ca6149be45e5);
        assert_eq!(hash(0, 0, &[0; 1535]), 0xe74d1c0ab64b2afa);
        assert_eq!(hash(0, 0, &[]), 0x1e924b9d737700d7);

        assert_eq!(hash128(k0, k1, &msg), (0xa129ca6149be45e5, 0x0f4f947d0175f7d4));
        assert_eq!(hash128(0, 0, &[]), (0x1e924b9d737700d7, 0x4acf7abb23205282));
    }
}
