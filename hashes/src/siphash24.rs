// SPDX-License-Identifier: CC0-1.0

//! SipHash 2-4 implementation.
//!
//! SipHash is a keyed PRF for short messages. With a secret key it prevents
//! an attacker from predicting which inputs collide, which is what hash tables
//! fed with untrusted keys need. It is not a collision resistant hash.
//!
//! The [`HashEngine`] can be read at any time: [`HashEngine::digest`] works on
//! a copy of the state, so more input may be added afterwards and the next
//! digest covers everything absorbed so far.

use core::{cmp, fmt, hash};

use crate::HashEngine as _;

crate::internal_macros::hash_type! {
    64,
    "Output of the SipHash24 hash function."
}

fn from_engine(e: HashEngine) -> Hash { Hash::from_u64(Hash::from_engine_to_u64(e)) }

/// Length of a SipHash key, in bytes.
pub const KEY_LEN: usize = 16;

macro_rules! compress {
    ($state:expr) => {{
        compress!($state.v0, $state.v1, $state.v2, $state.v3)
    }};
    ($v0:expr, $v1:expr, $v2:expr, $v3:expr) => {{
        $v0 = $v0.wrapping_add($v1);
        $v1 = $v1.rotate_left(13);
        $v1 ^= $v0;
        $v0 = $v0.rotate_left(32);
        $v2 = $v2.wrapping_add($v3);
        $v3 = $v3.rotate_left(16);
        $v3 ^= $v2;
        $v0 = $v0.wrapping_add($v3);
        $v3 = $v3.rotate_left(21);
        $v3 ^= $v0;
        $v2 = $v2.wrapping_add($v1);
        $v1 = $v1.rotate_left(17);
        $v1 ^= $v2;
        $v2 = $v2.rotate_left(32);
    }};
}

/// Internal state of the [`HashEngine`].
#[derive(Debug, Clone)]
pub struct State {
    // v0, v2 and v1, v3 show up in pairs in the algorithm,
    // and simd implementations of SipHash will use vectors
    // of v02 and v13. By placing them in this order in the struct,
    // the compiler can pick up on just a few simd optimizations by itself.
    v0: u64,
    v2: u64,
    v1: u64,
    v3: u64,
}

impl State {
    #[inline]
    pub(crate) const fn with_keys(k0: u64, k1: u64) -> State {
        State {
            v0: k0 ^ 0x736f6d6570736575,
            v1: k1 ^ 0x646f72616e646f6d,
            v2: k0 ^ 0x6c7967656e657261,
            v3: k1 ^ 0x7465646279746573,
        }
    }

    #[inline]
    fn c_rounds(&mut self) {
        compress!(self);
        compress!(self);
    }

    #[inline]
    fn d_rounds(&mut self) {
        compress!(self);
        compress!(self);
        compress!(self);
        compress!(self);
    }

    /// Absorbs one little-endian message word.
    #[inline]
    pub(crate) fn compress_word(&mut self, m: u64) {
        self.v3 ^= m;
        self.c_rounds();
        self.v0 ^= m;
    }

    /// Absorbs the padding word and runs the finalization rounds.
    ///
    /// `tail` holds the 0-7 trailing message bytes, `length` is the total
    /// message length of which only the low byte is used.
    #[inline]
    pub(crate) fn finish(&mut self, length: usize, tail: u64) -> u64 {
        let b: u64 = ((length as u64 & 0xff) << 56) | tail;
        self.compress_word(b);

        self.v2 ^= 0xff;
        self.d_rounds();

        self.fold()
    }

    /// Produces the high word of the 128-bit output from a state that went
    /// through [`State::finish`].
    #[inline]
    pub(crate) fn finish_high(&mut self) -> u64 {
        self.v1 ^= 0xdd;
        self.d_rounds();

        self.fold()
    }

    #[inline]
    fn fold(&self) -> u64 { self.v0 ^ self.v1 ^ self.v2 ^ self.v3 }
}

/// Engine to compute the SipHash24 hash function.
#[derive(Debug, Clone)]
pub struct HashEngine {
    k0: u64,
    k1: u64,
    length: usize, // how many bytes we've processed
    state: State,  // hash State
    tail: u64,     // unprocessed bytes le
    ntail: usize,  // how many bytes in tail are valid
}

impl HashEngine {
    /// Creates a new SipHash24 engine with keys.
    #[inline]
    pub const fn with_keys(k0: u64, k1: u64) -> HashEngine {
        HashEngine { k0, k1, length: 0, state: State::with_keys(k0, k1), tail: 0, ntail: 0 }
    }

    /// Creates a new SipHash24 engine from a 16 byte key.
    ///
    /// The first eight bytes are read as the little-endian key half `k0`, the
    /// last eight as `k1`.
    pub fn new(key: [u8; KEY_LEN]) -> HashEngine {
        let (k0, k1) = split_key(&key);
        HashEngine::with_keys(k0, k1)
    }

    /// Creates a new SipHash24 engine from a key slice.
    ///
    /// # Errors
    ///
    /// If `key` is not exactly [`KEY_LEN`] bytes long.
    pub fn from_key(key: &[u8]) -> Result<HashEngine, InvalidKeyLengthError> {
        let key = <[u8; KEY_LEN]>::try_from(key)
            .map_err(|_| InvalidKeyLengthError { got: key.len() })?;
        Ok(HashEngine::new(key))
    }

    /// Retrieves the keys of this engine.
    pub fn keys(&self) -> (u64, u64) { (self.k0, self.k1) }

    /// Discards all input, returning the engine to its freshly keyed state.
    pub fn reset(&mut self) { *self = HashEngine::with_keys(self.k0, self.k1); }

    /// Returns the digest of everything input so far.
    ///
    /// The engine is left untouched, more data may be input afterwards.
    pub fn digest(&self) -> Hash { from_engine(self.clone()) }

    /// Returns the digest of everything input so far as a `u64`.
    ///
    /// The engine is left untouched, more data may be input afterwards.
    pub fn digest_u64(&self) -> u64 { Hash::from_engine_to_u64(self.clone()) }

    /// Returns the experimental 128-bit digest of everything input so far.
    ///
    /// See [`siphash24_128`](crate::siphash24_128) for the caveats of the
    /// 128-bit output. The engine is left untouched.
    pub fn digest128(&self) -> crate::siphash24_128::Hash {
        let (lo, hi) = self.finish128();
        crate::siphash24_128::Hash::from_u64s(lo, hi)
    }

    /// Runs both finalization passes on a copy of the state.
    pub(crate) fn finish128(&self) -> (u64, u64) {
        let mut state = self.state.clone();
        let lo = state.finish(self.length, self.tail);
        (lo, state.finish_high())
    }
}

impl crate::HashEngine for HashEngine {
    const BLOCK_SIZE: usize = 8;

    #[inline]
    fn input(&mut self, msg: &[u8]) {
        self.length = self.length.wrapping_add(msg.len());

        let mut msg = msg;
        if self.ntail != 0 {
            let needed = 8 - self.ntail;
            let fill = cmp::min(msg.len(), needed);
            self.tail |= load_le(&msg[..fill]) << (8 * self.ntail);
            if msg.len() < needed {
                self.ntail += msg.len();
                return;
            }

            self.state.compress_word(self.tail);
            self.ntail = 0;
            msg = &msg[needed..];
        }

        // Buffered tail is now flushed, process new input.
        let mut blocks = msg.chunks_exact(8);
        for block in &mut blocks {
            self.state.compress_word(load_le(block));
        }

        let left = blocks.remainder();
        self.tail = load_le(left);
        self.ntail = left.len();
    }

    fn n_bytes_hashed(&self) -> usize { self.length }
}

impl hash::Hasher for HashEngine {
    #[inline]
    fn write(&mut self, bytes: &[u8]) { self.input(bytes) }

    #[inline]
    fn finish(&self) -> u64 { self.digest_u64() }
}

/// Builds keyed SipHash24 [`HashEngine`]s, for example as the hasher of a `HashMap`.
///
/// Every built engine starts from the same key, so equal values hash equally
/// across calls. Pick the key at random per table to get flooding protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildHasher {
    k0: u64,
    k1: u64,
}

impl BuildHasher {
    /// Creates a builder handing out engines keyed with `k0` and `k1`.
    pub const fn with_keys(k0: u64, k1: u64) -> BuildHasher { BuildHasher { k0, k1 } }

    /// Creates a builder from a 16 byte key.
    pub fn new(key: [u8; KEY_LEN]) -> BuildHasher {
        let (k0, k1) = split_key(&key);
        BuildHasher { k0, k1 }
    }
}

impl hash::BuildHasher for BuildHasher {
    type Hasher = HashEngine;

    fn build_hasher(&self) -> HashEngine { HashEngine::with_keys(self.k0, self.k1) }
}

impl Hash {
    /// Hashes the given data with an engine with the provided keys.
    pub fn hash_with_keys(k0: u64, k1: u64, data: &[u8]) -> Hash {
        Hash::from_u64(Hash::hash_to_u64_with_keys(k0, k1, data))
    }

    /// Hashes the given data with an engine keyed by a 16 byte key.
    pub fn hash_with_key(key: &[u8; KEY_LEN], data: &[u8]) -> Hash {
        let (k0, k1) = split_key(key);
        Hash::hash_with_keys(k0, k1, data)
    }

    /// Hashes the given data directly to u64 with an engine with the provided keys.
    pub fn hash_to_u64_with_keys(k0: u64, k1: u64, data: &[u8]) -> u64 {
        #[cfg(not(feature = "small-hash"))]
        let ret = crate::oneshot::hash(k0, k1, data);

        #[cfg(feature = "small-hash")]
        let ret = {
            let mut engine = HashEngine::with_keys(k0, k1);
            engine.input(data);
            Hash::from_engine_to_u64(engine)
        };

        ret
    }

    /// Produces a hash as `u64` from the current state of a given engine.
    #[inline]
    pub fn from_engine_to_u64(e: HashEngine) -> u64 {
        let mut state = e.state;
        state.finish(e.length, e.tail)
    }

    /// Returns the (little endian) 64-bit integer representation of the hash value.
    pub fn to_u64(self) -> u64 { u64::from_le_bytes(self.0) }

    /// Creates a hash from its (little endian) 64-bit integer representation.
    pub fn from_u64(hash: u64) -> Hash { Hash(hash.to_le_bytes()) }
}

/// The key passed to [`HashEngine::from_key`] was not [`KEY_LEN`] bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyLengthError {
    got: usize,
}

impl InvalidKeyLengthError {
    /// Returns the length of the rejected key.
    pub fn invalid_length(&self) -> usize { self.got }
}

impl fmt::Display for InvalidKeyLengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid SipHash key length {} (expected {})", self.got, KEY_LEN)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidKeyLengthError {}

/// Splits a key into its little-endian halves `(k0, k1)`.
#[inline]
fn split_key(key: &[u8; KEY_LEN]) -> (u64, u64) {
    (load_le(&key[..8]), load_le(&key[8..]))
}

/// Loads up to 8 bytes of a byte slice as a little-endian u64, zero filling
/// the missing high bytes.
#[inline]
pub(crate) fn load_le(buf: &[u8]) -> u64 {
    debug_assert!(buf.len() <= 8);
    let mut bytes = [0u8; 8];
    bytes[..buf.len()].copy_from_slice(buf);
    u64::from_le_bytes(bytes)
}


#[cfg(bench)]
mod benches {
    use test::Bencher;

    use crate::siphash24;
    use crate::HashEngine as _;

    #[bench]
    fn hash_8(bh: &mut Bencher) {
        let data = [0u8; 8];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_16(bh: &mut Bencher) {
        let data = [0u8; 16];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_40(bh: &mut Bencher) {
        let data = [0u8; 40];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_64(bh: &mut Bencher) {
        let data = [0u8; 64];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_128(bh: &mut Bencher) {
        let data = [0u8; 128];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_1k(bh: &mut Bencher) {
        let data = [0u8; 1024];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn hash_8k(bh: &mut Bencher) {
        let data = [0u8; 8 << 10];
        bh.iter(|| siphash24::Hash::hash_to_u64_with_keys(0, 0, &data));
        bh.bytes = data.len() as u64;
    }

    #[bench]
    fn engine_input_8(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 8];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_16(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 16];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_40(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 40];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_64(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 64];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_128(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 128];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_1k(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 1024];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }

    #[bench]
    fn engine_input_8k(bh: &mut Bencher) {
        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        let bytes = [1u8; 8 << 10];
        bh.iter(|| {
            engine.reset();
            engine.input(&bytes);
            engine.digest_u64()
        });
        bh.bytes = bytes.len() as u64;
    }
}
