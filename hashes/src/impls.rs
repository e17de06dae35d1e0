// SPDX-License-Identifier: CC0-1.0

//! `std` / `io` Impls.
//!
//! Implementations of traits defined in `std` / `io` and not in `core`.

use satsnet_io::impl_write;

use crate::{siphash24, HashEngine};

impl_write!(
    siphash24::HashEngine,
    |us: &mut siphash24::HashEngine, buf| {
        us.input(buf);
        Ok(buf.len())
    },
    |_us| { Ok(()) }
);

#[cfg(test)]
mod tests {
    use crate::siphash24;

    #[test]
    fn io_write_feeds_engine() {
        use satsnet_io::Write as _;

        let mut engine = siphash24::HashEngine::with_keys(0, 0);
        assert_eq!(engine.write(b"Hello ").expect("infallible"), 6);
        assert_eq!(engine.write(&[]).expect("infallible"), 0);
        engine.write_all(b"world").expect("infallible");
        engine.flush().expect("infallible");
        assert_eq!(engine.digest_u64(), 0xc9e8a3021f3822d9);
    }

    #[cfg(feature = "std")]
    mod std_write {
        use std::io::Write;

        use crate::siphash24;

        #[test]
        fn write_consumes_everything() {
            let mut engine = siphash24::HashEngine::with_keys(0, 0);
            assert_eq!(engine.write(b"Hello ").expect("infallible"), 6);
            assert_eq!(engine.write(&[]).expect("infallible"), 0);
            assert_eq!(engine.write(b"world").expect("infallible"), 5);
            engine.flush().expect("infallible");
            assert_eq!(engine.digest_u64(), 0xc9e8a3021f3822d9);
        }

        #[test]
        fn copy_from_reader() {
            let data = vec![0u8; 1535];
            let mut engine = siphash24::HashEngine::with_keys(0, 0);
            let copied = std::io::copy(&mut &data[..], &mut engine).expect("infallible");
            assert_eq!(copied, 1535);
            assert_eq!(engine.digest_u64(), 0xe74d1c0ab64b2afa);
        }

        #[test]
        fn write_all_matches_one_shot() {
            let data: Vec<u8> = (0..=255).collect();
            let mut engine = siphash24::HashEngine::with_keys(9, 10);
            engine.write_all(&data).expect("infallible");
            assert_eq!(engine.digest(), siphash24::Hash::hash_with_keys(9, 10, &data));
        }
    }
}
