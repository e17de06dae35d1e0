// SPDX-License-Identifier: CC0-1.0

//! Non-public macros

/// Implements `Display`, `Debug`, `LowerHex` and `UpperHex` for a byte array newtype.
///
/// Bytes are printed in memory order, i.e. the little-endian serialization of
/// the digest words.
macro_rules! arr_newtype_fmt_impl {
    ($ty:ident) => {
        impl core::fmt::LowerHex for $ty {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                use $crate::hex::DisplayHex as _;
                core::fmt::LowerHex::fmt(&self.0[..].as_hex(), f)
            }
        }

        impl core::fmt::UpperHex for $ty {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                use $crate::hex::DisplayHex as _;
                core::fmt::UpperHex::fmt(&self.0[..].as_hex(), f)
            }
        }

        impl core::fmt::Display for $ty {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::LowerHex::fmt(self, f)
            }
        }

        impl core::fmt::Debug for $ty {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::LowerHex::fmt(self, f)
            }
        }
    };
}
pub(crate) use arr_newtype_fmt_impl;

/// Implements `Borrow<[u8]>` and `AsRef<[u8]>` for a type indexable by `..`.
macro_rules! borrow_slice_impl {
    ($ty:ident) => {
        impl core::borrow::Borrow<[u8]> for $ty {
            fn borrow(&self) -> &[u8] { &self[..] }
        }

        impl core::convert::AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] { &self[..] }
        }
    };
}
pub(crate) use borrow_slice_impl;

/// Creates a digest newtype named `Hash` in the calling module.
///
/// The calling module must provide a type `HashEngine` and a function
/// `fn from_engine(e: HashEngine) -> Hash`.
macro_rules! hash_type {
    ($bits:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct Hash([u8; $bits / 8]);

        impl core::str::FromStr for Hash {
            type Err = $crate::hex::HexToArrayError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                use $crate::hex::FromHex as _;

                let bytes = <[u8; $bits / 8]>::from_hex(s)?;
                Ok(Hash(bytes))
            }
        }

        $crate::internal_macros::arr_newtype_fmt_impl!(Hash);
        $crate::internal_macros::borrow_slice_impl!(Hash);
        $crate::serde_macros::serde_impl!(Hash);

        impl<I: core::slice::SliceIndex<[u8]>> core::ops::Index<I> for Hash {
            type Output = I::Output;

            #[inline]
            fn index(&self, index: I) -> &Self::Output { &self.0[index] }
        }

        impl $crate::Hash for Hash {
            type Engine = HashEngine;
            type Bytes = [u8; $bits / 8];

            const LEN: usize = $bits / 8;

            fn from_engine(e: HashEngine) -> Hash { from_engine(e) }

            fn from_slice(sl: &[u8]) -> Result<Hash, $crate::FromSliceError> {
                if sl.len() != $bits / 8 {
                    Err($crate::FromSliceError::new($bits / 8, sl.len()))
                } else {
                    let mut ret = [0; $bits / 8];
                    ret.copy_from_slice(sl);
                    Ok(Hash(ret))
                }
            }

            fn to_byte_array(self) -> Self::Bytes { self.0 }

            fn as_byte_array(&self) -> &Self::Bytes { &self.0 }

            fn from_byte_array(bytes: Self::Bytes) -> Self { Hash(bytes) }

            fn all_zeros() -> Self { Hash([0x00; $bits / 8]) }
        }
    };
}
pub(crate) use hash_type;
