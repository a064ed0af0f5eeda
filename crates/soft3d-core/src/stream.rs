//! Plain-old-data element codec for streamed arrays.
//!
//! [`StreamElement`] describes how one array element is laid out on disk:
//! its exact byte size and its little-endian bit pattern. Elements are
//! written back to back with no padding, so an array of `n` elements occupies
//! exactly `n * SIZE` bytes after its length header.
//!
//! # Implementations
//!
//! | Type                         | Size | Encoding                     |
//! |------------------------------|------|------------------------------|
//! | `u8`, `i8`                   | 1    | raw byte                     |
//! | `u16`, `i16`                 | 2    | little-endian                |
//! | `u32`, `i32`, `f32`          | 4    | little-endian                |
//! | `u64`, `i64`, `f64`          | 8    | little-endian                |
//! | `I16F16`                     | 4    | raw bits, little-endian      |
//! | `I32F32`, `I48F16`           | 8    | raw bits, little-endian      |
//!
//! Composite math types (vectors, matrices) implement the trait in
//! `soft3d-math` by streaming their components in storage order.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_core::StreamElement;
//!
//! let mut bytes = Vec::new();
//! 1.5f32.write_to(&mut bytes).unwrap();
//! assert_eq!(bytes.len(), f32::SIZE);
//!
//! let back = f32::read_from(&mut bytes.as_slice()).unwrap();
//! assert_eq!(back, 1.5);
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use fixed::types::{I16F16, I32F32, I48F16};
use std::io::{self, Read, Write};

/// An element that can be streamed as a fixed-size little-endian bit pattern.
pub trait StreamElement: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Writes the element's bit pattern.
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Reads one element's bit pattern.
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;
}

impl StreamElement for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(*self)
    }

    #[inline]
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u8()
    }
}

impl StreamElement for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i8(*self)
    }

    #[inline]
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i8()
    }
}

macro_rules! impl_stream_primitive {
    ($t:ty, $size:expr, $write:ident, $read:ident) => {
        impl StreamElement for $t {
            const SIZE: usize = $size;

            #[inline]
            fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
                writer.$write::<LittleEndian>(*self)
            }

            #[inline]
            fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
                reader.$read::<LittleEndian>()
            }
        }
    };
}

impl_stream_primitive!(u16, 2, write_u16, read_u16);
impl_stream_primitive!(i16, 2, write_i16, read_i16);
impl_stream_primitive!(u32, 4, write_u32, read_u32);
impl_stream_primitive!(i32, 4, write_i32, read_i32);
impl_stream_primitive!(u64, 8, write_u64, read_u64);
impl_stream_primitive!(i64, 8, write_i64, read_i64);
impl_stream_primitive!(f32, 4, write_f32, read_f32);
impl_stream_primitive!(f64, 8, write_f64, read_f64);

// Fixed-point numbers stream their raw two's-complement bits.
macro_rules! impl_stream_fixed {
    ($t:ty, $bits:ty) => {
        impl StreamElement for $t {
            const SIZE: usize = <$bits as StreamElement>::SIZE;

            #[inline]
            fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
                self.to_bits().write_to(writer)
            }

            #[inline]
            fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
                <$bits>::read_from(reader).map(<$t>::from_bits)
            }
        }
    };
}

impl_stream_fixed!(I16F16, i32);
impl_stream_fixed!(I32F32, i64);
impl_stream_fixed!(I48F16, i64);

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: StreamElement>(value: T) -> Vec<u8> {
        let mut out = Vec::new();
        value.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_sizes_match_encoding() {
        assert_eq!(encode(7u8).len(), u8::SIZE);
        assert_eq!(encode(-7i16).len(), i16::SIZE);
        assert_eq!(encode(7u32).len(), u32::SIZE);
        assert_eq!(encode(-7i64).len(), i64::SIZE);
        assert_eq!(encode(0.25f32).len(), f32::SIZE);
        assert_eq!(encode(0.25f64).len(), f64::SIZE);
        assert_eq!(encode(I32F32::from_num(0.25)).len(), I32F32::SIZE);
    }

    #[test]
    fn test_little_endian_layout() {
        assert_eq!(encode(0x0403_0201u32), vec![1, 2, 3, 4]);
        assert_eq!(encode(1.0f32), 1.0f32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_fixed_streams_raw_bits() {
        let x = I32F32::from_num(-2.5);
        assert_eq!(encode(x), x.to_bits().to_le_bytes().to_vec());

        let back = I32F32::read_from(&mut encode(x).as_slice()).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn test_short_read_fails() {
        let bytes = [1u8, 2];
        assert!(u32::read_from(&mut &bytes[..]).is_err());
    }
}
