//! Reference-counted fixed-length typed buffers.
//!
//! [`SharedArray`] is the boundary type used to pass vertex, index and
//! shader-constant data between mesh producers and the components that consume
//! them. The length is fixed at construction; holders share one heap buffer
//! and the buffer is freed when the last holder drops its handle.
//!
//! # Sharing vs copying
//!
//! Duplicating a handle is always an explicit decision at the call site:
//!
//! - [`SharedArray::share`] - new handle onto the same buffer (refcount + 1)
//! - [`SharedArray::deep_copy`] - new buffer holding cloned elements
//! - [`SharedArray::duplicate`] - either of the above, chosen by [`CopyMode`]
//!
//! `SharedArray` does not implement [`Clone`], so no copy can happen by
//! accident.
//!
//! # Mutation
//!
//! Writes go through [`as_mut_slice`](SharedArray::as_mut_slice),
//! [`set`](SharedArray::set) or `IndexMut`. When the buffer is shared the
//! writing handle first detaches onto its own copy (copy-on-write), so other
//! holders keep the contents they were handed.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_core::SharedArray;
//!
//! let mut indices: SharedArray<i32> = SharedArray::new(3);
//! indices.as_mut_slice().copy_from_slice(&[0, 1, 2]);
//!
//! let consumer = indices.share();
//! assert_eq!(consumer.ref_count(), 2);
//! assert_eq!(consumer[2], 2);
//! ```

use crate::{Error, Result, StreamElement};
use std::fmt;
use std::io::{self, Read, Write};
use std::ops::{Index, IndexMut};
use std::sync::{Arc, Weak};
use tracing::trace;

// Upper bound on speculative allocation while decoding an untrusted header.
const MAX_PREALLOC: usize = 1 << 16;

/// How [`SharedArray::duplicate`] produces the new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyMode {
    /// Reference the existing buffer.
    Share,
    /// Clone every element into a new buffer.
    Deep,
}

/// A reference-counted, fixed-length typed buffer.
///
/// # Memory Management
///
/// Elements live in an [`Arc<Vec<T>>`], so handles may be sent to other
/// threads and the reference count is atomic.
///
/// # Indexing
///
/// `array[i]` panics when `i >= quantity()`. Use [`get`](Self::get) for a
/// checked lookup.
pub struct SharedArray<T> {
    data: Arc<Vec<T>>,
}

impl<T> SharedArray<T> {
    /// Creates an array of `quantity` default-valued elements.
    ///
    /// A zero quantity is valid and yields an empty array.
    pub fn new(quantity: usize) -> Self
    where
        T: Default + Clone,
    {
        Self::filled(quantity, T::default())
    }

    /// Creates an array of `quantity` copies of `value`.
    pub fn filled(quantity: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_vec(vec![value; quantity])
    }

    /// Takes ownership of an existing element buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn quantity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns the elements mutably, detaching from other holders first.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Overwrites the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= quantity()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: T)
    where
        T: Clone,
    {
        self.as_mut_slice()[index] = value;
    }

    /// Returns a new handle onto the same buffer.
    #[inline]
    pub fn share(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }

    /// Returns a handle onto a fresh buffer holding clones of every element.
    pub fn deep_copy(&self) -> Self
    where
        T: Clone,
    {
        trace!(quantity = self.quantity(), "SharedArray::deep_copy");
        Self::from_vec(self.data.as_ref().clone())
    }

    /// Shares or deep-copies according to `mode`.
    pub fn duplicate(&self, mode: CopyMode) -> Self
    where
        T: Clone,
    {
        match mode {
            CopyMode::Share => self.share(),
            CopyMode::Deep => self.deep_copy(),
        }
    }

    /// Returns the number of live handles onto this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Returns `true` if both handles reference the same buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns a non-owning observer of the buffer.
    ///
    /// The observer does not keep the buffer alive; it reports whether the
    /// last owning handle has been dropped.
    pub fn downgrade(&self) -> WeakSharedArray<T> {
        WeakSharedArray {
            data: Arc::downgrade(&self.data),
        }
    }

    /// Consumes the handle, returning the elements if it was the only holder.
    pub fn try_unwrap(self) -> std::result::Result<Vec<T>, Self> {
        Arc::try_unwrap(self.data).map_err(|data| Self { data })
    }
}

impl<T: StreamElement> SharedArray<T> {
    /// Streams the array as an `i32` count followed by packed elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthOverflow`] if the quantity exceeds `i32::MAX`,
    /// or [`Error::Io`] if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let count =
            i32::try_from(self.quantity()).map_err(|_| Error::LengthOverflow(self.quantity()))?;
        trace!(count, element_size = T::SIZE, "SharedArray::write_to");
        count.write_to(writer)?;
        for element in self.data.iter() {
            element.write_to(writer)?;
        }
        Ok(())
    }

    /// Reads an array previously written by [`write_to`](Self::write_to).
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeLength`] if the header count is negative
    /// - [`Error::Truncated`] if the stream ends mid-array
    /// - [`Error::Io`] for any other reader failure
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let count = i32::read_from(reader)?;
        if count < 0 {
            return Err(Error::NegativeLength(count));
        }
        let expected = count as usize;
        trace!(expected, element_size = T::SIZE, "SharedArray::read_from");

        let mut data = Vec::with_capacity(expected.min(MAX_PREALLOC));
        for read in 0..expected {
            match T::read_from(reader) {
                Ok(element) => data.push(element),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(Error::truncated(expected, read));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Self::from_vec(data))
    }

    /// Encodes the array into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(4 + self.quantity() * T::SIZE);
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Decodes an array from bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut bytes)
    }

    /// Returns the encoded size in bytes, header included.
    #[inline]
    pub fn stream_size(&self) -> usize {
        i32::SIZE + self.quantity() * T::SIZE
    }
}

impl<T> Index<usize> for SharedArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Clone> IndexMut<usize> for SharedArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> From<Vec<T>> for SharedArray<T> {
    #[inline]
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedArray")
            .field("quantity", &self.quantity())
            .field("ref_count", &self.ref_count())
            .field("data", &self.data)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for SharedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.data == other.data
    }
}

/// Non-owning observer of a [`SharedArray`] buffer.
pub struct WeakSharedArray<T> {
    data: Weak<Vec<T>>,
}

impl<T> WeakSharedArray<T> {
    /// Returns `true` once every owning handle has been dropped.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.data.strong_count() == 0
    }

    /// Returns the number of owning handles still alive.
    #[inline]
    pub fn ref_count(&self) -> usize {
        self.data.strong_count()
    }

    /// Recovers an owning handle if the buffer is still alive.
    pub fn upgrade(&self) -> Option<SharedArray<T>> {
        self.data.upgrade().map(|data| SharedArray { data })
    }
}

impl<T> fmt::Debug for WeakSharedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSharedArray")
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_new_is_default_filled() {
        let a: SharedArray<f32> = SharedArray::new(4);
        assert_eq!(a.quantity(), 4);
        assert!(a.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zero_length() {
        let a: SharedArray<u32> = SharedArray::new(0);
        assert!(a.is_empty());
        assert_eq!(a.get(0), None);
        assert_eq!(a.to_bytes().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_write_then_read_back() {
        let mut a: SharedArray<i32> = SharedArray::new(5);
        for i in 0..5 {
            a[i] = (i as i32) * 10 - 7;
        }
        assert_eq!(a.as_slice(), &[-7, 3, 13, 23, 33]);
    }

    #[test]
    fn test_share_counts_references() {
        let a = SharedArray::from_vec(vec![1u8, 2, 3]);
        let b = a.share();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.ref_count(), 2);
        drop(b);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let a = SharedArray::from_vec(vec![1.0f64, 2.0]);
        let mut b = a.duplicate(CopyMode::Deep);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        b.set(0, 9.0);
        assert_eq!(a[0], 1.0);
        assert_eq!(b[0], 9.0);
    }

    #[test]
    fn test_write_through_shared_handle_detaches() {
        let a = SharedArray::from_vec(vec![1, 2, 3]);
        let mut b = a.duplicate(CopyMode::Share);
        b[1] = 20;
        assert!(!a.ptr_eq(&b));
        assert_eq!(a[1], 2);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn test_release_frees_buffer() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);

        #[derive(Clone)]
        struct Tracked;
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let a = SharedArray::from_vec(vec![Tracked, Tracked, Tracked]);
        let b = a.share();
        let observer = a.downgrade();

        drop(a);
        assert!(!observer.is_released());
        assert_eq!(DROPS.load(Ordering::SeqCst), 0);

        drop(b);
        assert!(observer.is_released());
        assert!(observer.upgrade().is_none());
        assert_eq!(DROPS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_stream_layout() {
        let a = SharedArray::from_vec(vec![1u16, 0x0302]);
        let bytes = a.to_bytes().unwrap();
        assert_eq!(bytes, vec![2, 0, 0, 0, 1, 0, 2, 3]);
        assert_eq!(bytes.len(), a.stream_size());
        assert_eq!(SharedArray::<u16>::from_bytes(&bytes).unwrap(), a);
    }

    #[test]
    fn test_stream_negative_header() {
        let bytes = (-1i32).to_le_bytes();
        let err = SharedArray::<f32>::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::NegativeLength(-1)));
    }

    #[test]
    fn test_stream_truncated() {
        let mut bytes = 3i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&[0, 0]);
        let err = SharedArray::<f32>::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                expected: 3,
                read: 1
            }
        ));
    }

    #[test]
    fn test_out_of_range_get() {
        let a = SharedArray::from_vec(vec![5u32]);
        assert_eq!(a.get(1), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let a = SharedArray::from_vec(vec![5u32]);
        let _ = a[1];
    }
}
