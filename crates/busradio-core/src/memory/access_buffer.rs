use crate::memory::advance_offset;
use crate::util::{Size, mmap, munmap};
use log::debug;
use thiserror::Error;

/// Errors that can occur when creating an [`AccessBuffer`].
#[derive(Debug, Error)]
pub enum BufferError {
    /// The span, or the mapping around it, does not fit the address space
    #[error("span {0} is too large")]
    SpanTooLarge(Size),
    /// The access window must be a power of two so it can be masked
    #[error("span {0} is not a power of two")]
    SpanNotPowerOfTwo(Size),
    /// The stride must be non-zero and smaller than the span
    #[error("stride {stride} is invalid for span {span}")]
    InvalidStride {
        /// Requested stride in bytes
        stride: usize,
        /// Requested span
        span: Size,
    },
    /// Mapping the backing memory failed
    #[error("failed to map {len} bytes: {source}")]
    Mmap {
        /// Requested mapping length in bytes
        len: usize,
        /// OS error
        source: std::io::Error,
    },
}

/// A memory region walked by a strided cursor.
///
/// The backing mapping is twice the span so that a window aligned to the span
/// always fits. Every [`advance_and_load`](AccessBuffer::advance_and_load)
/// touches the next line of that window and wraps around after
/// `span / stride` calls.
pub struct AccessBuffer {
    mapping: *mut u8,
    mapping_len: usize,
    base: *const u8,
    mask: usize,
    stride: usize,
    cursor: usize,
}

impl AccessBuffer {
    /// Maps a new buffer with an access window of `span` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `span` overflows the address space or is not a power
    /// of two, if `stride` is zero or not smaller than `span`, or if the
    /// mapping fails.
    pub fn new(span: Size, stride: usize) -> Result<Self, BufferError> {
        let len = span.checked_bytes().ok_or(BufferError::SpanTooLarge(span))?;
        if !len.is_power_of_two() {
            return Err(BufferError::SpanNotPowerOfTwo(span));
        }
        if stride == 0 || stride >= len {
            return Err(BufferError::InvalidStride { stride, span });
        }
        let mapping_len = len
            .checked_mul(2)
            .ok_or(BufferError::SpanTooLarge(span))?;
        let mapping: *mut u8 =
            mmap(mapping_len, 0x11).map_err(|source| BufferError::Mmap {
                len: mapping_len,
                source,
            })?;
        let mask = len - 1;
        let aligned = (mapping as usize + mask) & !mask;
        let base = unsafe { mapping.add(aligned - mapping as usize) }.cast_const();
        debug!(
            "Access window {} at {:p} (mapping {:p}, stride {})",
            span, base, mapping, stride
        );
        Ok(Self {
            mapping,
            mapping_len,
            base,
            mask,
            stride,
            cursor: 0,
        })
    }

    /// Advances the cursor by one stride and loads one word at the new position.
    ///
    /// The load is volatile and its result passes through
    /// [`std::hint::black_box`], so it is never optimized away.
    #[inline(always)]
    pub fn advance_and_load(&mut self) -> u32 {
        self.cursor = advance_offset(self.cursor, self.stride, self.mask);
        // cursor <= mask; word-aligned so the load ends inside the window
        let offset = self.cursor & !(std::mem::size_of::<u32>() - 1);
        let value = unsafe { std::ptr::read_volatile(self.base.add(offset) as *const u32) };
        std::hint::black_box(value)
    }

    /// Performs `n` back-to-back accesses.
    #[inline(always)]
    pub fn burst(&mut self, n: u64) {
        for _ in 0..n {
            self.advance_and_load();
        }
    }

    /// Current cursor offset into the access window.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Size of the access window in bytes.
    pub fn span(&self) -> usize {
        self.mask + 1
    }

    /// Distance in bytes between consecutive accesses.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Start of the span-aligned access window.
    pub fn base(&self) -> *const u8 {
        self.base
    }
}

impl Drop for AccessBuffer {
    fn drop(&mut self) {
        unsafe { munmap(self.mapping, self.mapping_len) };
    }
}
