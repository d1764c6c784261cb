//! The `memory` module owns the bus "antenna": a large buffer walked by a
//! strided cursor so that every access drives a new line onto the memory bus.
//!
//! - [`AccessBuffer`]: an anonymous mapping with a span-aligned access window.
//! - [`advance_offset`]: the cursor step used by [`AccessBuffer::advance_and_load`].
mod access_buffer;

pub use self::access_buffer::{AccessBuffer, BufferError};

/// Advances `offset` by `stride` inside the window selected by `mask`.
///
/// Bits above `mask` are kept, bits below wrap around. For an `offset` in
/// `[0, mask]` the result is in `[0, mask]` as well.
///
/// # Examples
///
/// ```
/// use busradio_core::memory::advance_offset;
///
/// assert_eq!(advance_offset(0, 128, 0xFFF), 128);
/// assert_eq!(advance_offset(0xF80, 128, 0xFFF), 0);
/// assert_eq!(advance_offset(0x1F80, 128, 0xFFF), 0x1000);
/// ```
#[inline(always)]
pub const fn advance_offset(offset: usize, stride: usize, mask: usize) -> usize {
    (offset & !mask) | (offset.wrapping_add(stride) & mask)
}

#[cfg(test)]
mod tests {
    use super::advance_offset;

    #[test]
    fn advance_stays_within_mask() {
        for shift in [7, 12, 16, 23] {
            let mask = (1usize << shift) - 1;
            for stride in [1, 64, 128, 192, 4096] {
                let mut offset = 0;
                for _ in 0..100_000 {
                    offset = advance_offset(offset, stride, mask);
                    assert!(offset <= mask, "offset {:x} mask {:x}", offset, mask);
                }
            }
        }
    }

    #[test]
    fn advance_keeps_high_bits() {
        let mask = 0xFFFF;
        let base = 0x3_0000;
        let mut offset = base + 0x10;
        for _ in 0..10_000 {
            offset = advance_offset(offset, 128, mask);
            assert_eq!(offset & !mask, base);
        }
    }

    #[test]
    fn advance_revisits_after_span_over_stride() {
        let mask = (1usize << 16) - 1;
        let stride = 128;
        let period = (mask + 1) / stride;
        let mut offset = 0;
        let mut seen = std::collections::HashSet::new();
        for _ in 0..period {
            offset = advance_offset(offset, stride, mask);
            assert!(seen.insert(offset), "line {:x} repeated early", offset);
        }
        assert_eq!(offset, 0);
    }
}
