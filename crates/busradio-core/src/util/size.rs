/// Memory size representation supporting common units.
///
/// All units use binary (base-2) multipliers (1 KB = 1024 bytes).
///
/// # Examples
///
/// ```
/// use busradio_core::util::Size;
///
/// let span = Size::MB(8);
/// assert_eq!(span.bytes(), 8 * 1024 * 1024);
/// assert!(span.is_power_of_two());
///
/// assert!(!Size::KB(3).is_power_of_two());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Size in bytes
    B(usize),
    /// Size in kilobytes (1 KB = 1024 bytes)
    KB(usize),
    /// Size in megabytes (1 MB = 1024 KB)
    MB(usize),
}

impl Size {
    /// Converts this size to bytes.
    ///
    /// Panics in const contexts and debug builds if the byte count overflows
    /// `usize`; use [`checked_bytes`](Size::checked_bytes) for untrusted sizes.
    pub const fn bytes(&self) -> usize {
        match self {
            Size::B(bytes) => *bytes,
            Size::KB(kb) => *kb * (1 << 10),
            Size::MB(mb) => *mb * (1 << 20),
        }
    }

    /// Converts this size to bytes, or `None` if that overflows `usize`.
    pub const fn checked_bytes(&self) -> Option<usize> {
        match self {
            Size::B(bytes) => Some(*bytes),
            Size::KB(kb) => kb.checked_mul(1 << 10),
            Size::MB(mb) => mb.checked_mul(1 << 20),
        }
    }

    /// Returns whether the size in bytes is a power of two. Overflowing sizes
    /// are not.
    pub const fn is_power_of_two(&self) -> bool {
        match self.checked_bytes() {
            Some(bytes) => bytes.is_power_of_two(),
            None => false,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::B(bytes) => write!(f, "{} B", bytes),
            Size::KB(kb) => write!(f, "{} KB", kb),
            Size::MB(mb) => write!(f, "{} MB", mb),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::util::Size;

    #[test]
    fn size_conversions() {
        assert_eq!(Size::B(12).bytes(), 12);
        assert_eq!(Size::KB(4).bytes(), 4096);
        assert_eq!(Size::MB(12).bytes(), 12 * (1 << 20));
    }

    #[test]
    fn size_display() {
        assert_eq!(Size::MB(8).to_string(), "8 MB");
        assert_eq!(Size::B(0).to_string(), "0 B");
    }

    #[test]
    fn overflowing_size_is_rejected() {
        assert_eq!(Size::MB(usize::MAX).checked_bytes(), None);
        assert_eq!(Size::KB(usize::MAX >> 9).checked_bytes(), None);
        assert_eq!(Size::MB(8).checked_bytes(), Some(8 << 20));
        assert!(!Size::MB(usize::MAX).is_power_of_two());
    }

    #[test]
    fn zero_is_not_a_power_of_two() {
        assert!(!Size::B(0).is_power_of_two());
        assert!(Size::B(1).is_power_of_two());
    }
}
