use core::alloc::Layout;
use core::fmt;

/// The error returned by the fallible allocation methods of [`IntMap`] and
/// [`IntSet`].
///
/// [`IntMap`]: crate::IntMap
/// [`IntSet`]: crate::IntSet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested slot count does not fit in `usize` or exceeds the
    /// maximum allocation size.
    CapacityOverflow,
    /// The allocator refused the request.
    AllocError {
        /// The layout that could not be allocated.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => {
                write!(f, "requested capacity exceeds the maximum table size")
            }
            TryReserveError::AllocError { layout } => {
                write!(
                    f,
                    "allocator failed for {} bytes aligned to {}",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl core::error::Error for TryReserveError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            TryReserveError::CapacityOverflow.to_string(),
            "requested capacity exceeds the maximum table size"
        );

        let layout = Layout::from_size_align(32, 8).unwrap();
        assert_eq!(
            TryReserveError::AllocError { layout }.to_string(),
            "allocator failed for 32 bytes aligned to 8"
        );
    }
}
