/// 32-bit golden-ratio constant used by [`IntKey::mix`].
pub const GOLDEN_RATIO: u32 = 0x9E37_79B9;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width integer usable as a key in [`IntMap`] and [`IntSet`].
///
/// The key value zero doubles as the "free slot" marker inside the table, so
/// implementors must provide it as [`IntKey::ZERO`]. The trait is sealed and
/// implemented for every primitive integer type.
///
/// [`IntMap`]: crate::IntMap
/// [`IntSet`]: crate::IntSet
pub trait IntKey: Copy + Eq + sealed::Sealed {
    /// The zero value of the key type.
    const ZERO: Self;

    /// Scrambles the key's bit pattern into a slot-index seed.
    ///
    /// The key is multiplied by [`GOLDEN_RATIO`] and the product is xored with
    /// itself shifted right by 16 bits. Keys narrower than 32 bits are widened
    /// to 32 bits first so that the shift mixes high bits back in. The result
    /// depends only on the key, never on table state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intmap::IntKey;
    ///
    /// assert_eq!(0u64.mix(), 0);
    /// assert_eq!(1u64.mix(), 0x9E37_79B9 ^ 0x9E37);
    /// assert_eq!(7i32.mix(), 7u32.mix());
    /// ```
    fn mix(self) -> usize;

    /// Returns `true` for the zero key.
    #[inline(always)]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! impl_int_key {
    ($($key:ty => $wide:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $key {}

            impl IntKey for $key {
                const ZERO: Self = 0;

                #[inline(always)]
                fn mix(self) -> usize {
                    let h = (self as $wide).wrapping_mul(GOLDEN_RATIO as $wide);
                    (h ^ (h >> 16)) as usize
                }
            }
        )*
    };
}

impl_int_key! {
    u8 => u32,
    u16 => u32,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
    i8 => u32,
    i16 => u32,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
}
