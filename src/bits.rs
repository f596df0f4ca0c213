//! A [`BitSet`] for capability and property bitmaps reported by `evdev` and sysfs.

use sealed::Array;
pub(crate) use sealed::BitValueImpl;

use std::{ffi::c_ulong, fmt};

mod sealed {
    use super::Word;

    pub trait BitValueImpl {
        #[doc(hidden)]
        type __PrivateArray: AsRef<[Word]> + AsMut<[Word]> + Copy;
        #[doc(hidden)]
        const __PRIVATE_ZERO: Self::__PrivateArray;

        // `index` must fit in the native integer type
        fn from_index(index: usize) -> Self;
        fn into_index(self) -> usize;
    }

    pub(crate) type Array<V> = <V as BitValueImpl>::__PrivateArray;
}

/// The underlying word type used by [`BitSet`]s.
///
/// This is an `unsigned long` in C, which may vary between platforms.
pub type Word = c_ulong;

/// Types that can be used in [`BitSet`].
pub trait BitValue: Copy + sealed::BitValueImpl {
    /// The largest value that can be stored in a [`BitSet`].
    const MAX: Self;
}

/// A set of `V`, stored as a bit set.
pub struct BitSet<V: BitValue> {
    pub(crate) words: Array<V>,
}

impl<V: BitValue> Copy for BitSet<V> {}
impl<V: BitValue> Clone for BitSet<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V: BitValue> Default for BitSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: BitValue> BitSet<V> {
    /// Creates an empty bit set that doesn't contain any values.
    pub const fn new() -> Self {
        Self {
            words: V::__PRIVATE_ZERO,
        }
    }

    /// Creates a bit set whose first word is `word`.
    ///
    /// Bits above [`<V as BitValue>::MAX`][BitValue::MAX] are discarded.
    pub fn from_first_word(word: Word) -> Self {
        let mut this = Self::new();
        this.words_mut()[0] = word;
        this.clear_above_max();
        this
    }

    /// Returns a mutable reference to the underlying [`Word`]s making up this [`BitSet`].
    ///
    /// This is the buffer handed to `EVIOCGBIT`-style ioctls.
    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        self.words.as_mut()
    }

    fn clear_above_max(&mut self) {
        let max = V::MAX.into_index();
        for (i, word) in self.words.as_mut().iter_mut().enumerate() {
            let first = i * Word::BITS as usize;
            if first > max {
                *word = 0;
            } else if max - first < Word::BITS as usize - 1 {
                *word &= (1 << (max - first + 1)) - 1;
            }
        }
    }

    /// Returns whether `self` contains `value`.
    pub fn contains(&self, value: V) -> bool {
        if value.into_index() > V::MAX.into_index() {
            return false;
        }
        let index = value.into_index();
        let wordpos = index / Word::BITS as usize;
        let bitpos = index % Word::BITS as usize;

        self.words.as_ref()[wordpos] & (1 << bitpos) != 0
    }

    /// Inserts `value` into `self`, setting the appropriate bit.
    ///
    /// Returns `true` if `value` was newly inserted, or `false` if it was already present.
    ///
    /// # Panics
    ///
    /// Panics if `value` is larger than [`<V as BitValue>::MAX`][BitValue::MAX].
    pub fn insert(&mut self, value: V) -> bool {
        assert!(
            value.into_index() <= V::MAX.into_index(),
            "value out of range for `BitSet` storage (value's index is {}, max is {})",
            value.into_index(),
            V::MAX.into_index(),
        );

        let present = self.contains(value);

        let index = value.into_index();
        let wordpos = index / Word::BITS as usize;
        let bitpos = index % Word::BITS as usize;
        self.words.as_mut()[wordpos] |= 1 << bitpos;
        !present
    }

    /// Returns an iterator over all values in `self`, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = V> + '_ {
        (0..=V::MAX.into_index())
            .map(V::from_index)
            .filter(|v| self.contains(*v))
    }
}

impl<V: BitValue + fmt::Debug> fmt::Debug for BitSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: BitValue> PartialEq for BitSet<V> {
    fn eq(&self, other: &Self) -> bool {
        self.words.as_ref() == other.words.as_ref()
    }
}
impl<V: BitValue> Eq for BitSet<V> {}

impl<V: BitValue> FromIterator<V> for BitSet<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut this = Self::new();
        for item in iter {
            this.insert(item);
        }
        this
    }
}
