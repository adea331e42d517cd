//! Dense bit set for minterm coverage.
//!
//! Implicants record which on-set minterms they cover as a set of *positions* in the
//! sorted on-set (not as raw minterm indices), so a set never needs more bits than
//! there are on-set minterms.

/// A bit set backed by a vector of u64 words.
///
/// The set grows as needed when inserting bits beyond the current capacity.
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of set bits (cached for O(1) len())
    count: usize,
}

impl BitSet {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates a new empty bit set with the given capacity (in bits).
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(Self::BITS_PER_WORD)],
            count: 0,
        }
    }

    /// Creates a bit set containing every index in `0..len`.
    pub fn full(len: usize) -> Self {
        let mut words = vec![u64::MAX; len / Self::BITS_PER_WORD];
        let rest = len % Self::BITS_PER_WORD;
        if rest > 0 {
            words.push((1u64 << rest) - 1);
        }
        Self { words, count: len }
    }

    /// Creates a bit set holding a single index.
    pub fn singleton(index: usize) -> Self {
        let mut set = Self::new(index + 1);
        set.insert(index);
        set
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no bits are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Returns true if the bit at the given index is set.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        match self.words.get(word_idx) {
            Some(word) => word & (1u64 << bit_idx) != 0,
            None => false,
        }
    }

    /// Sets the bit at the given index. Returns true if the bit was not previously set.
    pub fn insert(&mut self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let mask = 1u64 << bit_idx;
        let was_clear = self.words[word_idx] & mask == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Clears the bit at the given index. Returns true if the bit was previously set.
    pub fn remove(&mut self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let Some(word) = self.words.get_mut(word_idx) else {
            return false;
        };

        let mask = 1u64 << bit_idx;
        let was_set = *word & mask != 0;
        if was_set {
            *word &= !mask;
            self.count -= 1;
        }
        was_set
    }

    /// Adds every bit of `other` to this set.
    pub fn union_with(&mut self, other: &BitSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, &bits) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= bits;
        }
        self.recount();
    }

    /// Removes every bit of `other` from this set.
    pub fn difference_with(&mut self, other: &BitSet) {
        for (word, &bits) in self.words.iter_mut().zip(other.words.iter()) {
            *word &= !bits;
        }
        self.recount();
    }

    /// Returns the size of the intersection without materializing it.
    pub fn intersection_len(&self, other: &BitSet) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Returns true if every bit of this set is also set in `other`.
    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.intersection_len(other) == self.count
    }

    fn recount(&mut self) {
        self.count = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }

    /// Returns an iterator over all set bit indices, in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            bitset: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.is_subset(other)
    }
}

impl Eq for BitSet {}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = BitSet::default();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

/// Iterator over set bits in a BitSet.
pub struct BitSetIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * BitSet::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = self.bitset.words[self.word_idx];
        }
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = BitSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
