use crate::gourd_assert_moderate;

const WORD_BITS: usize = u64::BITS as usize;

/// A finite set of integers, stored as a bitset relative to the smallest value the domain was
/// created with. The bounds and the size are cached.
///
/// A domain only shrinks during search; values are reinserted only when the
/// [`DomainStore`](crate::engine::DomainStore) restores a checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    offset: i32,
    words: Box<[u64]>,
    lower_bound: i32,
    upper_bound: i32,
    size: usize,
}

impl Domain {
    /// The interval `[lower_bound, upper_bound]`; `None` if the interval is empty.
    pub fn new(lower_bound: i32, upper_bound: i32) -> Option<Domain> {
        if lower_bound > upper_bound {
            return None;
        }

        let size = (upper_bound as i64 - lower_bound as i64 + 1) as usize;
        let mut words = vec![u64::MAX; size.div_ceil(WORD_BITS)];
        let remainder = size % WORD_BITS;
        if remainder != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << remainder) - 1;
            }
        }

        Some(Domain {
            offset: lower_bound,
            words: words.into_boxed_slice(),
            lower_bound,
            upper_bound,
            size,
        })
    }

    /// The set of the given values (duplicates are ignored); `None` if there are no values.
    pub fn from_values(values: &[i32]) -> Option<Domain> {
        let lower_bound = *values.iter().min()?;
        let upper_bound = *values.iter().max()?;

        let mut domain = Domain::new(lower_bound, upper_bound)?;
        domain.words.iter_mut().for_each(|word| *word = 0);
        domain.size = 0;
        for &value in values {
            let (word, bit) = domain.position(value);
            if domain.words[word] & bit == 0 {
                domain.words[word] |= bit;
                domain.size += 1;
            }
        }

        Some(domain)
    }

    fn position(&self, value: i32) -> (usize, u64) {
        let index = (value as i64 - self.offset as i64) as usize;
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }

    fn value_at(&self, word: usize, bit: u32) -> i32 {
        (self.offset as i64 + (word * WORD_BITS) as i64 + bit as i64) as i32
    }

    fn in_range(&self, value: i32) -> bool {
        let index = value as i64 - self.offset as i64;
        index >= 0 && (index as usize) < self.words.len() * WORD_BITS
    }

    pub fn contains(&self, value: i32) -> bool {
        if value < self.lower_bound || value > self.upper_bound {
            return false;
        }
        let (word, bit) = self.position(value);
        self.words[word] & bit != 0
    }

    pub fn lower_bound(&self) -> i32 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> i32 {
        self.upper_bound
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_fixed(&self) -> bool {
        self.size == 1
    }

    pub fn fixed_value(&self) -> Option<i32> {
        self.is_fixed().then_some(self.lower_bound)
    }

    /// The values in increasing order.
    pub fn iter(&self) -> DomainIterator<'_> {
        let (first_word, _) = self.position(self.lower_bound);
        DomainIterator {
            domain: self,
            word_index: first_word,
            remaining: self.words.get(first_word).copied().unwrap_or(0),
        }
    }

    /// The smallest value in the domain which is at least `value`.
    fn next_value_from(&self, value: i32) -> Option<i32> {
        if !self.in_range(value) {
            return None;
        }
        let (mut word, bit) = self.position(value);
        // Clear the bits below `value`.
        let mut remaining = self.words[word] & !(bit - 1);
        loop {
            if remaining != 0 {
                return Some(self.value_at(word, remaining.trailing_zeros()));
            }
            word += 1;
            if word >= self.words.len() {
                return None;
            }
            remaining = self.words[word];
        }
    }

    /// The largest value in the domain which is at most `value`.
    fn previous_value_from(&self, value: i32) -> Option<i32> {
        if !self.in_range(value) {
            return None;
        }
        let (mut word, bit) = self.position(value);
        // Keep `value` and the bits below it.
        let mut remaining = self.words[word] & (bit | (bit - 1));
        loop {
            if remaining != 0 {
                let highest = WORD_BITS as u32 - 1 - remaining.leading_zeros();
                return Some(self.value_at(word, highest));
            }
            if word == 0 {
                return None;
            }
            word -= 1;
            remaining = self.words[word];
        }
    }

    /// Removes a value which is in the domain. The domain should contain at least one other
    /// value.
    pub(crate) fn remove(&mut self, value: i32) {
        gourd_assert_moderate!(self.contains(value) && self.size > 1);

        let (word, bit) = self.position(value);
        self.words[word] &= !bit;
        self.size -= 1;

        if value == self.lower_bound {
            if let Some(next) = self.next_value_from(value) {
                self.lower_bound = next;
            }
        }
        if value == self.upper_bound {
            if let Some(previous) = self.previous_value_from(value) {
                self.upper_bound = previous;
            }
        }
    }

    /// Reinserts a value which was previously removed.
    pub(crate) fn insert(&mut self, value: i32) {
        gourd_assert_moderate!(self.in_range(value) && !self.contains(value));

        let (word, bit) = self.position(value);
        self.words[word] |= bit;
        self.size += 1;
        self.lower_bound = self.lower_bound.min(value);
        self.upper_bound = self.upper_bound.max(value);
    }
}

/// Iterates the values of a [`Domain`] in increasing order.
#[derive(Debug)]
pub struct DomainIterator<'a> {
    domain: &'a Domain,
    word_index: usize,
    remaining: u64,
}

impl Iterator for DomainIterator<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        while self.remaining == 0 {
            self.word_index += 1;
            self.remaining = *self.domain.words.get(self.word_index)?;
        }

        let bit = self.remaining.trailing_zeros();
        // Clear the lowest set bit.
        self.remaining &= self.remaining - 1;
        Some(self.domain.value_at(self.word_index, bit))
    }
}
