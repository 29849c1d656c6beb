//! HeightIndex - O(log n) prefix sums and lower_bound via Fenwick tree
//!
//! Tracks the laid-out height of every line so that vertical offsets can be
//! mapped back to lines without walking the whole line array.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `push`: O(log n) amortized (O(n) when the backing tree grows)
//! - `truncate`: O(n)
//! - `total`: O(log n)
//! - `len`: O(1)

/// HeightIndex wraps a Fenwick tree for O(log n) prefix sum queries and updates.
///
/// The raw heights are kept alongside the tree. Growing the tree rebuilds it from
/// them, since a Fenwick tree cannot be extended in place.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (capacity >= heights.len())
    tree: Vec<isize>,
    /// Height of each line, 0-indexed
    heights: Vec<u32>,
}

impl HeightIndex {
    /// Creates a new HeightIndex with the given initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seqcanvas::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Height stored at `index`, if any.
    pub fn height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    /// Sets the height at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seqcanvas::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(5);
    /// index.set(0, 10);
    /// assert_eq!(index.prefix_sum(0), 10);
    /// ```
    pub fn set(&mut self, index: usize, height: u32) {
        assert!(
            index < self.heights.len(),
            "index {} out of bounds (len: {})",
            index,
            self.heights.len()
        );

        let delta = height as isize - self.heights[index] as isize;
        self.heights[index] = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Returns the cumulative height up to and including the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seqcanvas::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(3);
    /// index.push(4);
    /// index.push(5);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.heights.len(),
            "index {} out of bounds (len: {})",
            index,
            self.heights.len()
        );

        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Cumulative height of all lines before `index`; the line's vertical offset.
    ///
    /// `offset_of(len())` is the total height.
    pub fn offset_of(&self, index: usize) -> usize {
        if index == 0 || self.is_empty() {
            0
        } else {
            self.prefix_sum(index.min(self.heights.len()) - 1)
        }
    }

    /// Binary search for the first index where `prefix_sum(index) > value`.
    ///
    /// Returns the index of the line containing the given vertical offset, or `None`
    /// if `value >= total()` or the index is empty. Zero-height lines never contain
    /// an offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seqcanvas::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(10);  // [0..10)
    /// index.push(20);  // [10..30)
    /// index.push(15);  // [30..45)
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), Some(2));
    /// assert_eq!(index.lower_bound(100), None);
    /// ```
    pub fn lower_bound(&self, value: usize) -> Option<usize> {
        let mut left = 0;
        let mut right = self.heights.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.heights.len()).then_some(left)
    }

    /// Returns the total height of all lines.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seqcanvas::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(1);
    /// index.push(5);
    /// index.push(3);
    /// assert_eq!(index.total(), 8);
    /// ```
    pub fn total(&self) -> usize {
        self.offset_of(self.heights.len())
    }

    /// Returns the number of lines in the index.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns true if the index contains no lines.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a new line with the given height.
    pub fn push(&mut self, height: u32) {
        self.heights.push(height);
        if self.heights.len() > self.tree.len() {
            let capacity = self.tree.len().max(1) * 2;
            self.rebuild(capacity.max(self.heights.len()));
        } else {
            fenwick::array::update(&mut self.tree, self.heights.len() - 1, height as isize);
        }
    }

    /// Resizes to `len` lines; new lines get height 0.
    pub fn resize(&mut self, len: usize) {
        if len < self.heights.len() {
            self.heights.truncate(len);
            self.rebuild(self.tree.len());
        } else {
            while self.heights.len() < len {
                self.push(0);
            }
        }
    }

    /// Clears all lines, retaining capacity.
    pub fn clear(&mut self) {
        self.heights.clear();
        self.tree.iter_mut().for_each(|slot| *slot = 0);
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity, 0);
        for (index, &height) in self.heights.iter().enumerate() {
            if height != 0 {
                fenwick::array::update(&mut self.tree, index, height as isize);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_index() {
        let index = HeightIndex::new(10);
        assert_eq!(index.len(), 0);
        assert_eq!(index.total(), 0);
        assert!(index.is_empty());
        assert_eq!(index.lower_bound(0), None);
    }

    #[test]
    fn set_updates_later_prefix_sums() {
        let mut index = HeightIndex::new(10);
        index.push(3);
        index.push(4);
        index.push(5);

        index.set(1, 10);

        assert_eq!(index.prefix_sum(0), 3);
        assert_eq!(index.prefix_sum(1), 13);
        assert_eq!(index.prefix_sum(2), 18);
        assert_eq!(index.height(1), Some(10));
    }

    #[test]
    fn lower_bound_at_boundaries() {
        let mut index = HeightIndex::new(10);
        index.push(5);
        index.push(5);
        index.push(5);

        assert_eq!(index.lower_bound(0), Some(0));
        assert_eq!(index.lower_bound(5), Some(1));
        assert_eq!(index.lower_bound(10), Some(2));
        assert_eq!(index.lower_bound(15), None);
    }

    #[test]
    fn lower_bound_skips_zero_height_lines() {
        let mut index = HeightIndex::new(4);
        index.push(0);
        index.push(4);
        index.push(0);
        index.push(2);
        assert_eq!(index.lower_bound(0), Some(1));
        assert_eq!(index.lower_bound(4), Some(3));
    }

    #[test]
    fn offset_of_is_exclusive_prefix() {
        let mut index = HeightIndex::new(4);
        index.push(2);
        index.push(3);
        assert_eq!(index.offset_of(0), 0);
        assert_eq!(index.offset_of(1), 2);
        assert_eq!(index.offset_of(2), 5);
    }

    #[test]
    fn growth_beyond_capacity_keeps_sums() {
        let mut index = HeightIndex::new(1);
        for height in 1..=9 {
            index.push(height);
        }
        assert_eq!(index.total(), 45);
        for i in 0..9 {
            assert_eq!(index.prefix_sum(i), (1..=i + 1).sum::<usize>());
        }
    }

    #[test]
    fn resize_shrinks_and_grows() {
        let mut index = HeightIndex::new(2);
        index.push(4);
        index.push(6);
        index.push(8);

        index.resize(2);
        assert_eq!(index.total(), 10);

        index.resize(4);
        assert_eq!(index.len(), 4);
        assert_eq!(index.total(), 10);
        index.set(3, 1);
        assert_eq!(index.total(), 11);
    }

    #[test]
    fn clear_and_reuse() {
        let mut index = HeightIndex::new(10);
        index.push(5);
        index.clear();

        index.push(10);
        assert_eq!(index.len(), 1);
        assert_eq!(index.total(), 10);
    }

    proptest! {
        /// prefix_sum(i) == sum(heights[0..=i]), regardless of starting capacity
        #[test]
        fn prop_prefix_sum_is_cumulative(
            heights in prop::collection::vec(0u32..=100, 1..50),
            capacity in 0usize..8,
        ) {
            let mut index = HeightIndex::new(capacity);
            for &h in &heights {
                index.push(h);
            }

            let mut expected_sum = 0usize;
            for (i, &h) in heights.iter().enumerate() {
                expected_sum += h as usize;
                prop_assert_eq!(index.prefix_sum(i), expected_sum);
            }
        }

        /// lower_bound(y) names the line whose span contains y
        #[test]
        fn prop_lower_bound_contains_offset(
            heights in prop::collection::vec(0u32..=20, 1..40),
            probe in 0usize..1000,
        ) {
            let mut index = HeightIndex::new(heights.len());
            for &h in &heights {
                index.push(h);
            }

            match index.lower_bound(probe) {
                Some(line) => {
                    prop_assert!(index.offset_of(line) <= probe);
                    prop_assert!(probe < index.prefix_sum(line));
                }
                None => prop_assert!(probe >= index.total()),
            }
        }

        /// after set(i, h), height(i) == h and the total moves by the delta
        #[test]
        fn prop_set_updates_height(
            heights in prop::collection::vec(1u32..=100, 1..50),
            update_index in 0usize..50,
            new_height in 0u32..=100
        ) {
            let mut index = HeightIndex::new(heights.len());
            for &h in &heights {
                index.push(h);
            }

            if update_index < index.len() {
                let before = index.total() as i64;
                let old = heights[update_index] as i64;
                index.set(update_index, new_height);
                prop_assert_eq!(index.height(update_index), Some(new_height));
                prop_assert_eq!(index.total() as i64, before - old + new_height as i64);
            }
        }
    }
}
