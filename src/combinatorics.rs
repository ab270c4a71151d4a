//! Generation of combinations of column indices.

use smallvec::SmallVec;

/// An iterator over all size-`k` subsets of `0..n`, in lexicographic order.
///
/// The iterator lends the current combination as a slice, so no allocation
/// happens per step.
///
/// # Examples
///
/// ```rust
/// use linearica::combinatorics::CombinationIterator;
///
/// let mut c = CombinationIterator::new(4, 3);
/// let mut combinations = vec![];
/// while let Some(a) = c.next() {
///     combinations.push(a.to_vec());
/// }
///
/// let ans = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
///
/// assert_eq!(combinations, ans);
/// ```
pub struct CombinationIterator {
    n: u32,
    indices: SmallVec<[u32; 10]>,
    init: bool,
}

impl CombinationIterator {
    /// Create an iterator over the combinations of `k` elements out of `n`.
    pub fn new(n: u32, k: u32) -> CombinationIterator {
        CombinationIterator {
            indices: (0..k).collect(),
            n,
            init: false,
        }
    }

    /// Advance the iterator and return the next combination.
    pub fn next(&mut self) -> Option<&[u32]> {
        if self.indices.len() > self.n as usize {
            return None;
        }

        if !self.init {
            self.init = true;

            return Some(&self.indices);
        }

        // Advance the rightmost index that has room, then refill the tail.
        let mut done = true;
        for (i, v) in self.indices.iter().enumerate().rev() {
            if *v < self.n - self.indices.len() as u32 + i as u32 {
                let a = *v + 1;
                for (p, vv) in self.indices[i..].iter_mut().enumerate() {
                    *vv = a + p as u32;
                }

                done = false;
                break;
            }
        }

        if done {
            None
        } else {
            Some(&self.indices)
        }
    }
}

#[cfg(test)]
mod test {
    use super::CombinationIterator;

    #[test]
    fn lexicographic_order() {
        let mut c = CombinationIterator::new(5, 2);
        let mut combinations = vec![];
        while let Some(a) = c.next() {
            combinations.push(a.to_vec());
        }

        assert_eq!(
            combinations,
            vec![
                [0, 1],
                [0, 2],
                [0, 3],
                [0, 4],
                [1, 2],
                [1, 3],
                [1, 4],
                [2, 3],
                [2, 4],
                [3, 4]
            ]
        );
    }

    #[test]
    fn full_set() {
        let mut c = CombinationIterator::new(3, 3);
        assert_eq!(c.next(), Some(&[0, 1, 2][..]));
        assert_eq!(c.next(), None);
    }

    #[test]
    fn empty_combination() {
        // C(n, 0) has exactly one member: the empty set.
        let mut c = CombinationIterator::new(3, 0);
        assert_eq!(c.next(), Some(&[][..]));
        assert_eq!(c.next(), None);
    }

    #[test]
    fn too_large() {
        let mut c = CombinationIterator::new(2, 3);
        assert_eq!(c.next(), None);
    }
}
