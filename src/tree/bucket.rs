//! Identifier bucket attached to a single power
//!
//! Unordered multiset; extraction always takes the numerically smallest
//! identifier (linear scan + swap-remove).

/// Multiset of identifiers sharing one power.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    identifiers: Vec<u64>,
}

impl Bucket {
    /// Create an empty bucket
    pub fn new() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    /// Append an identifier
    #[inline]
    pub fn add(&mut self, identifier: u64) {
        self.identifiers.push(identifier);
    }

    /// Remove and return the smallest identifier.
    ///
    /// Ties resolve to the first occurrence found by the scan. The last
    /// element is swapped into the vacated slot, so the order of the
    /// remaining identifiers is not preserved. Returns `None` only when
    /// the bucket is already empty.
    pub fn remove_min(&mut self) -> Option<u64> {
        let (index, _) = self
            .identifiers
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (idx, &value)| match best {
                Some((_, current)) if current <= value => best,
                _ => Some((idx, value)),
            })?;
        Some(self.identifiers.swap_remove(index))
    }

    /// Number of identifiers held
    #[inline]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// True once the last identifier has been extracted
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Identifiers in storage order (not sorted)
    pub fn as_slice(&self) -> &[u64] {
        &self.identifiers
    }
}
