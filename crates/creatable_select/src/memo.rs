//! Dependency-keyed memoization.
//!
//! A [`Memo`] holds one derived value together with the dependencies it
//! was computed from. Reading it with a new set of dependencies that is
//! not equal (`PartialEq`) to the stored one recomputes the value;
//! otherwise the cached value is returned.

use tracing::trace;

/// A cached derivation that recomputes when its declared inputs change.
#[derive(Debug, Clone)]
pub struct Memo<D, V> {
    entry: Option<(D, V)>,
    computations: usize,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, V> Memo<D, V> {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }

    /// Drops the cached value; the next read recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Returns the cached value, if any, without checking dependencies.
    pub fn peek(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Number of times the value has been (re)computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

impl<D: PartialEq, V> Memo<D, V> {
    /// Returns the value for `deps`, computing it with `compute` when the
    /// dependencies differ from the cached ones.
    pub fn get_or_compute<F>(&mut self, deps: D, compute: F) -> &V
    where
        F: FnOnce(&D) -> V,
    {
        let stale = match &self.entry {
            Some((cached, _)) => *cached != deps,
            None => true,
        };

        if stale {
            trace!(memo.computations = self.computations, "memo miss");
            self.entry = None;
        } else {
            trace!("memo hit");
        }

        let computations = &mut self.computations;
        let (_, value) = self.entry.get_or_insert_with(|| {
            *computations += 1;
            let value = compute(&deps);
            (deps, value)
        });
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_only_on_dependency_change() {
        let mut memo: Memo<u32, String> = Memo::new();
        assert_eq!(memo.get_or_compute(1, |d| d.to_string()), "1");
        assert_eq!(memo.get_or_compute(1, |_| "never".to_string()), "1");
        assert_eq!(memo.computations(), 1);

        assert_eq!(memo.get_or_compute(2, |d| d.to_string()), "2");
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn test_invalidate() {
        let mut memo: Memo<(), usize> = Memo::new();
        memo.get_or_compute((), |_| 7);
        memo.invalidate();
        assert!(memo.peek().is_none());
        assert_eq!(*memo.get_or_compute((), |_| 8), 8);
    }
}
