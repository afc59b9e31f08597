//! Job id allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use queue_core::JobId;

/// Hands out job ids from a monotonic counter.
///
/// Uniqueness holds by construction: every call returns a value no other
/// call has returned, from any thread.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.max(1)),
        }
    }

    /// Allocate the next id.
    pub fn next(&self) -> JobId {
        JobId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next(), JobId(1));
        assert_eq!(ids.next(), JobId(2));
        assert_eq!(ids.next(), JobId(3));
    }

    #[test]
    fn zero_is_never_issued() {
        let ids = IdGenerator::starting_at(0);
        assert_eq!(ids.next(), JobId(1));
    }

    #[test]
    fn concurrent_ids_are_unique() {
        let ids = IdGenerator::new();
        let per_thread = 500;
        let threads = 8;

        let issued: Vec<JobId> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let ids = &ids;
                    s.spawn(move || (0..per_thread).map(|_| ids.next()).collect::<Vec<_>>())
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_default())
                .collect()
        });

        let unique: HashSet<_> = issued.iter().copied().collect();
        assert_eq!(issued.len(), per_thread * threads);
        assert_eq!(unique.len(), issued.len());
    }
}
