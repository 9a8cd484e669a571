//! Goal id generation.

use axon_types::{GoalId, Stamp};
use std::sync::atomic::{AtomicU64, Ordering};

/// Produces process-unique goal ids.
///
/// Ids are `<node-name>-<sequence>-<stamp>`: the owning node's name, a
/// process-wide monotonically increasing counter, and the wall-clock
/// time of generation. The same stamp is embedded in the returned
/// [`GoalId`].
///
/// # Example
///
/// ```
/// use axon_client::GoalIdGenerator;
///
/// let ids = GoalIdGenerator::new("probe_client");
/// let a = ids.generate();
/// let b = ids.generate();
///
/// assert!(a.id.starts_with("probe_client-0-"));
/// assert!(b.id.starts_with("probe_client-1-"));
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct GoalIdGenerator {
    node_name: String,
    counter: AtomicU64,
}

impl GoalIdGenerator {
    /// Creates a generator for the named client node.
    #[must_use]
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Returns a fresh goal id stamped with the current time.
    #[must_use]
    pub fn generate(&self) -> GoalId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let stamp = Stamp::now();
        GoalId::new(format!("{}-{}-{}", self.node_name, seq, stamp), stamp)
    }

    /// The node name embedded in every generated id.
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ids_are_unique_and_ordered() {
        let ids = GoalIdGenerator::new("n");
        let generated: Vec<_> = (0..100).map(|_| ids.generate()).collect();

        let unique: HashSet<_> = generated.iter().map(|g| g.id.clone()).collect();
        assert_eq!(unique.len(), 100);
        assert!(generated[0].id.starts_with("n-0-"));
        assert!(generated[99].id.starts_with("n-99-"));
    }

    #[test]
    fn stamp_is_current() {
        let ids = GoalIdGenerator::new("n");
        let before = Stamp::now();
        let id = ids.generate();
        assert!(id.stamp >= before);
        assert!(!id.stamp.is_zero());
    }

    #[test]
    fn unique_across_threads() {
        let ids = Arc::new(GoalIdGenerator::new("n"));
        let mut joins = Vec::new();
        for _ in 0..4 {
            let ids = Arc::clone(&ids);
            joins.push(std::thread::spawn(move || {
                (0..50).map(|_| ids.generate().id).collect::<Vec<_>>()
            }));
        }

        let mut all = HashSet::new();
        for join in joins {
            for id in join.join().expect("generator thread") {
                assert!(all.insert(id), "duplicate goal id");
            }
        }
        assert_eq!(all.len(), 200);
    }
}
