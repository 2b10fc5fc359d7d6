// dirwatcher - core/watch_state.rs
//
// Per-file scan progress and directory reconciliation.
//
// Entries are kept in insertion order so removals are reported in the order
// the files were first seen. Directories being watched are small, so a
// vector plus per-call hash sets is enough.
//
// Removal is checked against the *full* listing, not the extension-filtered
// one: a tracked file only leaves the state when its name is gone from the
// directory entirely.

use crate::core::model::ReconcileOutcome;
use std::collections::HashSet;

/// A file currently being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrackedFile {
    name: String,
    /// Count of lines already scanned.
    offset: u64,
}

/// Mapping from file name to last-scanned line offset.
#[derive(Debug, Default)]
pub struct WatchState {
    files: Vec<TrackedFile>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `listing` (every entry name in the directory) against the
    /// tracked set.
    ///
    /// Names ending in `ext` that are not yet tracked are added at offset 0.
    /// Tracked names absent from `listing` are dropped.
    pub fn reconcile(&mut self, listing: &[String], ext: &str) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        let mut tracked: HashSet<String> = self.files.iter().map(|f| f.name.clone()).collect();
        for name in listing {
            if name.ends_with(ext) && tracked.insert(name.clone()) {
                self.files.push(TrackedFile {
                    name: name.clone(),
                    offset: 0,
                });
                outcome.added.push(name.clone());
            }
        }

        let present: HashSet<&str> = listing.iter().map(String::as_str).collect();
        self.files.retain(|f| {
            let keep = present.contains(f.name.as_str());
            if !keep {
                outcome.removed.push(f.name.clone());
            }
            keep
        });

        outcome
    }

    /// Remembered offset for `name`, or `None` if it is not tracked.
    pub fn offset(&self, name: &str) -> Option<u64> {
        self.files.iter().find(|f| f.name == name).map(|f| f.offset)
    }

    /// Store a new offset for a tracked file.
    ///
    /// Offsets never move backwards; a smaller value is ignored. Returns
    /// `false` if `name` is not tracked.
    pub fn set_offset(&mut self, name: &str, offset: u64) -> bool {
        match self.files.iter_mut().find(|f| f.name == name) {
            Some(f) => {
                f.offset = f.offset.max(offset);
                true
            }
            None => false,
        }
    }

    /// Tracked names in insertion order.
    pub fn tracked_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_adds_only_matching_extension() {
        let mut state = WatchState::new();
        let outcome = state.reconcile(&names(&["a.txt", "b.log", "c.txt"]), ".txt");
        assert_eq!(outcome.added, names(&["a.txt", "c.txt"]));
        assert!(outcome.removed.is_empty());
        assert_eq!(state.offset("a.txt"), Some(0));
        assert_eq!(state.offset("b.log"), None);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut state = WatchState::new();
        let listing = names(&["a.txt", "b.txt"]);
        state.reconcile(&listing, ".txt");
        let again = state.reconcile(&listing, ".txt");
        let third = state.reconcile(&listing, ".txt");
        assert!(again.is_empty());
        assert!(third.is_empty());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_set_algebra_holds() {
        let mut state = WatchState::new();
        state.reconcile(&names(&["a.txt", "b.txt", "c.txt"]), ".txt");

        let listing = names(&["b.txt", "d.txt", "e.log"]);
        let outcome = state.reconcile(&listing, ".txt");
        assert_eq!(outcome.added, names(&["d.txt"]));
        assert_eq!(outcome.removed, names(&["a.txt", "c.txt"]));
        assert_eq!(state.tracked_names(), names(&["b.txt", "d.txt"]));
    }

    #[test]
    fn test_removals_follow_insertion_order() {
        let mut state = WatchState::new();
        state.reconcile(&names(&["z.txt"]), ".txt");
        state.reconcile(&names(&["z.txt", "a.txt"]), ".txt");
        state.reconcile(&names(&["z.txt", "a.txt", "m.txt"]), ".txt");

        let outcome = state.reconcile(&[], ".txt");
        assert_eq!(outcome.removed, names(&["z.txt", "a.txt", "m.txt"]));
        assert!(state.is_empty());
    }

    #[test]
    fn test_removal_checks_full_listing() {
        let mut state = WatchState::new();
        state.reconcile(&names(&["a.txt"]), ".txt");

        // Still present in the directory, even though it no longer matches
        // the (new) extension filter: stays tracked.
        let outcome = state.reconcile(&names(&["a.txt"]), ".log");
        assert!(outcome.removed.is_empty());
        assert_eq!(state.offset("a.txt"), Some(0));
    }

    #[test]
    fn test_offset_never_decreases() {
        let mut state = WatchState::new();
        state.reconcile(&names(&["a.txt"]), ".txt");
        assert!(state.set_offset("a.txt", 5));
        assert!(state.set_offset("a.txt", 3));
        assert_eq!(state.offset("a.txt"), Some(5));
        assert!(!state.set_offset("missing.txt", 1));
    }

    #[test]
    fn test_readded_file_starts_from_zero() {
        let mut state = WatchState::new();
        state.reconcile(&names(&["a.txt"]), ".txt");
        state.set_offset("a.txt", 10);
        state.reconcile(&[], ".txt");
        let outcome = state.reconcile(&names(&["a.txt"]), ".txt");
        assert_eq!(outcome.added, names(&["a.txt"]));
        assert_eq!(state.offset("a.txt"), Some(0));
    }

    #[test]
    fn test_duplicate_names_in_listing_tracked_once() {
        let mut state = WatchState::new();
        let outcome = state.reconcile(&names(&["a.txt", "a.txt"]), ".txt");
        assert_eq!(outcome.added, names(&["a.txt"]));
        assert_eq!(state.len(), 1);
    }
}
