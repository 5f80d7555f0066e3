//! Helpers that produce seed items for the shared pool.

use rand::Rng;

use super::WorkItem;

/// Builds `count` items named `"{prefix} nr {i}"` with random durations.
///
/// See [`WorkItem::random`] for the duration range.
pub fn sample_items(prefix: &str, count: usize) -> Vec<WorkItem> {
    sample_items_with(prefix, count, &mut rand::rng())
}

/// Same as [`sample_items`] with an explicit random source.
pub fn sample_items_with<R: Rng + ?Sized>(prefix: &str, count: usize, rng: &mut R) -> Vec<WorkItem> {
    (0..count)
        .map(|i| WorkItem::random(format!("{prefix} nr {i}"), rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_items_names_in_order() {
        let items = sample_items("Job", 3);
        let names: Vec<&str> = items.iter().map(WorkItem::name).collect();
        assert_eq!(names, ["Job nr 0", "Job nr 1", "Job nr 2"]);
        assert!(items.iter().all(|i| i.started_at().is_none()));
    }
}
