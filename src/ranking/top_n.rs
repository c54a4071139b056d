use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered by the *inverse* of the ranking rule, so the root of
/// the max-heap is always the lowest-priority survivor.
struct Candidate<'c, T, F> {
    item: T,
    rank: &'c F,
}

impl<T, F> Ord for Candidate<'_, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank)(&other.item, &self.item)
    }
}

impl<T, F> PartialOrd for Candidate<'_, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, F> PartialEq for Candidate<'_, T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, F> Eq for Candidate<'_, T, F> where F: Fn(&T, &T) -> Ordering {}

/// Returns the `n` highest ranked items, best first.
///
/// `rank(a, b)` returns `Greater` when `a` should come before `b`. At most
/// `n` items are held at once. Fewer than `n` inputs yield all of them,
/// ranked. The relative order of items `rank` reports as `Equal` is
/// unspecified.
pub fn top_n<T, I, F>(items: I, n: usize, rank: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T, &T) -> Ordering,
{
    if n == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(n.saturating_add(1).min(1024));
    for item in items {
        heap.push(Candidate { item, rank: &rank });
        if heap.len() > n {
            heap.pop();
        }
    }

    // Ascending by the inverted order is descending by rank.
    heap.into_sorted_vec().into_iter().map(|c| c.item).collect()
}
