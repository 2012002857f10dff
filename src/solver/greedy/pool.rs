use crate::domain::types::Rank;

/// Shrinking pool of unvisited ranks.
///
/// Holds an explicit list of live indices into a borrowed slice instead of
/// removing elements from a working copy. Candidates are always scanned in
/// insertion order, which keeps the greedy tie-break deterministic for a
/// fixed input ordering.
pub struct UnvisitedPool<'a> {
    ranks: &'a [Rank],
    live: Vec<usize>,
}

impl<'a> UnvisitedPool<'a> {
    pub fn new(ranks: &'a [Rank]) -> Self {
        Self {
            ranks,
            live: (0..ranks.len()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Remaining candidates in stable order, paired with their live position.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, &'a Rank)> + '_ {
        self.live
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, &self.ranks[idx]))
    }

    /// Remove the candidate at the given live position and return it.
    pub fn take(&mut self, pos: usize) -> &'a Rank {
        let idx = self.live.remove(pos);
        &self.ranks[idx]
    }
}
