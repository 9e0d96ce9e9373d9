use crate::models::{Candidate, CandidateId};

/// Maps shown row positions to candidate ids.
///
/// Row N on screen (1-based) is entry N-1 here. The index is only ever built
/// whole from a fresh candidate list, so numbering stays continuous after
/// deletes and never points at a stale id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisplayIndex {
    ids: Vec<CandidateId>,
}

/// Rows and their index, always built together.
#[derive(Debug, Default, Clone)]
pub struct CandidateView {
    pub rows: Vec<String>,
    pub index: DisplayIndex,
}

impl DisplayIndex {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id shown at a 0-based list offset.
    pub fn id_at(&self, offset: usize) -> Option<CandidateId> {
        self.ids.get(offset).copied()
    }

    /// Id shown at a 1-based display position.
    pub fn id_for_position(&self, position: usize) -> Option<CandidateId> {
        position.checked_sub(1).and_then(|offset| self.id_at(offset))
    }

    #[cfg(test)]
    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }
}

impl CandidateView {
    pub fn build(candidates: &[Candidate]) -> Self {
        let rows = candidates
            .iter()
            .enumerate()
            .map(|(offset, candidate)| candidate.display_line(offset + 1))
            .collect();
        let ids = candidates.iter().map(|candidate| candidate.id).collect();

        Self {
            rows,
            index: DisplayIndex { ids },
        }
    }
}
