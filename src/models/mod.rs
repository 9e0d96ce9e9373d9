use serde::{Deserialize, Serialize};

/// Database-assigned candidate identifier.
pub type CandidateId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub party: String,
}

// One row of the results query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub name: String,
    pub party: String,
    pub votes: i64,
}

impl Candidate {
    /// Label used in the candidate list, numbered by display position.
    pub fn display_line(&self, position: usize) -> String {
        format!("{}. {} ({})", position, self.name, self.party)
    }
}

impl Tally {
    pub fn summary_line(&self) -> String {
        format!("{} ({}) - {} votes", self.name, self.party, self.votes)
    }
}
