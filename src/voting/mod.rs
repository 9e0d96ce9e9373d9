use crate::models::Tally;

// Read-only view over the results query, ready to print
pub struct ResultsSummary {
    pub tallies: Vec<Tally>,
    pub total_votes: i64,
}

impl ResultsSummary {
    pub fn new(tallies: Vec<Tally>) -> Self {
        let total_votes = tallies.iter().map(|t| t.votes).sum();
        Self { tallies, total_votes }
    }

    /// One line per candidate in the order returned, then the total.
    pub fn text(&self) -> String {
        if self.tallies.is_empty() {
            return "No candidates yet.".to_string();
        }

        let mut summary = String::new();
        for tally in &self.tallies {
            summary.push_str(&tally.summary_line());
            summary.push('\n');
        }
        summary.push_str(&format!("\n{} votes cast.", self.total_votes));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(name: &str, party: &str, votes: i64) -> Tally {
        Tally {
            name: name.into(),
            party: party.into(),
            votes,
        }
    }

    #[test]
    fn test_summary_text() {
        let summary =
            ResultsSummary::new(vec![tally("Alice", "Green", 2), tally("Bob", "Blue", 1)]);
        assert_eq!(summary.total_votes, 3);
        assert_eq!(
            summary.text(),
            "Alice (Green) - 2 votes\nBob (Blue) - 1 votes\n\n3 votes cast."
        );
    }

    #[test]
    fn test_summary_keeps_zero_rows() {
        let summary = ResultsSummary::new(vec![tally("Carol", "Red", 0)]);
        assert!(summary.text().starts_with("Carol (Red) - 0 votes\n"));
        assert_eq!(summary.total_votes, 0);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(ResultsSummary::new(Vec::new()).text(), "No candidates yet.");
    }
}
