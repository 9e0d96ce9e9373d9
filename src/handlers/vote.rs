use super::App;
use crate::voting::ResultsSummary;
use log::info;

impl App {
    /// Cast one vote for the highlighted candidate, resolved through the
    /// display index. Without a selection nothing reaches the database.
    pub async fn vote(&mut self) {
        let Some(candidate_id) = self.selected_candidate() else {
            self.show_input_error("Select a candidate first.");
            return;
        };

        match self.database.cast_vote(candidate_id).await {
            Ok(()) => self.show_info("Success", "Vote recorded."),
            Err(e) => self.show_error(e),
        }
    }

    pub async fn show_results(&mut self) {
        match self.database.view_results().await {
            Ok(tallies) => {
                let summary = ResultsSummary::new(tallies);
                info!(
                    "Showing results for {} candidate(s), {} vote(s)",
                    summary.tallies.len(),
                    summary.total_votes
                );
                self.overlay = Some(super::Overlay::Results(summary.text()));
            }
            Err(e) => self.show_error(e),
        }
    }
}
