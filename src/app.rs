use crate::client::VoteTransport;
use crate::controller::VoteController;
use crate::humanize::{humanize_raw_at, year_stamp_at};
use crate::page::PageModel;
use crate::rotator::{LabelFrame, LabelRotator};
use crate::state::VotableCard;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel {
    pub raw: String,
    pub text: String,
}

/// Everything bound when a page loads.
pub struct App<T> {
    pub controller: VoteController<T>,
    pub dates: Vec<DateLabel>,
    pub year: Option<String>,
    has_tool_name: bool,
}

impl<T: VoteTransport> App<T> {
    pub fn load(html: &str, transport: T) -> Self {
        Self::load_at(html, transport, Utc::now())
    }

    pub fn load_at(html: &str, transport: T, now: DateTime<Utc>) -> Self {
        let page = PageModel::parse(html);

        let dates = page
            .date_stamps
            .into_iter()
            .map(|raw| DateLabel {
                text: humanize_raw_at(now, &raw),
                raw,
            })
            .collect();

        let mut controller = VoteController::new(transport);
        for binding in page.cards {
            controller.register(VotableCard::new(binding.public_id, binding.score));
        }
        info!(cards = controller.cards().len(), "vote controls bound");

        Self {
            controller,
            dates,
            year: page.has_year_stamp.then(|| year_stamp_at(now)),
            has_tool_name: page.tool_name.is_some(),
        }
    }

    /// Starts the rotating label when the page has one. Needs a Tokio runtime.
    pub fn start_label_rotation(&self) -> Option<(LabelRotator, watch::Receiver<LabelFrame>)> {
        self.has_tool_name.then(LabelRotator::spawn_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VoteError;
    use crate::models::{RawResponse, VoteRequest};
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct Offline;

    #[async_trait]
    impl VoteTransport for Offline {
        async fn post_vote(&self, _request: &VoteRequest) -> Result<RawResponse, VoteError> {
            Err(VoteError::network("offline"))
        }
    }

    const PAGE: &str = r#"
        <span id="tool-name">fastfetch</span>
        <div class="output-card" data-public-id="one">
          <small data-date="2025-06-01T11:55:00"></small>
          <button class="upvote-btn"></button><span class="score">3</span>
          <button class="downvote-btn"></button>
        </div>
        <div class="output-card" data-public-id="two">
          <small data-date="2025-05-01T08:00:00"></small>
          <button class="upvote-btn"></button><span class="score">0</span>
          <button class="downvote-btn"></button>
        </div>
        <span id="current-year"></span>
    "#;

    #[tokio::test]
    async fn load_binds_cards_and_display_helpers() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let app = App::load_at(PAGE, Offline, now);

        assert_eq!(app.controller.cards().len(), 2);
        let first = app.controller.cards()[0].snapshot().await;
        assert_eq!(first, VotableCard::new("one", 3));

        let texts: Vec<&str> = app.dates.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["5 minutes ago", "May 1, 2025"]);
        assert_eq!(app.year.as_deref(), Some("2025"));

        let (_rotator, rx) = app.start_label_rotation().unwrap();
        assert_eq!(rx.borrow().text, "fastfetch");
    }

    #[tokio::test]
    async fn bare_page_binds_nothing() {
        let app = App::load("<p>nothing here</p>", Offline);
        assert!(app.controller.cards().is_empty());
        assert!(app.dates.is_empty());
        assert!(app.year.is_none());
        assert!(app.start_label_rotation().is_none());
    }
}
