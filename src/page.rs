//! Discovery of vote-capable cards and display hooks in rendered markup.
//!
//! Listing pages render each output as `.output-card[data-public-id]` holding
//! `.upvote-btn`, `.downvote-btn` and `.score`. The single-output page renders
//! one `#vote-widget[data-public-id]` whose controls are found by id.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

static OUTPUT_CARD: Lazy<Selector> = Lazy::new(|| selector(".output-card"));
static CARD_UPVOTE: Lazy<Selector> = Lazy::new(|| selector(".upvote-btn"));
static CARD_DOWNVOTE: Lazy<Selector> = Lazy::new(|| selector(".downvote-btn"));
static CARD_SCORE: Lazy<Selector> = Lazy::new(|| selector(".score"));
static VOTE_WIDGET: Lazy<Selector> = Lazy::new(|| selector("#vote-widget"));
static WIDGET_UPVOTE: Lazy<Selector> = Lazy::new(|| selector("#upvote-btn"));
static WIDGET_DOWNVOTE: Lazy<Selector> = Lazy::new(|| selector("#downvote-btn"));
static WIDGET_SCORE: Lazy<Selector> = Lazy::new(|| selector("#score"));
static DATE_STAMP: Lazy<Selector> = Lazy::new(|| selector("[data-date]"));
static TOOL_NAME: Lazy<Selector> = Lazy::new(|| selector("#tool-name"));
static CURRENT_YEAR: Lazy<Selector> = Lazy::new(|| selector("#current-year"));

// Selectors above are literals; a parse failure is a programming error.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|err| panic!("invalid selector {css}: {err:?}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrigin {
    Listing,
    Widget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBinding {
    pub public_id: String,
    pub score: i64,
    pub origin: CardOrigin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    pub cards: Vec<CardBinding>,
    /// Raw `data-date` values in document order.
    pub date_stamps: Vec<String>,
    /// Initial text of the rotating label, when the page has one.
    pub tool_name: Option<String>,
    pub has_year_stamp: bool,
}

impl PageModel {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let mut cards: Vec<CardBinding> = document
            .select(&OUTPUT_CARD)
            .filter_map(listing_card)
            .collect();
        if let Some(widget) = document.select(&VOTE_WIDGET).next() {
            if let Some(card) = widget_card(&document, widget) {
                cards.push(card);
            }
        }

        let date_stamps = document
            .select(&DATE_STAMP)
            .filter_map(|el| el.value().attr("data-date"))
            .map(str::to_string)
            .collect();

        let tool_name = document.select(&TOOL_NAME).next().map(text_of);

        Self {
            cards,
            date_stamps,
            tool_name,
            has_year_stamp: document.select(&CURRENT_YEAR).next().is_some(),
        }
    }
}

fn listing_card(card: ElementRef<'_>) -> Option<CardBinding> {
    // Cards without a public id are display-only.
    let public_id = public_id_of(card)?;
    let has_buttons = card.select(&CARD_UPVOTE).next().is_some()
        && card.select(&CARD_DOWNVOTE).next().is_some();
    if !has_buttons {
        warn!(%public_id, "card has no vote buttons, skipping");
        return None;
    }
    let score = card.select(&CARD_SCORE).next().map(parse_score).unwrap_or_default();

    Some(CardBinding {
        public_id,
        score,
        origin: CardOrigin::Listing,
    })
}

fn widget_card(document: &Html, widget: ElementRef<'_>) -> Option<CardBinding> {
    let Some(public_id) = public_id_of(widget) else {
        warn!("vote widget has no public id, skipping");
        return None;
    };
    if document.select(&WIDGET_UPVOTE).next().is_none()
        || document.select(&WIDGET_DOWNVOTE).next().is_none()
    {
        warn!(%public_id, "vote widget has no vote buttons, skipping");
        return None;
    }
    let score = document
        .select(&WIDGET_SCORE)
        .next()
        .map(parse_score)
        .unwrap_or_default();

    Some(CardBinding {
        public_id,
        score,
        origin: CardOrigin::Widget,
    })
}

fn public_id_of(el: ElementRef<'_>) -> Option<String> {
    el.value()
        .attr("data-public-id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn parse_score(el: ElementRef<'_>) -> i64 {
    let text = text_of(el);
    text.parse().unwrap_or_else(|_| {
        warn!(score = %text, "unreadable score, starting at 0");
        0
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
