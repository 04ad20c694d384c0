use crate::errors::{ALREADY_VOTED, GENERIC_FAILURE, VoteError};
use crate::models::{ConflictBody, ErrorBody, RawResponse, VoteCounts, VoteType};
use crate::state::{Diagnostic, VotableCard};
use tracing::{error, info};

const STATUS_CONFLICT: u16 = 409;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Accepted(VoteCounts),
    Conflict {
        detail: Option<String>,
        existing_vote: Option<VoteType>,
    },
    Failed(VoteError),
}

impl VoteOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VoteOutcome::Failed(_))
    }
}

/// Interprets a vote reply by status first, then by body.
pub fn classify(response: &RawResponse) -> VoteOutcome {
    match response.status {
        200..=299 => match serde_json::from_str::<VoteCounts>(&response.body) {
            Ok(counts) => VoteOutcome::Accepted(counts),
            Err(err) => VoteOutcome::Failed(VoteError::MalformedResponse {
                reason: err.to_string(),
            }),
        },
        STATUS_CONFLICT => match serde_json::from_str::<ConflictBody>(&response.body) {
            Ok(body) => VoteOutcome::Conflict {
                detail: body.detail,
                existing_vote: body
                    .existing_vote
                    .as_deref()
                    .and_then(|vote| vote.parse().ok()),
            },
            Err(err) => VoteOutcome::Failed(VoteError::MalformedConflict {
                reason: err.to_string(),
            }),
        },
        STATUS_TOO_MANY_REQUESTS => VoteOutcome::Failed(VoteError::RateLimited),
        status => match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => VoteOutcome::Failed(VoteError::Server {
                status,
                message: body.detail.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            }),
            Err(_) => VoteOutcome::Failed(VoteError::UnexpectedBody {
                status,
                body: response.body.clone(),
            }),
        },
    }
}

/// Applies an outcome to the card that issued `vote_type`.
pub fn apply_outcome(card: &mut VotableCard, vote_type: VoteType, outcome: &VoteOutcome) {
    match outcome {
        VoteOutcome::Accepted(counts) => on_accepted(card, vote_type, counts),
        VoteOutcome::Conflict {
            detail,
            existing_vote,
        } => on_conflict(card, detail.as_deref(), *existing_vote),
        VoteOutcome::Failed(err) => on_failure(card, err),
    }
}

fn on_accepted(card: &mut VotableCard, vote_type: VoteType, counts: &VoteCounts) {
    card.accept(vote_type, counts.score());
    card.diagnostic = None;
    info!(
        public_id = %card.public_id,
        %vote_type,
        upvotes = counts.upvotes,
        downvotes = counts.downvotes,
        "vote recorded"
    );
}

fn on_conflict(card: &mut VotableCard, detail: Option<&str>, existing: Option<VoteType>) {
    let message = detail.unwrap_or(ALREADY_VOTED);
    info!(public_id = %card.public_id, existing_vote = ?existing, "{message}");
    card.conflict(existing, Diagnostic::info(message));
}

fn on_failure(card: &mut VotableCard, err: &VoteError) {
    error!(public_id = %card.public_id, "{err}");
    card.release(Diagnostic::error(err.to_string()));
}
