use crate::client::VoteTransport;
use crate::handlers::{VoteOutcome, apply_outcome, classify};
use crate::models::{VoteRequest, VoteType};
use crate::state::VotableCard;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Shared handle to one card's view model.
#[derive(Debug, Clone)]
pub struct CardHandle {
    card: Arc<Mutex<VotableCard>>,
}

impl CardHandle {
    pub fn new(card: VotableCard) -> Self {
        Self {
            card: Arc::new(Mutex::new(card)),
        }
    }

    pub async fn snapshot(&self) -> VotableCard {
        self.card.lock().await.clone()
    }

    pub async fn public_id(&self) -> String {
        self.card.lock().await.public_id.clone()
    }
}

/// Frees a pending card if the submission is dropped before its reply is
/// applied, e.g. by a timeout or an aborted task.
struct PendingGuard {
    card: Arc<Mutex<VotableCard>>,
    vote_type: VoteType,
    armed: bool,
}

impl PendingGuard {
    fn new(card: Arc<Mutex<VotableCard>>, vote_type: VoteType) -> Self {
        Self {
            card,
            vote_type,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let vote_type = self.vote_type;
        if let Ok(mut card) = self.card.try_lock() {
            if card.abandon(vote_type) {
                warn!(public_id = %card.public_id, %vote_type, "vote dropped in flight");
            }
            return;
        }

        // The lock is only ever held briefly; finish the release once it frees up.
        let card = Arc::clone(&self.card);
        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let mut card = card.lock().await;
                    if card.abandon(vote_type) {
                        warn!(public_id = %card.public_id, %vote_type, "vote dropped in flight");
                    }
                });
            }
            Err(_) => warn!(%vote_type, "vote dropped outside a runtime, card left pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The card was pending or terminal; nothing was sent.
    Ignored,
    Completed(VoteOutcome),
}

pub struct VoteController<T> {
    transport: Arc<T>,
    cards: Vec<CardHandle>,
}

impl<T> Clone for VoteController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cards: self.cards.clone(),
        }
    }
}

impl<T: VoteTransport> VoteController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_shared(Arc::new(transport))
    }

    pub fn with_shared(transport: Arc<T>) -> Self {
        Self {
            transport,
            cards: Vec::new(),
        }
    }

    pub fn register(&mut self, card: VotableCard) -> CardHandle {
        let handle = CardHandle::new(card);
        self.cards.push(handle.clone());
        handle
    }

    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    /// First bound card carrying `public_id`.
    pub async fn find(&self, public_id: &str) -> Option<CardHandle> {
        for handle in &self.cards {
            if handle.card.lock().await.public_id == public_id {
                return Some(handle.clone());
            }
        }
        None
    }

    /// Sends one vote for `handle` and reconciles the card with the reply.
    ///
    /// The card moves to pending before the request leaves, so a second call
    /// while the first is in flight returns [`Submission::Ignored`]. The card
    /// lock is not held across the network call. Dropping the returned future
    /// before it completes puts the card back to idle.
    pub async fn submit_vote(&self, handle: &CardHandle, vote_type: VoteType) -> Submission {
        let request = {
            let mut card = handle.card.lock().await;
            if !card.begin(vote_type) {
                debug!(public_id = %card.public_id, state = ?card.state, "vote ignored");
                return Submission::Ignored;
            }
            VoteRequest::new(card.public_id.clone(), vote_type)
        };

        let mut guard = PendingGuard::new(Arc::clone(&handle.card), vote_type);
        let outcome = match self.transport.post_vote(&request).await {
            Ok(response) => classify(&response),
            Err(err) => VoteOutcome::Failed(err),
        };

        let mut card = handle.card.lock().await;
        guard.disarm();
        apply_outcome(&mut card, vote_type, &outcome);
        Submission::Completed(outcome)
    }
}
