use crate::errors::VoteError;
use crate::models::{VoteState, VoteType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Button {
    pub disabled: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteButtons {
    pub upvote: Button,
    pub downvote: Button,
}

impl VoteButtons {
    pub fn disable(&mut self) {
        self.upvote.disabled = true;
        self.downvote.disabled = true;
    }

    pub fn enable(&mut self) {
        self.upvote.disabled = false;
        self.downvote.disabled = false;
    }

    pub fn is_disabled(&self) -> bool {
        self.upvote.disabled || self.downvote.disabled
    }

    pub fn vote_state(&self) -> VoteState {
        match (self.upvote.active, self.downvote.active) {
            (true, _) => VoteState::Upvoted,
            (false, true) => VoteState::Downvoted,
            (false, false) => VoteState::None,
        }
    }
}

/// Locks both buttons and moves the active marker to `vote`, clearing it when
/// `vote` is `None`.
pub fn set_vote_state(buttons: &mut VoteButtons, vote: Option<VoteType>) {
    buttons.disable();
    buttons.upvote.active = false;
    buttons.downvote.active = false;

    match vote {
        Some(VoteType::Upvote) => buttons.upvote.active = true,
        Some(VoteType::Downvote) => buttons.downvote.active = true,
        None => {}
    }
}

/// Where a card sits in its vote lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Idle,
    Pending(VoteType),
    Voted(VoteType),
    Conflicted(Option<VoteType>),
}

impl CardState {
    pub fn accepts_vote(&self) -> bool {
        matches!(self, CardState::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CardState::Voted(_) | CardState::Conflicted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }
}

/// View model of one vote-capable card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotableCard {
    pub public_id: String,
    pub score: i64,
    pub buttons: VoteButtons,
    pub state: CardState,
    pub diagnostic: Option<Diagnostic>,
}

impl VotableCard {
    pub fn new(public_id: impl Into<String>, score: i64) -> Self {
        Self {
            public_id: public_id.into(),
            score,
            buttons: VoteButtons::default(),
            state: CardState::Idle,
            diagnostic: None,
        }
    }

    pub fn vote_state(&self) -> VoteState {
        self.buttons.vote_state()
    }

    /// Moves an idle card to pending. Returns false when a vote is already in
    /// flight or the card is terminal.
    pub fn begin(&mut self, vote_type: VoteType) -> bool {
        if !self.state.accepts_vote() {
            return false;
        }
        self.state = CardState::Pending(vote_type);
        self.buttons.disable();
        true
    }

    pub fn accept(&mut self, vote_type: VoteType, score: i64) {
        self.score = score;
        set_vote_state(&mut self.buttons, Some(vote_type));
        self.state = CardState::Voted(vote_type);
    }

    pub fn conflict(&mut self, existing: Option<VoteType>, diagnostic: Diagnostic) {
        set_vote_state(&mut self.buttons, existing);
        self.state = CardState::Conflicted(existing);
        self.diagnostic = Some(diagnostic);
    }

    pub fn release(&mut self, diagnostic: Diagnostic) {
        self.buttons.enable();
        self.state = CardState::Idle;
        self.diagnostic = Some(diagnostic);
    }

    /// Frees a card whose `vote_type` request went away without a reply.
    /// Does nothing unless that request is still the pending one.
    pub fn abandon(&mut self, vote_type: VoteType) -> bool {
        if self.state != CardState::Pending(vote_type) {
            return false;
        }
        let err = VoteError::network("request cancelled before a reply arrived");
        self.release(Diagnostic::error(err.to_string()));
        true
    }
}
