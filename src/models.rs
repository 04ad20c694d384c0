use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            other => Err(format!("unknown vote type '{other}'")),
        }
    }
}

/// Which of the two buttons is visually marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteState {
    #[default]
    None,
    Upvoted,
    Downvoted,
}

impl From<Option<VoteType>> for VoteState {
    fn from(vote: Option<VoteType>) -> Self {
        match vote {
            Some(VoteType::Upvote) => VoteState::Upvoted,
            Some(VoteType::Downvote) => VoteState::Downvoted,
            None => VoteState::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    pub public_id: String,
    pub vote_type: VoteType,
}

impl VoteRequest {
    pub fn new(public_id: impl Into<String>, vote_type: VoteType) -> Self {
        Self {
            public_id: public_id.into(),
            vote_type,
        }
    }

    /// Path segments of the vote route, unescaped.
    pub fn segments(&self) -> [&str; 4] {
        ["api", "output", &self.public_id, self.vote_type.as_str()]
    }
}

/// Body of a successful vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteCounts {
    pub fn score(&self) -> i64 {
        self.upvotes.saturating_sub(self.downvotes)
    }
}

/// Body of a 409 reply. `existing_vote` stays a string so an unknown value
/// marks nothing instead of failing the whole body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub existing_vote: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Status and body of a vote reply before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One shared output as returned by `GET /api/output/{id}` and `GET /api/outputs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSummary {
    pub public_id: String,
    #[serde(default)]
    pub command: Option<String>,
    pub created_at: String,
    pub upvotes: i64,
    pub downvotes: i64,
    #[serde(default)]
    pub content_raw: String,
    #[serde(default)]
    pub content_html: String,
}

impl OutputSummary {
    pub fn score(&self) -> i64 {
        self.upvotes.saturating_sub(self.downvotes)
    }
}

/// Body of `POST /api/share`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub content: String,
    pub command: Option<String>,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    pub url: String,
    pub delete_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_type_round_trips_wire_names() {
        assert_eq!("upvote".parse::<VoteType>().unwrap(), VoteType::Upvote);
        assert_eq!("downvote".parse::<VoteType>().unwrap(), VoteType::Downvote);
        assert!("sideways".parse::<VoteType>().is_err());
        assert_eq!(VoteType::Downvote.to_string(), "downvote");
    }

    #[test]
    fn request_segments_use_public_id_and_type() {
        let request = VoteRequest::new("a1b2c3", VoteType::Upvote);
        assert_eq!(request.segments(), ["api", "output", "a1b2c3", "upvote"]);
    }

    #[test]
    fn conflict_body_tolerates_missing_fields() {
        let body: ConflictBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none());
        assert!(body.existing_vote.is_none());
    }
}
