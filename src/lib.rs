pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod humanize;
pub mod models;
pub mod page;
pub mod rotator;
pub mod share;
pub mod state;

pub use app::App;
pub use client::{ApiClient, VoteTransport};
pub use config::ClientConfig;
pub use controller::{CardHandle, Submission, VoteController};
pub use handlers::VoteOutcome;
pub use models::VoteType;
