pub mod chat;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod domain_gate;
pub mod error;
pub mod llm_interaction;
pub mod pipeline;
pub mod profile;
pub mod response_validator;
pub mod session;
pub mod web_server;

pub use config::Config;
pub use conversation::{Conversation, Role, Turn};
pub use domain_gate::is_in_domain;
pub use error::{CompletionError, ConfigError, ProfileError};
pub use llm_interaction::{ChatMessage, CompletionClient, GroqClient};
pub use pipeline::{run_turn, Rejection, TurnOutcome};
pub use profile::{Gender, Profile, ProfileStore};
pub use session::{ChatSession, TurnState};
