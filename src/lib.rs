pub mod collaborators;
pub mod error;
pub mod msg;
pub mod session;
pub mod state;

pub use crate::collaborators::{
    publish_summary, Challenge, ChallengeGoal, InMemoryChallenges, InMemoryStats, InMemoryWallet,
    SummarySink,
};
pub use crate::error::{CollaboratorError, EngineError};
pub use crate::msg::{PlayerAction, RoundSummary};
pub use crate::session::GameSession;
pub use crate::state::{PlayerHand, RoundPhase, RoundState};
