//! Routing models.

use serde::{Deserialize, Serialize};

use crate::commitments::Requirement;
use crate::transactions::TransactionType;

/// Screens of the commitment funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Landing,
    Login,
    ActivityGoal,
    Staking,
    ActivitySource,
    Confirmation,
    Track,
    Completion,
    Faq,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::ActivityGoal => "/activity-goal",
            Self::Staking => "/staking",
            Self::ActivitySource => "/activity-source",
            Self::Confirmation => "/confirmation",
            Self::Track => "/track",
            Self::Completion => "/completion",
            Self::Faq => "/faq",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        [
            Self::Landing,
            Self::Login,
            Self::ActivityGoal,
            Self::Staking,
            Self::ActivitySource,
            Self::Confirmation,
            Self::Track,
            Self::Completion,
            Self::Faq,
        ]
        .into_iter()
        .find(|screen| screen.path().trim_end_matches('/') == path)
    }
}

/// Inputs of the routing table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSignals {
    pub wallet_connected: bool,
    pub activity_set: bool,
    pub stake_set: bool,
    pub fitness_identity_linked: bool,
    pub commitment_exists: bool,
}

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "requirements", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    ConnectWallet,
    ActivityNotSet,
    StakeNotSet,
    FitnessNotLinked,
    InvalidCommitment(Vec<Requirement>),
}

impl BlockReason {
    pub fn message(&self) -> String {
        match self {
            Self::ConnectWallet => "Please connect your wallet to continue.".to_string(),
            Self::ActivityNotSet => {
                "Please choose an activity, a distance and a start and end date.".to_string()
            }
            Self::StakeNotSet => "Please enter a stake greater than zero.".to_string(),
            Self::FitnessNotLinked => "Please connect your Strava account.".to_string(),
            Self::InvalidCommitment(requirements) => {
                let missing = requirements
                    .iter()
                    .map(|r| r.message())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Your commitment is not complete yet: {}.", missing)
            }
        }
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of a routing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteDecision {
    Navigate(Screen),
    Blocked(BlockReason),
}

impl RouteDecision {
    pub fn screen(&self) -> Option<Screen> {
        match self {
            Self::Navigate(screen) => Some(*screen),
            Self::Blocked(_) => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Info,
    Encouragement,
    Error,
}

/// Dismissible message shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Method the user can retry from the notice
    pub retry: Option<TransactionType>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            retry: None,
        }
    }

    pub fn encouragement(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Encouragement,
            message: message.into(),
            retry: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            retry: None,
        }
    }

    pub fn retryable(method: TransactionType, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            retry: Some(method),
        }
    }
}

impl From<BlockReason> for Notice {
    fn from(reason: BlockReason) -> Self {
        Self::info(reason.message())
    }
}
