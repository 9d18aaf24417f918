use std::fmt::Display;

use database::DatabaseError;
use thiserror::Error;
use types::{GameType, VpSource};

/// The tracker's write operations, named the way they show up in logs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    CreateGame,
    AddVictoryPoint,
    EditVictoryPoint,
    RemoveVictoryPoint,
    AddHighCouncil,
    RemoveHighCouncil,
    AddSwordmaster,
    RemoveSwordmaster,
}

impl Mutation {
    pub fn operation(&self) -> &'static str {
        match self {
            Mutation::CreateGame => "createGame",
            Mutation::AddVictoryPoint => "addVictoryPoint",
            Mutation::EditVictoryPoint => "editVictoryPoint",
            Mutation::RemoveVictoryPoint => "removeVictoryPoint",
            Mutation::AddHighCouncil => "addHighCouncilAcquired",
            Mutation::RemoveHighCouncil => "removeHighCouncilAcquired",
            Mutation::AddSwordmaster => "addSwordmasterAcquired",
            Mutation::RemoveSwordmaster => "removeSwordmasterAcquired",
        }
    }
}

impl Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Mutation::CreateGame => "create game",
            Mutation::AddVictoryPoint => "add victory point",
            Mutation::EditVictoryPoint => "edit victory point",
            Mutation::RemoveVictoryPoint => "remove victory point",
            Mutation::AddHighCouncil => "add high council",
            Mutation::RemoveHighCouncil => "remove high council",
            Mutation::AddSwordmaster => "add swordmaster",
            Mutation::RemoveSwordmaster => "remove swordmaster",
        };
        write!(f, "{description}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyAcquired,
    Validation,
    Storage,
}

/// What a failed mutation reports to its caller.
///
/// The message is deliberately short; the underlying cause has already been
/// logged with full context.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Swordmaster cost must be 6 or 8")]
    InvalidSwordmasterCost(u8),

    #[error("{vp_source} is not offered in {game_type} games")]
    SourceNotOffered {
        vp_source: VpSource,
        game_type: GameType,
    },

    #[error("Failed to {mutation}")]
    Failed {
        mutation: Mutation,
        #[source]
        source: DatabaseError,
    },
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::InvalidSwordmasterCost(_) | ActionError::SourceNotOffered { .. } => {
                ErrorKind::Validation
            }
            ActionError::Failed { source, .. } => match source {
                DatabaseError::NotFound { .. } => ErrorKind::NotFound,
                DatabaseError::AlreadyAcquired { .. } => ErrorKind::AlreadyAcquired,
                _ => ErrorKind::Storage,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
