//! Command Journal
//!
//! Every command the engine issued to the sandbox, with the world's answer.

use crate::components::{AgentMemory, BodyPart, ObjectId, Position};
use crate::facade::{CommandResult, SpawnOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move { agent: String, target: Position },
    Harvest { agent: String, source: ObjectId },
    Transfer { agent: String, target: ObjectId, amount: Option<u32> },
    Build { agent: String, site: ObjectId },
    Pickup { agent: String, at: Position },
    Drop { agent: String },
    Upgrade { agent: String, controller: ObjectId },
    RemoveSite { site: ObjectId },
    CreateAgent {
        name: String,
        body: Vec<BodyPart>,
        memory: AgentMemory,
        outcome: SpawnOutcome,
    },
}

impl Command {
    /// The agent that issued the command, if any
    pub fn agent(&self) -> Option<&str> {
        match self {
            Command::Move { agent, .. }
            | Command::Harvest { agent, .. }
            | Command::Transfer { agent, .. }
            | Command::Build { agent, .. }
            | Command::Pickup { agent, .. }
            | Command::Drop { agent }
            | Command::Upgrade { agent, .. } => Some(agent),
            Command::RemoveSite { .. } | Command::CreateAgent { .. } => None,
        }
    }

    /// Commands that collect ground energy
    pub fn is_collection(&self) -> bool {
        matches!(self, Command::Pickup { .. })
    }

    /// Commands that hand energy over
    pub fn is_delivery(&self) -> bool {
        matches!(self, Command::Transfer { .. } | Command::Drop { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub tick: u64,
    pub command: Command,
    pub result: CommandResult,
}
