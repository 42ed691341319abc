//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};
use std::fmt;

// ********************* ENUMERAZIONI UTILI **********************//

/// Stato di una video room così come riportato dal fornitore
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    InProgress,
    Completed,
    Failed,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::InProgress => "in-progress",
            RoomStatus::Completed => "completed",
            RoomStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topologia della room. "go" è la room gratuita a due partecipanti.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    #[default]
    Go,
    PeerToPeer,
    Group,
    GroupSmall,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Go => "go",
            RoomType::PeerToPeer => "peer-to-peer",
            RoomType::Group => "group",
            RoomType::GroupSmall => "group-small",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "go" => Ok(RoomType::Go),
            "peer-to-peer" => Ok(RoomType::PeerToPeer),
            "group" => Ok(RoomType::Group),
            "group-small" => Ok(RoomType::GroupSmall),
            other => Err(format!("Unknown room type: {}", other)),
        }
    }
}
