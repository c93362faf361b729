//! Wire types for the mission service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application code the service returns when a mission was accepted as finished.
pub const FINISH_SUCCESS_CODE: i64 = 2000;

/// Identifier as the service sends it: a string or an integer.
///
/// Echoed back unchanged in request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// `{data: ...}` envelope used by every read endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Identity of the account behind a credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub id: RemoteId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Mission progress as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Completed,
    NotCompleted,
    InProgress,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl MissionStatus {
    /// `not_completed` and `in_progress` missions still need a finish request.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, MissionStatus::NotCompleted | MissionStatus::InProgress)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Completed => "Done",
            MissionStatus::NotCompleted => "Not Started",
            MissionStatus::InProgress => "In Progress",
            MissionStatus::Unknown => "Unknown Status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mission {
    pub id: RemoteId,
    #[serde(default = "unknown_mission_name", deserialize_with = "mission_name")]
    pub name: String,
    pub status: MissionStatus,
}

fn mission_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => UNKNOWN_MISSION_NAME.to_string(),
    })
}

pub const UNKNOWN_MISSION_NAME: &str = "Unknown Mission";

fn unknown_mission_name() -> String {
    UNKNOWN_MISSION_NAME.to_string()
}

/// Body of `POST /missions/{id}/finish`.
#[derive(Debug, Serialize)]
pub(crate) struct FinishMissionRequest<'a> {
    #[serde(rename = "missionID")]
    pub mission_id: &'a RemoteId,
}

/// Reply to a finish request.
#[derive(Debug, Deserialize)]
pub(crate) struct FinishMissionResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointBalance {
    pub point: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicIp {
    pub ip: String,
}

/// Missions split by status, each group in fetched order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionPartition {
    pub completed: Vec<Mission>,
    /// `not_completed` and `in_progress`: the work queue
    pub incomplete: Vec<Mission>,
    /// Missions with a status this client does not recognise; never submitted
    pub unknown: Vec<Mission>,
}

pub fn partition_missions(missions: &[Mission]) -> MissionPartition {
    let mut partition = MissionPartition::default();
    for mission in missions {
        match mission.status {
            MissionStatus::Completed => partition.completed.push(mission.clone()),
            MissionStatus::NotCompleted | MissionStatus::InProgress => {
                partition.incomplete.push(mission.clone())
            }
            MissionStatus::Unknown => partition.unknown.push(mission.clone()),
        }
    }
    partition
}
