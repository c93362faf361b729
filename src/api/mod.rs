//! Remote mission service: wire types, HTTP client factory and the client itself.

mod client;
mod error;
mod factory;
mod types;

pub use client::{MissionClient, UNKNOWN_IP};
pub use error::{classify_http_status, ApiError, ApiErrorKind};
pub use factory::{ClientFactory, BROWSER_USER_AGENT};
pub use types::{
    partition_missions, Mission, MissionPartition, MissionStatus, Profile, RemoteId,
    FINISH_SUCCESS_CODE, UNKNOWN_MISSION_NAME,
};
