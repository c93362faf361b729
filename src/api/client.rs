//! Mission service client.
//!
//! The `get_*`/`finish_mission` calls return `Result<_, ApiError>`. The
//! `fetch_*`/`complete_mission` wrappers report progress on the console, log the
//! failure and collapse it into `None`, an empty list or `false`, so nothing
//! escapes an account's processing. No call is retried.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorKind};
use super::types::{
    DataEnvelope, FinishMissionRequest, FinishMissionResponse, Mission, PointBalance, Profile,
    PublicIp, RemoteId, FINISH_SUCCESS_CODE,
};
use crate::terminal::Terminal;

/// Sentinel reported when the public IP cannot be resolved.
pub const UNKNOWN_IP: &str = "unknown";

#[derive(Debug, Clone)]
pub struct MissionClient {
    base_url: String,
    ip_echo_url: String,
    client: Client,
    anonymous: Client,
}

impl MissionClient {
    /// `client` must carry the account headers; `anonymous` is used for the IP lookup.
    pub fn new(
        base_url: impl Into<String>,
        ip_echo_url: impl Into<String>,
        client: Client,
        anonymous: Client,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            ip_echo_url: ip_echo_url.into(),
            client,
            anonymous,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping every failure to `ApiError`.
    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
        })
    }

    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        let envelope: DataEnvelope<Profile> =
            Self::send_json(self.client.get(self.url("/users/profile"))).await?;
        Ok(envelope.data)
    }

    pub async fn get_missions(&self) -> Result<Vec<Mission>, ApiError> {
        let envelope: DataEnvelope<Vec<Mission>> =
            Self::send_json(self.client.get(self.url("/missions"))).await?;
        Ok(envelope.data)
    }

    /// Submit a finish request. Succeeds only when the body's `code` is the success code.
    pub async fn finish_mission(&self, id: &RemoteId) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/missions/{}/finish", id)))
            .json(&FinishMissionRequest { mission_id: id });
        let response: FinishMissionResponse = Self::send_json(request).await?;

        if response.code == FINISH_SUCCESS_CODE {
            Ok(())
        } else {
            Err(ApiError::rejected(
                response.code,
                response.message.unwrap_or_default(),
            ))
        }
    }

    pub async fn get_point_balance(&self) -> Result<f64, ApiError> {
        let envelope: DataEnvelope<PointBalance> =
            Self::send_json(self.client.get(self.url("/points/balance"))).await?;
        Ok(envelope.data.point)
    }

    pub async fn get_public_ip(&self) -> Result<String, ApiError> {
        let reply: PublicIp = Self::send_json(self.anonymous.get(&self.ip_echo_url)).await?;
        Ok(reply.ip)
    }

    pub async fn fetch_profile(&self, terminal: &Terminal) -> Option<Profile> {
        let status = terminal.status("Getting User Info...");
        match self.get_profile().await {
            Ok(profile) => {
                status.succeed("User Info Received");
                Some(profile)
            }
            Err(e) => {
                tracing::warn!("Profile request failed: {}", e);
                status.fail(&format!("Failed Getting User Info: {}", e));
                None
            }
        }
    }

    pub async fn fetch_missions(&self, terminal: &Terminal) -> Vec<Mission> {
        let status = terminal.status("Getting Missions List...");
        match self.get_missions().await {
            Ok(missions) => {
                tracing::debug!("Received {} missions", missions.len());
                status.succeed("Missions List Received");
                missions
            }
            Err(e) => {
                tracing::warn!("Mission list request failed: {}", e);
                status.fail(&format!("Failed Getting Missions: {}", e));
                Vec::new()
            }
        }
    }

    pub async fn complete_mission(&self, mission: &Mission, terminal: &Terminal) -> bool {
        let status = terminal.status(&format!("Completing \"{}\"...", mission.name));
        match self.finish_mission(&mission.id).await {
            Ok(()) => {
                status.succeed(&format!("Task \"{}\" Completed", mission.name));
                true
            }
            Err(e) => {
                tracing::warn!("Finishing mission {} failed: {}", mission.id, e);
                let message = match e.kind {
                    ApiErrorKind::Rejected { .. } => {
                        format!("Task \"{}\" Failed: {}", mission.name, e.message)
                    }
                    _ => format!("Failed Completing \"{}\": {}", mission.name, e),
                };
                status.fail(&message);
                false
            }
        }
    }

    pub async fn fetch_point_balance(&self, terminal: &Terminal) -> Option<f64> {
        let status = terminal.status("Getting Points Balance...");
        match self.get_point_balance().await {
            Ok(points) => {
                status.succeed(&format!("Total Points: {}", points));
                Some(points)
            }
            Err(e) => {
                tracing::warn!("Point balance request failed: {}", e);
                status.fail(&format!("Failed Getting Points: {}", e));
                None
            }
        }
    }

    /// Best-effort public IP; [`UNKNOWN_IP`] on any failure.
    pub async fn public_ip(&self) -> String {
        match self.get_public_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::debug!("Public IP lookup failed: {}", e);
                UNKNOWN_IP.to_string()
            }
        }
    }
}
