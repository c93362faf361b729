//! Per-account workflow.
//!
//! 1. Fetch the profile; without it nothing else runs for this account.
//! 2. Resolve the public IP (diagnostic only).
//! 3. Fetch missions; an empty list ends the account.
//! 4. Partition by status and list both groups.
//! 5. Submit each incomplete mission in fetched order, pausing a random
//!    delay after every attempt, the last one included.
//! 6. Report the point balance.
//!
//! Failures never leave this module: the outcome says how far the account got.

use tokio_util::sync::CancellationToken;

use crate::api::{partition_missions, ApiError, ClientFactory, MissionClient, Profile, RemoteId};
use crate::config::{Config, DelayRange};
use crate::loader::Credential;
use crate::proxy::ProxyEndpoint;
use crate::terminal::Terminal;
use crate::util::shorten;

/// Result of one account's pass through the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountOutcome {
    /// Profile could not be fetched (bad token, network failure, bad body).
    InvalidCredential,
    /// No HTTP client could be built, e.g. a malformed proxy entry.
    ClientUnavailable(String),
    /// Profile fetched but the mission list was empty or unavailable.
    NoMissions { profile: Profile, ip: String },
    /// Missions were processed (possibly interrupted by shutdown).
    Processed(AccountReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountReport {
    pub profile: Profile,
    pub ip: String,
    pub already_completed: usize,
    pub completed_now: Vec<RemoteId>,
    pub failed: Vec<RemoteId>,
    /// Incomplete missions not attempted because shutdown was requested
    pub skipped: usize,
    pub points: Option<f64>,
}

impl AccountReport {
    /// Missions still incomplete after this cycle.
    pub fn remaining(&self) -> usize {
        self.failed.len() + self.skipped
    }
}

pub struct AccountProcessor {
    factory: ClientFactory,
    api_base_url: String,
    ip_echo_url: String,
    mission_delay: DelayRange,
    terminal: Terminal,
}

impl AccountProcessor {
    pub fn new(config: &Config, terminal: Terminal) -> Self {
        Self {
            factory: ClientFactory::new(config.web_origin.clone(), config.request_timeout),
            api_base_url: config.api_base_url.clone(),
            ip_echo_url: config.ip_echo_url.clone(),
            mission_delay: config.mission_delay,
            terminal,
        }
    }

    fn client_for(
        &self,
        credential: &Credential,
        proxy: Option<&ProxyEndpoint>,
    ) -> Result<MissionClient, ApiError> {
        Ok(MissionClient::new(
            self.api_base_url.clone(),
            self.ip_echo_url.clone(),
            self.factory.for_account(credential, proxy)?,
            self.factory.anonymous(proxy)?,
        ))
    }

    /// Run the whole workflow for one account.
    pub async fn process(
        &self,
        credential: &Credential,
        proxy: Option<&ProxyEndpoint>,
        cancel: &CancellationToken,
    ) -> AccountOutcome {
        let terminal = &self.terminal;

        let client = match self.client_for(credential, proxy) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Cannot build HTTP client for {:?}: {}", credential, e);
                terminal.error(&format!("Cannot prepare connection: {}", e));
                return AccountOutcome::ClientUnavailable(e.to_string());
            }
        };

        let Some(profile) = client.fetch_profile(terminal).await else {
            terminal.error("Invalid token or user not found");
            return AccountOutcome::InvalidCredential;
        };

        terminal.blank();
        terminal.heading(&format!(
            "User ID   : {}",
            shorten(&profile.id.to_string(), 6, 4)
        ));
        terminal.heading(&format!("UserName  : {}", profile.name));
        let ip = client.public_ip().await;
        terminal.heading(&format!("IP Used   : {}", ip));
        terminal.rule();
        terminal.blank();

        let missions = client.fetch_missions(terminal).await;
        if missions.is_empty() {
            terminal.warn("No missions available.");
            return AccountOutcome::NoMissions { profile, ip };
        }

        let partition = partition_missions(&missions);

        terminal.success("Mission Already Completed:");
        if partition.completed.is_empty() {
            terminal.muted("  No Mission Already Completed.");
        }
        for mission in &partition.completed {
            terminal.item_done(&format!("Task {} Done", mission.name));
        }

        terminal.blank();
        terminal.warn("Uncompleted Mission:");
        if partition.incomplete.is_empty() {
            terminal.muted("  No Uncompleted Mission.");
        }
        for mission in &partition.incomplete {
            terminal.item_pending(&format!("Task {} {}", mission.name, mission.status.label()));
        }
        for mission in &partition.unknown {
            tracing::warn!(
                "Mission {} ({}) has an unrecognised status, skipping",
                mission.id,
                mission.name
            );
        }
        terminal.rule();
        terminal.blank();

        let mut report = AccountReport {
            profile,
            ip,
            already_completed: partition.completed.len(),
            completed_now: Vec::new(),
            failed: Vec::new(),
            skipped: 0,
            points: None,
        };

        for (position, mission) in partition.incomplete.iter().enumerate() {
            // No new submission once shutdown was requested.
            if cancel.is_cancelled() {
                report.skipped = partition.incomplete.len() - position;
                break;
            }

            if client.complete_mission(mission, terminal).await {
                report.completed_now.push(mission.id.clone());
            } else {
                report.failed.push(mission.id.clone());
            }

            if !terminal.countdown(self.mission_delay.sample(), cancel).await {
                report.skipped = partition.incomplete.len() - position - 1;
                break;
            }
        }
        if report.skipped > 0 {
            tracing::info!(
                "Shutdown requested, leaving {} missions for later",
                report.skipped
            );
        }

        if partition.incomplete.is_empty() {
            terminal.success("All Mission Already Done.");
        } else {
            terminal.success("Finished Process All Mission.");
        }

        report.points = client.fetch_point_balance(terminal).await;
        terminal.blank();
        terminal.warn(&format!("Finish Processed Account: {}", report.profile.name));

        AccountOutcome::Processed(report)
    }
}
