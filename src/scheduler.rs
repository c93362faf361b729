//! Cycle loop: process every account once, sleep, repeat.
//!
//! Two states only. `RunningBatch` walks the accounts in file order, pairing
//! account `i` with proxy `i mod M`; `Sleeping` waits out the cycle interval.
//! Cancelling the token ends the loop from either state.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::loader::Credential;
use crate::processor::{AccountOutcome, AccountProcessor};
use crate::proxy::{ProxyEndpoint, ProxyRotation};
use crate::terminal::Terminal;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("No accounts to process")]
    NoAccounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    RunningBatch,
    Sleeping,
}

/// Tally of one pass over the accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub processed: usize,
    pub no_missions: usize,
    pub invalid_credentials: usize,
    pub unavailable: usize,
    pub missions_completed: usize,
    /// Shutdown was requested before every account was visited
    pub interrupted: bool,
}

impl CycleSummary {
    fn record(&mut self, outcome: &AccountOutcome) {
        match outcome {
            AccountOutcome::Processed(report) => {
                self.processed += 1;
                self.missions_completed += report.completed_now.len();
            }
            AccountOutcome::NoMissions { .. } => self.no_missions += 1,
            AccountOutcome::InvalidCredential => self.invalid_credentials += 1,
            AccountOutcome::ClientUnavailable(_) => self.unavailable += 1,
        }
    }

    pub fn visited(&self) -> usize {
        self.processed + self.no_missions + self.invalid_credentials + self.unavailable
    }
}

pub struct Scheduler {
    credentials: Vec<Credential>,
    proxies: ProxyRotation,
    processor: AccountProcessor,
    terminal: Terminal,
    cycle_interval: Duration,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(
        credentials: Vec<Credential>,
        proxies: ProxyRotation,
        processor: AccountProcessor,
        terminal: Terminal,
        cycle_interval: Duration,
    ) -> Result<Self, SchedulerError> {
        if credentials.is_empty() {
            return Err(SchedulerError::NoAccounts);
        }
        Ok(Self {
            credentials,
            proxies,
            processor,
            terminal,
            cycle_interval,
            state: SchedulerState::RunningBatch,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn proxy_for(&self, index: usize) -> Option<&ProxyEndpoint> {
        self.proxies.for_account(index)
    }

    /// One pass over every account, in order.
    pub async fn run_cycle(&mut self, cancel: &CancellationToken) -> CycleSummary {
        self.state = SchedulerState::RunningBatch;
        let mut summary = CycleSummary::default();
        let total = self.credentials.len();

        for (index, credential) in self.credentials.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.interrupted = true;
                break;
            }

            let proxy = self.proxies.for_account(index);
            self.terminal.blank();
            self.terminal.rule();
            self.terminal
                .heading(&format!("Account: {}/{}", index + 1, total));
            match proxy {
                Some(p) => tracing::info!("Account {}/{} via proxy {}", index + 1, total, p),
                None => tracing::info!("Account {}/{} via direct connection", index + 1, total),
            }

            let outcome = self.processor.process(credential, proxy, cancel).await;
            summary.record(&outcome);
        }

        if summary.visited() < total {
            summary.interrupted = true;
        }
        tracing::info!(
            "Cycle finished: {} processed, {} without missions, {} invalid, {} unavailable, {} missions completed",
            summary.processed,
            summary.no_missions,
            summary.invalid_credentials,
            summary.unavailable,
            summary.missions_completed
        );
        summary
    }

    /// Run cycles until `cancel` fires. Returns the number of cycles started.
    pub async fn run(&mut self, cancel: &CancellationToken) -> u64 {
        let mut cycles = 0;
        loop {
            cycles += 1;
            let summary = self.run_cycle(cancel).await;
            if summary.interrupted || cancel.is_cancelled() {
                break;
            }

            self.state = SchedulerState::Sleeping;
            let next_run = chrono::Local::now()
                + chrono::Duration::from_std(self.cycle_interval)
                    .unwrap_or_else(|_| chrono::Duration::days(1));
            self.terminal.blank();
            self.terminal.muted(&format!(
                "Waiting {} Before Next Loop (next run at {})...",
                describe_interval(self.cycle_interval),
                next_run.format("%Y-%m-%d %H:%M:%S")
            ));

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.cycle_interval) => {}
            }
        }
        tracing::info!("Scheduler stopped after {} cycles", cycles);
        cycles
    }
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{} Hours", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{} Minutes", secs / 60)
    } else {
        format!("{} Seconds", secs)
    }
}
