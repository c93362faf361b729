//! # auto-missions
//!
//! Multi-account mission runner. For every bearer token it fetches the
//! account profile, completes the missions that are still open, reports the
//! point balance, then sleeps until the next cycle.
//!
//! ## Flow
//!
//! ```text
//!   token.txt ──┐
//!               ├─► Scheduler ──► AccountProcessor ──► MissionClient ──► service
//!   proxy.txt ──┘   (i mod M)      (one account at a time)
//! ```
//!
//! Accounts, missions and requests are strictly sequential; one outstanding
//! request at a time.
//!
//! ## Modules
//! - `config`: environment configuration
//! - `loader`: credential and proxy list files
//! - `proxy`: proxy parsing and round-robin pairing
//! - `api`: remote service client, HTTP client factory, wire types
//! - `processor`: per-account workflow
//! - `scheduler`: cycle loop with graceful shutdown
//! - `terminal`: styled operator output and spinners

pub mod api;
pub mod config;
pub mod loader;
pub mod processor;
pub mod proxy;
pub mod scheduler;
pub mod terminal;
pub mod util;

pub use config::Config;
pub use loader::Credential;
pub use processor::{AccountOutcome, AccountProcessor, AccountReport};
pub use proxy::{ProxyEndpoint, ProxyRotation};
pub use scheduler::{CycleSummary, Scheduler, SchedulerState};
pub use terminal::Terminal;
