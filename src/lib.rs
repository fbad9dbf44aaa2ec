//! # ovh-ddns
//!
//! Keeps OVH DNS A records pointed at the current public IPv4 address.
//!
//! Each run resolves the public IP once, then for every configured record
//! looks up the provider record id, updates its target and refreshes the
//! zone. Nothing is cached between runs, so it is meant to be scheduled
//! (cron, systemd timer).
//!
//! ## Usage
//!
//! ```bash
//! # Write a sample configuration
//! ovh-ddns init
//!
//! # Show the current public IP
//! ovh-ddns ip
//!
//! # Update all records
//! ovh-ddns update
//! ```

pub mod config;
pub mod error;
pub mod providers;
pub mod resolver;
pub mod signer;
pub mod updater;

pub use config::Config;
pub use error::{DdnsError, Result};
pub use resolver::IpResolver;
pub use updater::{run, RunReport, UpdateResult, Updater};
