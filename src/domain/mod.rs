//! Pure domain types and functions.
//!
//! Nothing in this tree performs I/O or imports from `crate::infra`,
//! `crate::commands`, or `crate::application`.

pub mod appliance;
pub mod config;
pub mod error;
pub mod kickstart;
pub mod name_match;
pub mod network;
pub mod vsan;
