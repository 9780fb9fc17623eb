//! Infrastructure — production implementations of the application ports.

pub mod cis;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod govc;
