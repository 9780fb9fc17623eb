//! Command implementations

pub mod config;
pub mod datastore;
pub mod guest;
pub mod host;
pub mod iso;
pub mod network;
pub mod ntp;
pub mod vcsa;
pub mod version;
pub mod vsan;
