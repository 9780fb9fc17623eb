//! Application services — one module per administrative operation.
//!
//! Each service is a thin, linear orchestration: validate preconditions,
//! invoke one or two remote operations through injected ports, report
//! progress, fail fast with context. Imports only from `crate::domain`
//! and `crate::application`.

pub mod appliance;
pub mod datastore;
pub mod host_wait;
pub mod iso_build;
pub mod network_migrate;
pub mod ntp;
pub mod vcsa_deploy;
pub mod vsan_bootstrap;
