//! Application layer — ports, the deadline poller, and one service per
//! administrative operation.

pub mod poll;
pub mod ports;
pub mod services;
