//! Side-effecting helpers: filesystem layout, config, ledger, staging, copy.

pub mod config;
pub mod copy;
pub mod layout;
pub mod ledger;
pub mod staging;
