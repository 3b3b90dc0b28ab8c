//! Promotion of build outputs into the source tree.
//!
//! Build rules register files they produced as candidates for promotion; at
//! the end of a build the candidates are either copied over their source-tree
//! targets right away or written to a ledger that a later `promote apply`
//! consumes. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (paths, candidates, grouping and
//!   selection planning). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (layout, config, ledger, staging,
//!   file copy).
//!
//! Orchestration modules ([`registry`], [`engine`], [`session`], [`apply`])
//! combine the two to implement the build hook and the CLI commands.

pub mod apply;
pub mod console;
pub mod core;
pub mod engine;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod registry;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
