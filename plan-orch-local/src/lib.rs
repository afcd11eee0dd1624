//! # plan-orch-local — C5 Dispatch Router + C6 Worker Executor
//!
//! In-process, `tokio::spawn`-based parallel fan-out over ready sub-goals.
#![deny(missing_docs)]

mod executor;
mod router;

pub use executor::execute_one;
pub use router::DispatchRouter;
