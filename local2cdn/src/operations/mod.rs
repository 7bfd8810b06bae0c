//! Run operations using the plan-execute pattern.
//!
//! A run is split into two phases:
//! 1. **Planning**: [`RunPlan`] resolves the sources of every file group
//!    against a [`DocumentStore`] and records source warnings
//! 2. **Execution**: [`RunExecutor`] reads, rewrites and writes each planned
//!    group, or only reads and rewrites in dry-run mode
//!
//! [`run`] ties both phases to a [`Config`](crate::Config);
//! [`run_with_options`] does the same in dry-run mode when asked.
//!
//! # Examples
//!
//! ```no_run
//! use local2cdn::operations::{run, FsStore};
//! use local2cdn::{init_logger, ConfigBuilder};
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let report = run(&config, &FsStore::new(), None, &init_logger(false, false)).unwrap();
//! println!("{} reference(s) rewritten", report.replaced());
//! ```

pub mod executor;
pub mod plan;
pub mod run;
pub mod store;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use executor::{DocumentReport, RunExecutor, RunReport};
pub use plan::{PlannedGroup, RunPlan, RunWarning};
pub use run::{compile_task, run, run_with_options, Rewriter, RunOptions};
pub use store::{DocumentStore, FsStore};
