//! Capability-aware DDL for views, materialized views and stored functions.
//!
//! ```no_run
//! use viewddl::ddl::{DdlSynthesizer, VirtualTableOptions};
//! use viewddl::dialects::postgres::PostgresDialect;
//! use viewddl::executor::DryRunExecutor;
//!
//! let dialect = PostgresDialect::new();
//! let mut executor = DryRunExecutor::new();
//! let mut ddl = DdlSynthesizer::new(&dialect, &mut executor);
//! ddl.create_view_with("recent_orders", "SELECT id, placed_at FROM orders", &VirtualTableOptions::forced(), |v| {
//!     v.column("order_id").column("placed");
//! })?;
//! # Ok::<(), viewddl::ddl::DdlError>(())
//! ```

pub mod cli;
pub mod ddl;
pub mod dialects;
pub mod executor;
pub mod logger;
pub mod model;
