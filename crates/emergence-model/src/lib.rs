//! Emergence Risk Model
//!
//! Compares the risk of a multi-agent system under two assumptions:
//!
//! - **Linear**: agents are independent, so risk grows as `n · r0`
//! - **Connected**: agents are coupled through the edges of their topology,
//!   adding a coupling term and a quadratic cascade term
//!
//! # Pipeline
//!
//! 1. A [`Configuration`] is clamped at the boundary
//! 2. [`generate`] evaluates every curve over the agent-count domain
//! 3. [`Metrics`] derives the headline multiple and the axis bound
//! 4. [`to_csv`] renders the table for export
//!
//! Everything is recomputed from scratch on every change. Nothing is cached.
//!
//! # Example
//!
//! ```
//! use emergence_model::{generate, Configuration, Metrics, ModelConstants};
//!
//! let primary = Configuration::DEFAULT;
//! let series = generate(&primary, Vec::<(String, Configuration)>::new(), &ModelConstants::STANDARD);
//! let metrics = Metrics::from_series(&series, &primary);
//! assert_eq!(metrics.display_multiple, "46x");
//! ```

mod config;
mod csv;
mod error;
mod formula;
mod metrics;
mod series;

pub use config::{Configuration, MAX_AGENTS, MAX_AUTONOMY, MIN_AGENTS, MIN_AUTONOMY};
pub use csv::{header as csv_header, to_csv, CRLF, CSV_FILE_NAME};
pub use error::{Error, Result};
pub use formula::{evaluate, linear, ratio, ModelConstants, RiskPoint};
pub use metrics::{axis_max, format_multiple, format_value, Metrics, DEFAULT_AXIS_MAX};
pub use series::{generate, Row, Series, BASELINE_KEY, CURRENT_KEY};

pub use emergence_topology::Topology;
