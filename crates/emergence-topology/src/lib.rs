//! Emergence Network Topology
//!
//! Edge-count models for a system of `n` agents under a connection cap `k`.
//!
//! # Growth Model
//!
//! Agents join one at a time. When agent `i` joins (1-based), the topology
//! decides how many links it forms with the `i - 1` agents already present:
//!
//! - **Bounded degree**: `min(k, i - 1)` links to existing agents
//! - **Full mesh**: a link to every existing agent, regardless of `k`
//! - **Hub and spoke**: one link to the hub plus up to `k - 1` peer links
//! - **Pipeline**: a single link to the previous agent, gated on `k > 0`
//!
//! The edge count `E` of the finished system is the sum of those per-join
//! link counts. Every model yields `E = 0` for a single agent.

mod edges;
mod error;
mod topology;

pub use edges::{capped_sum, edge_count, edge_count_by_joins, links_on_join};
pub use error::{Error, Result};
pub use topology::Topology;

/// Edge count of a complete graph on `n` agents.
pub const fn complete_edges(n: u32) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}
