//! Linear and connected risk formulas.
//!
//! For `n` agents, `E` edges and autonomy `A`:
//!
//! ```text
//! linear    = n · r0
//! coupling  = E · L · A
//! connected = n · r0 + α · coupling + γ · coupling² / n
//! ```
//!
//! The linear term treats agents as independent. The connected term adds a
//! coupling term proportional to the number of links and a quadratic cascade
//! term that grows with coupling density.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConstants {
    /// Baseline risk per independent agent.
    pub r0: f64,
    /// Load carried by each link (`L`).
    pub load_factor: f64,
    /// Weight of the first-order coupling term (`α`).
    pub alpha: f64,
    /// Weight of the quadratic cascade term (`γ`).
    pub gamma: f64,
}

impl ModelConstants {
    /// The constants the calculator ships with.
    pub const STANDARD: Self = Self {
        r0: 1.0,
        load_factor: 1.3,
        alpha: 0.3,
        gamma: 0.12,
    };

    /// Coupling `E · L · A`.
    pub fn coupling(&self, edges: u64, autonomy: u32) -> f64 {
        edges as f64 * self.load_factor * autonomy as f64
    }
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Both risk values at one agent count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    /// Agent count `n`.
    pub agents: u32,
    /// Edge count `E`.
    pub edges: u64,
    /// Coupling `E · L · A`.
    pub coupling: f64,
    /// Baseline risk assuming independent agents.
    pub linear: f64,
    /// Risk including coupling and cascade terms.
    pub connected: f64,
}

impl RiskPoint {
    /// `connected / linear`, or 0 when the baseline is not positive.
    pub fn multiple(&self) -> f64 {
        ratio(self.connected, self.linear)
    }
}

/// `value / baseline`, or 0 when the baseline is not positive.
pub fn ratio(value: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        value / baseline
    } else {
        0.0
    }
}

/// Baseline risk `n · r0`.
pub fn linear(agents: u32, constants: &ModelConstants) -> f64 {
    agents as f64 * constants.r0
}

/// Evaluate both formulas.
///
/// Fails with [`Error::InvalidConfiguration`] when `agents` is zero.
pub fn evaluate(
    agents: u32,
    edges: u64,
    autonomy: u32,
    constants: &ModelConstants,
) -> Result<RiskPoint> {
    if agents == 0 {
        return Err(Error::InvalidConfiguration(
            "agent count must be at least 1".to_string(),
        ));
    }
    Ok(point(agents, edges, autonomy, constants))
}

/// Evaluate both formulas for `agents >= 1`.
pub(crate) fn point(agents: u32, edges: u64, autonomy: u32, constants: &ModelConstants) -> RiskPoint {
    debug_assert!(agents >= 1, "agent count reached the formula layer as 0");
    let n = agents as f64;
    let linear = linear(agents, constants);
    let coupling = constants.coupling(edges, autonomy);
    let connected = linear + constants.alpha * coupling + constants.gamma * coupling * coupling / n;
    RiskPoint {
        agents,
        edges,
        coupling,
        linear,
        connected,
    }
}
