//! Cost estimate domain types.
//!
//! [`CostEstimate`] is the single output contract of the service: the same
//! shape is returned whether the numbers came from the live model or from
//! the deterministic fallback path.

mod fallback;

pub use fallback::build_fallback_estimate;

use serde::{Deserialize, Serialize};

/// One quantity take-off line: a material or labor requirement with cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item: String,
    /// Textual amount with unit, e.g. `"1200 bags"`.
    pub quantity: String,
    /// Cost per unit in INR.
    pub unit_cost: u64,
    /// Line total in INR. Derived from the item's base total, not
    /// recomputed as quantity times unit cost.
    pub total: u64,
}

/// Severity of a budget risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A named budget risk with its expected impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDriver {
    pub factor: String,
    pub severity: Severity,
    pub impact: String,
}

/// A structured construction cost estimate, all monetary values in INR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub project_summary: String,
    pub total_estimated_cost: u64,
    /// 0-100; lower means less trust in the numbers.
    pub confidence_score: u8,
    pub take_offs: Vec<LineItem>,
    pub risk_drivers: Vec<RiskDriver>,
    pub market_hedge_strategy: String,
}
