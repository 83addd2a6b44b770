//! Deterministic fallback estimate served when the live model is
//! quota-limited.

use super::{CostEstimate, LineItem, RiskDriver, Severity};

/// Confidence reported for fallback estimates, deliberately lower than a
/// live model response would claim.
const FALLBACK_CONFIDENCE: u8 = 62;

/// Base take-off table: (item, quantity, unit cost, total), INR.
const BASE_ITEMS: [(&str, &str, u64, u64); 6] = [
    ("Cement", "1200 bags", 420, 504_000),
    ("TMT Steel", "18 tons", 64_000, 1_152_000),
    ("Sand", "320 m3", 1_700, 544_000),
    ("Aggregate", "260 m3", 1_500, 390_000),
    ("Bricks/Blocks", "95000 units", 11, 1_045_000),
    ("Labor", "5400 man-hours", 420, 2_268_000),
];

/// Cost multiplier for a project type. Unknown labels get 1.0.
fn project_multiplier(project_type: &str) -> f64 {
    match project_type {
        "Residential Tower" => 0.9,
        "Commercial Complex" => 1.0,
        "Industrial Facility" => 1.2,
        "Hospital Infrastructure" => 1.35,
        _ => 1.0,
    }
}

/// Scale a base INR amount by the project multiplier, rounding to the
/// nearest rupee.
fn scale(base: u64, multiplier: f64) -> u64 {
    (base as f64 * multiplier).round() as u64
}

/// Build a complete estimate for `project_type` without any external call.
///
/// Unit costs and line totals are scaled and rounded independently, so a
/// line's total is not forced to equal quantity times unit cost after
/// rounding. The grand total is the exact sum of the scaled line totals.
/// The summary discloses that this is a fallback, not a live estimate.
pub fn build_fallback_estimate(project_type: &str) -> CostEstimate {
    let multiplier = project_multiplier(project_type);

    let take_offs: Vec<LineItem> = BASE_ITEMS
        .iter()
        .map(|&(item, quantity, unit_cost, total)| LineItem {
            item: item.to_string(),
            quantity: quantity.to_string(),
            unit_cost: scale(unit_cost, multiplier),
            total: scale(total, multiplier),
        })
        .collect();

    let total_estimated_cost = take_offs.iter().map(|line| line.total).sum();

    CostEstimate {
        project_summary: format!(
            "Estimated INR budget for {}. Live Gemini response is temporarily \
             unavailable due to quota limits, so this is a fallback estimate.",
            project_type
        ),
        total_estimated_cost,
        confidence_score: FALLBACK_CONFIDENCE,
        take_offs,
        risk_drivers: vec![
            RiskDriver {
                factor: "Steel price volatility".to_string(),
                severity: Severity::High,
                impact: "Reinforcement cost may increase significantly if commodity rates rise."
                    .to_string(),
            },
            RiskDriver {
                factor: "Labor availability".to_string(),
                severity: Severity::Medium,
                impact: "Skilled labor shortages can delay schedule and increase labor rates."
                    .to_string(),
            },
            RiskDriver {
                factor: "Cement and fuel inflation".to_string(),
                severity: Severity::Medium,
                impact: "Transport and material input inflation may shift monthly procurement costs."
                    .to_string(),
            },
        ],
        market_hedge_strategy: "Use phased procurement with rate contracts for steel/cement, \
                                maintain a 7-10% contingency, and review supplier quotes every \
                                two weeks."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_TYPES: [&str; 4] = [
        "Residential Tower",
        "Commercial Complex",
        "Industrial Facility",
        "Hospital Infrastructure",
    ];

    #[test]
    fn test_total_is_sum_of_line_totals() {
        for project_type in KNOWN_TYPES {
            let estimate = build_fallback_estimate(project_type);
            let sum: u64 = estimate.take_offs.iter().map(|line| line.total).sum();
            assert_eq!(estimate.total_estimated_cost, sum, "{}", project_type);
        }
    }

    #[test]
    fn test_deterministic() {
        let first = build_fallback_estimate("Industrial Facility");
        let second = build_fallback_estimate("Industrial Facility");
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_unknown_type_uses_unit_multiplier() {
        let unknown = build_fallback_estimate("Opera House");
        let baseline = build_fallback_estimate("Commercial Complex");
        assert_eq!(unknown.take_offs, baseline.take_offs);
        assert_eq!(unknown.total_estimated_cost, baseline.total_estimated_cost);
        assert!(unknown.project_summary.contains("Opera House"));
    }

    #[test]
    fn test_commercial_complex_base_values() {
        let estimate = build_fallback_estimate("Commercial Complex");
        assert_eq!(estimate.total_estimated_cost, 5_903_000);
        assert_eq!(estimate.take_offs.len(), 6);
        assert_eq!(estimate.take_offs[0].item, "Cement");
        assert_eq!(estimate.take_offs[0].unit_cost, 420);
        assert_eq!(estimate.take_offs[0].total, 504_000);
        assert_eq!(estimate.confidence_score, 62);
    }

    #[test]
    fn test_residential_tower_scaling() {
        let estimate = build_fallback_estimate("Residential Tower");
        // 11 * 0.9 rounds up to 10 while the line total scales exactly.
        let bricks = &estimate.take_offs[4];
        assert_eq!(bricks.item, "Bricks/Blocks");
        assert_eq!(bricks.unit_cost, 10);
        assert_eq!(bricks.total, 940_500);
    }

    #[test]
    fn test_summary_discloses_fallback() {
        let estimate = build_fallback_estimate("Hospital Infrastructure");
        assert!(estimate.project_summary.contains("Hospital Infrastructure"));
        assert!(estimate.project_summary.contains("fallback estimate"));
    }

    #[test]
    fn test_risk_drivers_are_fixed_across_types() {
        let a = build_fallback_estimate("Residential Tower");
        let b = build_fallback_estimate("Hospital Infrastructure");
        assert_eq!(a.risk_drivers, b.risk_drivers);
        assert_eq!(a.market_hedge_strategy, b.market_hedge_strategy);
        assert_eq!(a.risk_drivers[0].severity, Severity::High);
    }
}
