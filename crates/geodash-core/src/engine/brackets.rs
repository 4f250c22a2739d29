// crates/geodash-core/src/engine/brackets.rs

//! Fixed value brackets per indicator.
//!
//! Brackets are half-open `[min, max)`, ordered, contiguous from zero, and
//! the last one is open-ended, so every finite non-negative value falls in
//! exactly one bracket. The bracket colour doubles as the map fill and the
//! legend swatch.

use crate::catalog::Indicator;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bracket {
    pub min: f64,
    /// Exclusive upper bound; `f64::INFINITY` for the last bracket
    /// (serialised as `null`).
    pub max: f64,
    pub label: &'static str,
    pub color: &'static str,
}

const PALETTE: [&str; 5] = ["#deebf7", "#9ecae1", "#6baed6", "#3182bd", "#08519c"];

/// Fill for features with no bracket (negative or non-finite values).
pub const NO_DATA_COLOR: &str = "#f0f0f0";

const fn bracket(i: usize, min: f64, max: f64, label: &'static str) -> Bracket {
    Bracket {
        min,
        max,
        label,
        color: PALETTE[i],
    }
}

const FUNDS: [Bracket; 5] = [
    bracket(0, 0.0, 1e7, "< ₹1 Cr"),
    bracket(1, 1e7, 5e7, "₹1–5 Cr"),
    bracket(2, 5e7, 1e8, "₹5–10 Cr"),
    bracket(3, 1e8, 5e8, "₹10–50 Cr"),
    bracket(4, 5e8, f64::INFINITY, "₹50 Cr+"),
];

const INVESTMENT: [Bracket; 5] = [
    bracket(0, 0.0, 1e8, "< ₹10 Cr"),
    bracket(1, 1e8, 5e8, "₹10–50 Cr"),
    bracket(2, 5e8, 1e9, "₹50–100 Cr"),
    bracket(3, 1e9, 2e9, "₹100–200 Cr"),
    bracket(4, 2e9, f64::INFINITY, "₹200 Cr+"),
];

const BENEFICIARIES: [Bracket; 5] = [
    bracket(0, 0.0, 500.0, "< 500"),
    bracket(1, 500.0, 2_000.0, "500–2K"),
    bracket(2, 2_000.0, 5_000.0, "2K–5K"),
    bracket(3, 5_000.0, 10_000.0, "5K–10K"),
    bracket(4, 10_000.0, f64::INFINITY, "10K+"),
];

const REGISTRATIONS: [Bracket; 5] = [
    bracket(0, 0.0, 1_000.0, "< 1K"),
    bracket(1, 1_000.0, 3_000.0, "1K–3K"),
    bracket(2, 3_000.0, 7_500.0, "3K–7.5K"),
    bracket(3, 7_500.0, 15_000.0, "7.5K–15K"),
    bracket(4, 15_000.0, f64::INFINITY, "15K+"),
];

const PROJECTS: [Bracket; 5] = [
    bracket(0, 0.0, 10.0, "< 10"),
    bracket(1, 10.0, 50.0, "10–50"),
    bracket(2, 50.0, 100.0, "50–100"),
    bracket(3, 100.0, 250.0, "100–250"),
    bracket(4, 250.0, f64::INFINITY, "250+"),
];

const PRODUCTION: [Bracket; 5] = [
    bracket(0, 0.0, 1_000.0, "< 1K t"),
    bracket(1, 1_000.0, 10_000.0, "1K–10K t"),
    bracket(2, 10_000.0, 50_000.0, "10K–50K t"),
    bracket(3, 50_000.0, 100_000.0, "50K–1L t"),
    bracket(4, 100_000.0, f64::INFINITY, "1L+ t"),
];

const EMPLOYMENT: [Bracket; 5] = [
    bracket(0, 0.0, 500.0, "< 500"),
    bracket(1, 500.0, 2_000.0, "500–2K"),
    bracket(2, 2_000.0, 5_000.0, "2K–5K"),
    bracket(3, 5_000.0, 15_000.0, "5K–15K"),
    bracket(4, 15_000.0, f64::INFINITY, "15K+"),
];

pub fn brackets_for(indicator: Indicator) -> &'static [Bracket] {
    match indicator {
        Indicator::Funds => &FUNDS,
        Indicator::Investment => &INVESTMENT,
        Indicator::Beneficiaries => &BENEFICIARIES,
        Indicator::Registrations => &REGISTRATIONS,
        Indicator::TotalProjects => &PROJECTS,
        Indicator::FishProduction => &PRODUCTION,
        Indicator::Employment | Indicator::DirectEmployment | Indicator::IndirectEmployment => {
            &EMPLOYMENT
        }
    }
}

/// Index of the first bracket with `min <= value < max`.
pub fn classify(value: f64, brackets: &[Bracket]) -> Option<usize> {
    brackets
        .iter()
        .position(|b| b.min <= value && value < b.max)
}

/// Map fill for a value of `indicator`.
pub fn color_for(indicator: Indicator, value: f64) -> &'static str {
    let brackets = brackets_for(indicator);
    classify(value, brackets)
        .map(|i| brackets[i].color)
        .unwrap_or(NO_DATA_COLOR)
}
