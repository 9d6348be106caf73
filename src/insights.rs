//! # Insights
//!
//! Presentation-time derivations over a [`CarbonSummary`]. Nothing here
//! aggregates raw entries; totals come from the service as-is.

use crate::models::{CarbonSummary, Category, MonthlyData, Rgb};

/// Monthly amount that fills a bar completely.
pub const MONTHLY_BAR_SCALE_KG: f64 = 200.0;
pub const HIGH_EMISSION_ABOVE_KG: f64 = 150.0;
pub const MEDIUM_EMISSION_ABOVE_KG: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmissionTier {
    Low,
    Medium,
    High,
}

impl EmissionTier {
    /// Thresholds are strict: exactly 150.0 is still Medium, exactly 100.0 is Low.
    pub fn for_amount(amount: f64) -> Self {
        if amount > HIGH_EMISSION_ABOVE_KG {
            EmissionTier::High
        } else if amount > MEDIUM_EMISSION_ABOVE_KG {
            EmissionTier::Medium
        } else {
            EmissionTier::Low
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            EmissionTier::Low => Rgb(0x4C, 0xAF, 0x50),
            EmissionTier::Medium => Rgb(0xFF, 0xC1, 0x07),
            EmissionTier::High => Rgb(0xF4, 0x43, 0x36),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmissionTier::Low => "Low Emissions",
            EmissionTier::Medium => "Medium Emissions",
            EmissionTier::High => "High Emissions",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionTier::Low => "low",
            EmissionTier::Medium => "medium",
            EmissionTier::High => "high",
        }
    }
}

/// Bar width in percent, clamped to [0, 100].
pub fn monthly_bar_width(amount: f64) -> f64 {
    let pct = amount / MONTHLY_BAR_SCALE_KG * 100.0;
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Share of the total in percent; 0 when the total is not positive.
pub fn category_percentage(amount: f64, total_carbon: f64) -> f64 {
    if total_carbon > 0.0 {
        amount / total_carbon * 100.0
    } else {
        0.0
    }
}

pub fn monthly_average(summary: &CarbonSummary) -> f64 {
    let months = summary.monthly_data.len();
    if months == 0 {
        return 0.0;
    }
    summary.total_carbon / months as f64
}

/// Category with the strictly greatest amount.
///
/// The scan starts from a zero sentinel, so ties keep the first key seen and a
/// breakdown with no positive amount yields `None`.
pub fn largest_category(summary: &CarbonSummary) -> Option<(Category, f64)> {
    let mut best: Option<(&Category, f64)> = None;
    let mut best_amount = 0.0;
    for (category, amount) in summary.category_breakdown.iter() {
        if amount > best_amount {
            best_amount = amount;
            best = Some((category, amount));
        }
    }
    best.map(|(c, a)| (c.clone(), a))
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyBar {
    pub month: String,
    pub amount: f64,
    pub width_percent: f64,
    pub tier: EmissionTier,
}

impl From<&MonthlyData> for MonthlyBar {
    fn from(data: &MonthlyData) -> Self {
        MonthlyBar {
            month: data.month.clone(),
            amount: data.carbon_amount,
            width_percent: monthly_bar_width(data.carbon_amount),
            tier: EmissionTier::for_amount(data.carbon_amount),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryBar {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
}

impl CategoryBar {
    pub fn color(&self) -> Rgb {
        self.category.color()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Insights {
    pub total_carbon: f64,
    pub monthly_average: f64,
    pub largest_category: Option<Category>,
}

/// Monthly bars in service order.
pub fn monthly_bars(summary: &CarbonSummary) -> Vec<MonthlyBar> {
    summary.monthly_data.iter().map(MonthlyBar::from).collect()
}

/// Category bars in breakdown order.
pub fn category_bars(summary: &CarbonSummary) -> Vec<CategoryBar> {
    summary
        .category_breakdown
        .iter()
        .map(|(category, amount)| CategoryBar {
            category: category.clone(),
            amount,
            percentage: category_percentage(amount, summary.total_carbon),
        })
        .collect()
}

pub fn insights(summary: &CarbonSummary) -> Insights {
    Insights {
        total_carbon: summary.total_carbon,
        monthly_average: monthly_average(summary),
        largest_category: largest_category(summary).map(|(c, _)| c),
    }
}
