use chrono::Timelike;
use serde::Serialize;
use tracing::debug;

use super::domain::{Item, Receipt};
use super::validation::parse_purchase_time;

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const POINTS_PER_ITEM_PAIR: i64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// Scoring rules; every rule applies independently and awards are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundDollar,
    QuarterMultiple,
    ItemPairs,
    ItemDescription,
    OddDay,
    AfternoonWindow,
}

impl PointsRule {
    pub const fn label(self) -> &'static str {
        match self {
            PointsRule::RetailerName => "retailer name",
            PointsRule::RoundDollar => "round dollar total",
            PointsRule::QuarterMultiple => "total multiple of 0.25",
            PointsRule::ItemPairs => "item pairs",
            PointsRule::ItemDescription => "item description",
            PointsRule::OddDay => "odd purchase day",
            PointsRule::AfternoonWindow => "afternoon purchase",
        }
    }
}

/// A single award, kept so a score can be explained line by line. Item descriptions with a
/// negative price produce a negative award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsComponent {
    pub rule: PointsRule,
    pub points: i64,
    pub notes: String,
}

/// Every award that contributed to a receipt's points, plus their sum floored at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub components: Vec<PointsComponent>,
    pub total: u64,
}

impl PointsBreakdown {
    fn award(&mut self, rule: PointsRule, points: i64, notes: String) {
        if points == 0 {
            return;
        }
        debug!(rule = rule.label(), points, %notes, "points awarded");
        self.components.push(PointsComponent {
            rule,
            points,
            notes,
        });
    }

    pub fn points_for(&self, rule: PointsRule) -> i64 {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .fold(0, i64::saturating_add)
    }

    // Awards are summed signed; only the final total is clamped.
    fn settle(&mut self) {
        let sum = self
            .components
            .iter()
            .map(|component| component.points)
            .fold(0, i64::saturating_add);
        self.total = sum.max(0) as u64;
    }
}

/// Points for a receipt that has already passed validation.
pub fn score(receipt: &Receipt) -> u64 {
    breakdown(receipt).total
}

/// Apply every rule to the receipt and record each non-zero award.
pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    let mut breakdown = PointsBreakdown::default();

    let retailer_points = receipt
        .retailer
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as i64;
    breakdown.award(
        PointsRule::RetailerName,
        retailer_points,
        format!("{retailer_points} alphanumeric characters in '{}'", receipt.retailer),
    );

    let total = parse_amount(&receipt.total);
    if total.fract() == 0.0 {
        breakdown.award(
            PointsRule::RoundDollar,
            ROUND_DOLLAR_POINTS,
            format!("total {} has no cents", receipt.total),
        );
    }
    if total % 0.25 == 0.0 {
        breakdown.award(
            PointsRule::QuarterMultiple,
            QUARTER_MULTIPLE_POINTS,
            format!("total {} is a multiple of 0.25", receipt.total),
        );
    }

    let pairs = (receipt.items.len() / 2) as i64;
    breakdown.award(
        PointsRule::ItemPairs,
        pairs * POINTS_PER_ITEM_PAIR,
        format!("{pairs} pair(s) across {} items", receipt.items.len()),
    );

    for item in &receipt.items {
        if let Some(points) = description_points(item) {
            breakdown.award(
                PointsRule::ItemDescription,
                points,
                format!(
                    "'{}' priced {} has a description length divisible by 3",
                    item.short_description.trim(),
                    item.price
                ),
            );
        }
    }

    if let Some(day) = purchase_day(&receipt.purchase_date) {
        if day % 2 != 0 {
            breakdown.award(
                PointsRule::OddDay,
                ODD_DAY_POINTS,
                format!("purchased on day {day}"),
            );
        }
    }

    if let Some(time) = parse_purchase_time(&receipt.purchase_time) {
        // [14:00, 16:00)
        if matches!(time.hour(), 14 | 15) {
            breakdown.award(
                PointsRule::AfternoonWindow,
                AFTERNOON_POINTS,
                format!("purchased at {}", receipt.purchase_time),
            );
        }
    }

    breakdown.settle();
    breakdown
}

/// `None` when the trimmed description length is not a multiple of three.
fn description_points(item: &Item) -> Option<i64> {
    if item.short_description.trim().len() % 3 != 0 {
        return None;
    }

    // `as` saturates on overflow and maps NaN to 0.
    Some((parse_amount(&item.price) * DESCRIPTION_PRICE_MULTIPLIER).ceil() as i64)
}

// Unparseable amounts count as zero; a malformed item price must not fail the receipt.
fn parse_amount(raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            debug!(raw, "amount is not numeric, scoring it as 0.0");
            0.0
        }
    }
}

fn purchase_day(purchase_date: &str) -> Option<i64> {
    purchase_date.split('-').nth(2)?.parse().ok()
}
