use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::scoring::{self, PointsBreakdown};
use receipt_points::receipts::{validation, Receipt};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) file: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let (receipt, breakdown) = score_file(&args.file)?;
    render_breakdown(&receipt, &breakdown);
    Ok(())
}

fn score_file(path: &Path) -> Result<(Receipt, PointsBreakdown), AppError> {
    let raw = fs::read_to_string(path)?;
    let receipt: Receipt = serde_json::from_str(&raw)?;
    validation::check(&receipt)?;
    let breakdown = scoring::breakdown(&receipt);
    Ok((receipt, breakdown))
}

fn render_breakdown(receipt: &Receipt, breakdown: &PointsBreakdown) {
    println!(
        "Receipt from {} on {} at {} ({} items, total {})",
        receipt.retailer,
        receipt.purchase_date,
        receipt.purchase_time,
        receipt.items.len(),
        receipt.total
    );

    if breakdown.components.is_empty() {
        println!("\nNo rules awarded points");
    } else {
        println!("\nAwards");
        for component in &breakdown.components {
            println!(
                "- {:>4} {}: {}",
                component.points,
                component.rule.label(),
                component.notes
            );
        }
    }

    println!("\nTotal points: {}", breakdown.total);
}
