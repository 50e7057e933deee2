use colored::Colorize;
use crossterm::terminal;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use prompt_optimizer_core::{Category, Comparison, Optimization};

const DEFAULT_WIDTH: usize = 100;
const MIN_COLUMN_WIDTH: usize = 20;
const COLUMN_GAP: &str = " | ";

pub const ORIGINAL_HEADING: &str = "Original Prompt Response";
pub const SUGGESTED_HEADING: &str = "Suggested Prompt Response";

/// Width of the attached terminal, or 100 when there is none
pub fn terminal_width() -> usize {
    match terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        _ => DEFAULT_WIDTH,
    }
}

pub fn print_optimization(result: &Optimization) {
    println!();
    println!("{}", "Suggested Optimized Prompt".cyan().bold());
    println!("{}", result.augmented);
    println!("Prompt type is {}", result.category.to_string().yellow());
    println!();
    println!("{}", "Why is this Prompt Better?".cyan().bold());
    println!("{}", result.rationale);
    println!();
}

pub fn print_comparison(result: &Comparison, width: usize) {
    println!();
    println!("{}", "Suggested Optimized Prompt".cyan().bold());
    println!("{}", result.augmented);
    println!("Prompt type is {}", result.category.to_string().yellow());
    println!();
    println!("{}", "Response Comparison".cyan().bold());
    for line in side_by_side(
        ORIGINAL_HEADING,
        &result.original_response,
        SUGGESTED_HEADING,
        &result.optimized_response,
        width,
    ) {
        println!("{}", line);
    }
    println!();
    println!("{}", "Why is this Prompt Better?".cyan().bold());
    println!("{}", result.rationale);
    println!();
}

pub fn print_categories() {
    println!();
    for category in Category::ALL {
        let triggers = match category.rule() {
            Some(rule) => rule.triggers.join(", "),
            None => "(fallback)".to_string(),
        };
        println!("  {:<12} {}", category.as_str().green().bold(), triggers.dimmed());
        println!("  {:<12} {}", "", category.rewrite().suffix);
    }
    println!();
}

/// Lay out two texts as columns, each wrapped to half the width
pub fn side_by_side(
    left_title: &str,
    left: &str,
    right_title: &str,
    right: &str,
    width: usize,
) -> Vec<String> {
    let col = (width.saturating_sub(COLUMN_GAP.len()) / 2).max(MIN_COLUMN_WIDTH);

    let mut lines = vec![
        join_row(left_title, right_title, col),
        format!("{}-+-{}", "-".repeat(col), "-".repeat(col)),
    ];

    let left = wrap(left, col);
    let right = wrap(right, col);
    let rows = left.len().max(right.len());
    for i in 0..rows {
        let l = left.get(i).map(|c| &**c).unwrap_or("");
        let r = right.get(i).map(|c| &**c).unwrap_or("");
        lines.push(join_row(l, r, col));
    }

    lines
}

/// Pad `left` to `col` display cells and append `right`
fn join_row(left: &str, right: &str, col: usize) -> String {
    let pad = col.saturating_sub(left.width());
    format!("{left}{}{COLUMN_GAP}{right}", " ".repeat(pad))
        .trim_end()
        .to_string()
}
