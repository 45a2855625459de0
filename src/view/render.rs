//! Text renderers for every dashboard widget.
//!
//! Renderers return `String`s and never compute counts or rankings
//! themselves; they only format what `metrics` produced.

use std::fmt::Write as _;

use colored::Colorize;

use super::state::DetailState;
use super::viewport::Layout;
use crate::api::models::{BasicStats, ProductQuantity, WarehouseList};
use crate::metrics::ShipmentSummary;
use crate::metrics::distribution::{ChartSlice, DistributionLine, SizeRow};
use crate::metrics::ranking::RankedEntry;
use crate::metrics::shipments::StoreLine;

const RULE_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Basic counts followed by the brand and country distributions.
pub fn overview(
    basic: &BasicStats,
    brands: &[DistributionLine],
    countries: &[DistributionLine],
) -> String {
    let mut out = heading("Overview");

    let _ = writeln!(out, "  {} {}", "Warehouses:".bold(), format_number(basic.warehouse_count));
    let _ = writeln!(out, "  {} {}", "Products:  ".bold(), format_number(basic.product_count));
    let _ = writeln!(out, "  {} {}", "Stores:    ".bold(), format_number(basic.store_count));
    out.push('\n');

    out.push_str(&distribution_block("Brand distribution", brands));
    out.push('\n');
    out.push_str(&distribution_block("Top warehouse countries", countries));

    out
}

fn distribution_block(title: &str, lines: &[DistributionLine]) -> String {
    let mut out = format!("{}\n", title.bold().cyan());
    if lines.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    for line in lines {
        let _ = writeln!(
            out,
            "  {:<24} {:>8} ({})",
            truncate(&line.name, 24),
            format_number(line.count),
            line.percent,
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Inventory by size
// ---------------------------------------------------------------------------

/// Horizontal bar chart of the charted size slices.
pub fn size_chart(slices: &[ChartSlice], layout: Layout, bar_width: usize) -> String {
    let mut out = heading("Inventory by size");
    if slices.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    let max = slices.iter().map(|s| s.quantity).max().unwrap_or(0);
    let width = match layout {
        Layout::Wide => bar_width,
        Layout::Compact => (bar_width / 2).max(1),
    };

    for (i, slice) in slices.iter().enumerate() {
        let bar = paint(&bar(slice.quantity, max, width), i);
        match layout {
            Layout::Wide => {
                let _ = writeln!(
                    out,
                    "  {:<6} {}{} {:>10} {:>7}",
                    truncate(&slice.label, 6),
                    bar,
                    " ".repeat(width.saturating_sub(bar_len(slice.quantity, max, width))),
                    format_number(slice.quantity),
                    slice.share,
                );
            }
            Layout::Compact => {
                let _ = writeln!(out, "  {:<6} {}", truncate(&slice.label, 6), bar);
                let _ = writeln!(
                    out,
                    "         {} ({})",
                    format_number(slice.quantity),
                    slice.share
                );
            }
        }
    }
    out
}

/// Full inventory-by-size table.
pub fn size_table(rows: &[SizeRow]) -> String {
    let mut out = heading("Items by size");
    if rows.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    let _ = writeln!(out, "  {:<10} {:>12} {:>10}", "Size", "Quantity", "Share");
    let _ = writeln!(out, "  {}", "-".repeat(34));
    for (i, row) in rows.iter().enumerate() {
        let line = format!(
            "  {:<10} {:>12} {:>10}",
            truncate(&row.size, 10),
            format_number(row.quantity),
            row.percent
        );
        push_striped(&mut out, line, i);
    }
    out
}

fn bar_len(quantity: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let len = (quantity as f64 / max as f64 * width as f64).round() as usize;
    // Non-zero slices always get at least one cell.
    if quantity > 0 { len.max(1) } else { 0 }
}

fn bar(quantity: u64, max: u64, width: usize) -> String {
    "█".repeat(bar_len(quantity, max, width))
}

fn paint(bar: &str, index: usize) -> String {
    let colored = match index % 8 {
        0 => bar.red(),
        1 => bar.blue(),
        2 => bar.yellow(),
        3 => bar.cyan(),
        4 => bar.magenta(),
        5 => bar.bright_yellow(),
        6 => bar.white(),
        _ => bar.bright_red(),
    };
    colored.to_string()
}

// ---------------------------------------------------------------------------
// Top products
// ---------------------------------------------------------------------------

pub fn top_products(products: &[ProductQuantity]) -> String {
    let mut out = heading("Top products");
    if products.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    let _ = writeln!(out, "  {:<4} {:<28} {:>14}", "#", "Product ID", "Total quantity");
    let _ = writeln!(out, "  {}", "-".repeat(48));
    for (i, product) in products.iter().enumerate() {
        let line = format!(
            "  {:<4} {:<28} {:>14}",
            i + 1,
            truncate(&product.id, 28),
            format_number(product.quantity)
        );
        push_striped(&mut out, line, i);
    }
    out
}

// ---------------------------------------------------------------------------
// Warehouses
// ---------------------------------------------------------------------------

pub fn warehouse_list(list: &WarehouseList) -> String {
    let mut out = heading("Warehouses");
    if list.warehouses.is_empty() {
        let _ = writeln!(out, "  {}", "no warehouses with shipments".dimmed());
        return out;
    }

    let _ = writeln!(out, "  {:<24} {:>10}", "Warehouse", "Shipments");
    let _ = writeln!(out, "  {}", "-".repeat(35));
    for (i, warehouse) in list.warehouses.iter().enumerate() {
        let count = warehouse.shipments.len();
        let shipments = if count == 0 {
            "empty".dimmed().to_string()
        } else {
            count.to_string()
        };
        let line = format!(
            "  {:<24} {:>10}",
            truncate(&warehouse.warehouse_id, 24),
            shipments
        );
        push_striped(&mut out, line, i);
    }
    out
}

/// Render whatever the detail view currently holds.
pub fn detail_state(state: &DetailState) -> String {
    match state {
        DetailState::Unselected => format!(
            "{}\n",
            "Select a warehouse to see its shipments.".dimmed()
        ),
        DetailState::Loading { warehouse_id } => {
            format!("{}\n", format!("Loading {warehouse_id}…").yellow())
        }
        DetailState::Loaded {
            warehouse_id,
            summary,
            stores,
            ..
        } => warehouse_detail(warehouse_id, summary, stores),
        DetailState::Empty { warehouse_id } => {
            format!("{}\n", format!("No shipments for warehouse {warehouse_id}.").yellow())
        }
        DetailState::Error {
            warehouse_id,
            error,
        } => format!(
            "{}\n",
            format!("Could not load warehouse {warehouse_id}: {error}").red()
        ),
    }
}

/// Summary block, rankings and per-store breakdown for one warehouse.
pub fn warehouse_detail(
    warehouse_id: &str,
    summary: &ShipmentSummary,
    stores: &[StoreLine],
) -> String {
    let mut out = heading(&format!("Warehouse {warehouse_id}"));

    if summary.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    let _ = writeln!(out, "  {} {}", "Stores served:    ".bold(), summary.store_count);
    let _ = writeln!(out, "  {} {}", "Distinct products:".bold(), summary.distinct_product_count);
    let _ = writeln!(out, "  {} {}", "Product lines:    ".bold(), summary.total_product_count);
    let _ = writeln!(out, "  {} {}", "Size units:       ".bold(), summary.total_size_count);
    out.push('\n');

    out.push_str(&ranking_block("Most shipped products", "Product", &summary.top_products));
    out.push('\n');
    out.push_str(&ranking_block("Most shipped sizes", "Size", &summary.top_sizes));

    if !stores.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", "Shipments by store".bold().cyan());
        let _ = writeln!(out, "  {:<24} {:>9} {:>10}", "Store", "Products", "Sizes");
        let _ = writeln!(out, "  {}", "-".repeat(45));
        for (i, store) in stores.iter().enumerate() {
            let line = format!(
                "  {:<24} {:>9} {:>10}",
                truncate(&store.store_id, 24),
                store.product_lines,
                store.size_units
            );
            push_striped(&mut out, line, i);
        }
    }

    out
}

fn ranking_block(title: &str, key_header: &str, entries: &[RankedEntry]) -> String {
    let mut out = format!("{}\n", title.bold().cyan());
    if entries.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        return out;
    }

    let _ = writeln!(out, "  {:<24} {:>8}", key_header, "Count");
    for (i, entry) in entries.iter().enumerate() {
        let line = format!("  {:<24} {:>8}", truncate(&entry.key, 24), entry.count);
        push_striped(&mut out, line, i);
    }
    out
}

// ---------------------------------------------------------------------------
// Assistant and inline errors
// ---------------------------------------------------------------------------

/// Assistant HTML rendered as indented plain text.
pub fn assistant_text(title: &str, html: &str) -> String {
    let mut out = heading(title);
    let text = super::html::to_text(html);
    if text.is_empty() {
        let _ = writeln!(out, "  {}", "(empty answer)".dimmed());
        return out;
    }
    for line in text.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// Inline message shown in place of a widget that failed.
pub fn widget_error(title: &str, message: &str) -> String {
    format!("{}\n  {}\n", title.bold().cyan(), message.red())
}

/// Inline message for a widget whose response had no records.
pub fn widget_empty(title: &str) -> String {
    format!("{}\n  {}\n", title.bold().cyan(), "no data".dimmed())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title.bold().cyan(), "=".repeat(RULE_WIDTH))
}

fn push_striped(out: &mut String, line: String, index: usize) {
    if index % 2 == 0 {
        let _ = writeln!(out, "{line}");
    } else {
        let _ = writeln!(out, "{}", line.dimmed());
    }
}

/// Thousands separators: `1234567` → `"1,234,567"`.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Cut `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn truncate_is_char_aware() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("almacén-central", 8), "almacén…");
    }

    #[test]
    fn bars_scale_to_max() {
        assert_eq!(bar_len(10, 10, 40), 40);
        assert_eq!(bar_len(5, 10, 40), 20);
        assert_eq!(bar_len(1, 1000, 40), 1);
        assert_eq!(bar_len(0, 10, 40), 0);
        assert_eq!(bar_len(0, 0, 40), 0);
    }

    #[test]
    fn compact_chart_puts_legend_below() {
        plain();
        let slices = vec![ChartSlice {
            label: "M".to_string(),
            quantity: 1500,
            share: "100.0%".to_string(),
        }];

        let wide = size_chart(&slices, Layout::Wide, 10);
        assert!(wide.contains("1,500 100.0%") || wide.contains("1,500  100.0%"));

        let compact = size_chart(&slices, Layout::Compact, 10);
        assert!(compact.contains("1,500 (100.0%)"));
        assert!(compact.contains(&"█".repeat(5)));
    }

    #[test]
    fn empty_widgets_show_no_data() {
        plain();
        assert!(size_chart(&[], Layout::Wide, 10).contains("no data"));
        assert!(top_products(&[]).contains("no data"));
        assert!(size_table(&[]).contains("no data"));
    }

    #[test]
    fn empty_summary_renders_no_data_not_table() {
        plain();
        let text = warehouse_detail("W1", &ShipmentSummary::default(), &[]);
        assert!(text.contains("no data"));
        assert!(!text.contains("Most shipped"));
    }

    #[test]
    fn detail_state_messages() {
        plain();
        assert!(detail_state(&DetailState::Unselected).contains("Select a warehouse"));
        let empty = DetailState::Empty {
            warehouse_id: "W9".to_string(),
        };
        assert!(detail_state(&empty).contains("No shipments for warehouse W9"));
    }
}
