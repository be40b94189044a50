//! Plain-text rendering of store state.

use pulseboard_core::dashboard::{Activity, CategoryDatum, ChartPoint, StatsBlock};

pub fn stats(stats: &StatsBlock) {
    for (_, entry) in stats.iter() {
        println!(
            "  {:<16} {:>8}  {:>+4}%",
            entry.label,
            entry.display_value(),
            entry.change
        );
    }
}

/// One line per tick in `watch`.
pub fn stats_line(stats: &StatsBlock) -> String {
    stats
        .iter()
        .map(|(metric, entry)| format!("{}={}", metric, entry.display_value()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn chart(series: &[ChartPoint]) {
    let max = series.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    for point in series {
        let width = (point.value * 40 / max) as usize;
        println!("  {:<4} {:>4} {}", point.date, point.value, "#".repeat(width));
    }
}

pub fn categories(title: &str, data: &[CategoryDatum]) {
    println!("{}:", title);
    for datum in data {
        println!("  {:<12} {:>5.1}%  {}", datum.name, datum.value, datum.color);
    }
}

pub fn activities(rows: &[Activity]) {
    println!("  {:>3}  {:<20} {:<28} DATE", "ID", "USER", "COMMIT");
    for row in rows {
        println!(
            "  {:>3}  {:<20} {:<28} {}",
            row.id, row.user, row.commit_message, row.date
        );
    }
}
