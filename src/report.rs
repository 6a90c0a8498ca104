//! Plain-text renderings of desk data for the terminal.

use std::fmt::Write;

use crate::domain::{
    fastest_crossing, BorderStatus, ConfidenceTier, ExchangeRate, InventoryFilter,
    InventorySummary, MarketComp, RateStatus, VehicleEvaluation,
};
use crate::util::format::{format_currency, format_percent, format_timestamp, format_usd};

fn rate_line(rate: &ExchangeRate) -> String {
    let source = match rate.status {
        RateStatus::Fresh => "live",
        RateStatus::Cached => "cached",
        RateStatus::Fallback => "fallback",
    };
    format!(
        "{} {:.4} ({source}, {})",
        rate.pair(),
        rate.rate,
        format_timestamp(rate.observed_at)
    )
}

pub fn render_inventory(
    summary: &InventorySummary,
    rate: &ExchangeRate,
    filter: &InventoryFilter,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rate:    {}", rate_line(rate));
    let _ = writeln!(
        out,
        "Filter:  {}{}",
        filter.mode.label(),
        if filter.query.trim().is_empty() {
            String::new()
        } else {
            format!(" / \"{}\"", filter.query.trim())
        }
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<4} {:<32} {:>12} {:>12} {:>12} {:>12} {:>5}  {}",
        "ID", "VEHICLE", "LIST (CAD)", "LANDED", "RESALE", "NET", "CONF", "ORIGIN"
    );

    for item in &summary.items {
        let vehicle = &item.vehicle;
        let marker = if item.breakdown.is_high_yield { "*" } else { " " };
        let live = if vehicle.is_live { " [live]" } else { "" };
        let _ = writeln!(
            out,
            "{:<4} {:<32} {:>12} {:>12} {:>12} {:>12}{marker}{:>4}  {}{live}",
            vehicle.id,
            truncate(&vehicle.display_name(), 32),
            format_currency(vehicle.list_price, "CAD"),
            format_usd(item.breakdown.total_landed_cost),
            format_usd(vehicle.expected_resale),
            format_usd(item.breakdown.net_profit),
            item.confidence,
            item.breakdown.origin_label,
        );
    }

    if summary.items.is_empty() {
        let _ = writeln!(out, "(no listings match)");
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Market profit: {}   High-yield: {}   Avg confidence: {:.0}",
        format_usd(summary.total_market_profit),
        summary.high_yield_count,
        summary.average_confidence
    );
    out
}

pub fn render_quote(
    evaluation: &VehicleEvaluation,
    rate: &ExchangeRate,
    comp: Option<&MarketComp>,
    comp_confidence: Option<u8>,
) -> String {
    let vehicle = &evaluation.vehicle;
    let b = &evaluation.breakdown;
    let mut out = String::new();

    let _ = writeln!(out, "{} (#{})", vehicle.display_name(), vehicle.id);
    let _ = writeln!(out, "Identification: {}", vehicle.identification());
    let _ = writeln!(out, "Origin:         {}", b.origin_label);
    let _ = writeln!(out, "Rate:           {}", rate_line(rate));
    let _ = writeln!(out);

    let row = |out: &mut String, label: &str, value: String| {
        let _ = writeln!(out, "  {label:<24}{value:>14}");
    };
    row(&mut out, "List price (CAD)", format_currency(vehicle.list_price, "CAD"));
    if b.seasonal.winter_deduction > 0.0 {
        row(
            &mut out,
            "Winter deduction (CAD)",
            format_currency(-b.seasonal.winter_deduction, "CAD"),
        );
    }
    if b.seasonal.storage_premium > 0.0 {
        row(
            &mut out,
            "Storage premium (CAD)",
            format_currency(b.seasonal.storage_premium, "CAD"),
        );
    }
    row(&mut out, "Base price", format_usd(b.base_price));
    row(&mut out, "Primary duty", format_usd(b.primary_duty));
    row(&mut out, "Luxury duty", format_usd(b.luxury_duty));
    row(&mut out, "Fixed fees", format_usd(b.fixed_fees));
    row(&mut out, "Total landed cost", format_usd(b.total_landed_cost));
    row(&mut out, "Expected resale", format_usd(vehicle.expected_resale));
    row(&mut out, "Net profit", format_usd(b.net_profit));
    if vehicle.list_price > 0.0 && b.total_landed_cost > 0.0 {
        row(&mut out, "Margin on cost", format_percent(b.net_profit / b.total_landed_cost));
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "High yield: {}   Confidence: {} ({})",
        if b.is_high_yield { "yes" } else { "no" },
        evaluation.confidence,
        ConfidenceTier::from_score(evaluation.confidence).label()
    );

    if let Some(comp) = comp {
        let _ = writeln!(
            out,
            "Market comps: avg {} / {} listed / {} days on market{}",
            format_usd(comp.average_price),
            comp.inventory_count,
            comp.days_on_market,
            comp_confidence
                .map(|score| format!(" -> confidence {score}"))
                .unwrap_or_default()
        );
    }
    out
}

pub fn render_borders(statuses: &[BorderStatus]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<30} {:>8} {:>8}  {}",
        "CROSSING", "LOCATION", "CARS", "TRUCKS", "STATUS"
    );
    for status in statuses {
        let _ = writeln!(
            out,
            "{:<20} {:<30} {:>8} {:>8}  {}",
            status.crossing,
            truncate(&status.location, 30),
            format!("{} min", status.car_wait_minutes),
            status.truck_wait_display(),
            status.status.label()
        );
    }
    if let Some(best) = fastest_crossing(statuses) {
        let _ = writeln!(
            out,
            "\nFastest crossing: {} ({} min)",
            best.crossing, best.car_wait_minutes
        );
    }
    out
}

pub fn render_confidence(days: u32, profit: f64, score: u8) -> String {
    format!(
        "{days} days on market, {} profit -> confidence {score} ({})\n",
        format_usd(profit),
        ConfidenceTier::from_score(score).label()
    )
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        evaluate_inventory, evaluate_vehicle, sample_inventory, FilterMode, PricingPolicy,
    };

    #[test]
    fn inventory_table_lists_every_item() {
        let policy = PricingPolicy::default();
        let summary = evaluate_inventory(&sample_inventory(), 0.737, &policy);
        let rate = ExchangeRate::new(0.737, RateStatus::Fallback);
        let text = render_inventory(&summary, &rate, &InventoryFilter::default());

        assert!(text.contains("CAD/USD 0.7370 (fallback"));
        for item in &summary.items {
            assert!(text.contains(&item.vehicle.model));
        }
        assert!(text.contains("Market profit:"));
    }

    #[test]
    fn empty_result_is_explicit() {
        let policy = PricingPolicy::default();
        let filter = InventoryFilter {
            query: "bugatti".into(),
            mode: FilterMode::All,
        };
        let summary = evaluate_inventory(&sample_inventory(), 0.737, &policy).filtered(&filter);
        let rate = ExchangeRate::new(0.737, RateStatus::Fresh);
        let text = render_inventory(&summary, &rate, &filter);
        assert!(text.contains("(no listings match)"));
        assert!(text.contains("\"bugatti\""));
    }

    #[test]
    fn quote_shows_seasonal_rows_only_when_applicable() {
        let policy = PricingPolicy::default();
        let rate = ExchangeRate::new(0.737, RateStatus::Fresh);
        let vehicles = sample_inventory();

        let porsche = evaluate_vehicle(&vehicles[1], rate.rate, &policy);
        let text = render_quote(&porsche, &rate, None, None);
        assert!(!text.contains("Winter deduction"));
        assert!(text.contains("Primary duty"));

        let lambo = evaluate_vehicle(&vehicles[4], rate.rate, &policy);
        let comp = MarketComp {
            average_price: 160_000.0,
            inventory_count: 4,
            days_on_market: 9,
        };
        let text = render_quote(&lambo, &rate, Some(&comp), Some(12));
        assert!(text.contains("Winter deduction"));
        assert!(text.contains("Storage premium"));
        assert!(text.contains("-> confidence 12"));
    }

    #[test]
    fn borders_name_the_fastest_crossing() {
        let statuses = vec![
            BorderStatus::new("Rainbow Bridge", "Niagara Falls, ON / NY", 42, None),
            BorderStatus::new("Peace Bridge", "Fort Erie, ON / Buffalo, NY", 15, Some(28)),
        ];
        let text = render_borders(&statuses);
        assert!(text.contains("OPTIMAL"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Fastest crossing: Peace Bridge (15 min)"));
    }

    #[test]
    fn confidence_line() {
        assert_eq!(
            render_confidence(3, 10_000.0, 64),
            "3 days on market, $10,000 profit -> confidence 64 (Medium)\n"
        );
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
