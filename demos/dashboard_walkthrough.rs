//! Dashboard walkthrough for geodash-rs
//!
//! This example demonstrates how to:
//! - Load an administrative boundary file
//! - Start a seeded dashboard session
//! - Change filters and read KPIs and the top-N chart
//! - Drill into a state and inspect a district in the detail panel

use geodash_rs::format::format_value;
use geodash_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geodash-rs Dashboard Walkthrough ===\n");

    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/crates/geodash-core/data/india_sample.geojson"
    );
    println!("Loading geography from {path}...");
    let collection = FeatureCollection::load_from_path(path)?;
    let stats = collection.stats();
    println!(
        "✓ {} states, {} districts, {} sub-districts ({} dropped)\n",
        stats.states, stats.districts, stats.sub_districts, stats.dropped_non_areal
    );

    let mut dashboard = Dashboard::new(collection, DashboardConfig::default().with_seed(42));

    // Example 1: national view
    println!("--- Example 1: States, all schemes ---");
    print_summary(&dashboard);

    // Example 2: narrower filters
    println!("--- Example 2: PMMKSS, female beneficiaries ---");
    dashboard.dispatch(Action::SetScheme(Scheme::Pmmkss), 0);
    dashboard.dispatch(Action::SetGender(Gender::Female), 0);
    dashboard.dispatch(Action::SetIndicator(Indicator::Beneficiaries), 0);
    print_summary(&dashboard);

    // Example 3: the fisheries scheme has its own key shape and indicators
    println!("--- Example 3: PMMSY, marine sector, FY 2023-24 ---");
    dashboard.dispatch(Action::SetScheme(Scheme::Pmmsy), 0);
    dashboard.dispatch(Action::SetSector(Sector::Marine), 10);
    dashboard.dispatch(Action::SetFinancialYear(FinancialYear::Fy2023), 20);
    dashboard.tick(1_000);
    print_summary(&dashboard);

    // Example 4: drill down and inspect one district
    println!("--- Example 4: Drill into Kerala ---");
    let mut surface = CommandBuffer::new();
    dashboard.render_map(&mut surface);
    dashboard.double_click(Some("KL"));
    dashboard.render_map(&mut surface);
    print_summary(&dashboard);

    dashboard.click(Some("KL-KLM"));
    if let PanelView::Visible {
        title,
        subtitle,
        rows,
        officer,
        ..
    } = dashboard.detail_panel()
    {
        println!("{title} ({subtitle})");
        if let Some(officer) = officer {
            println!("Officer: {officer}");
        }
        for row in rows {
            let marker = if row.highlighted { "*" } else { " " };
            println!("{marker} {:<22} {}", row.label, row.value);
        }
    }
    println!("\nSurface commands recorded: {}", surface.len());

    Ok(())
}

fn print_summary(dashboard: &Dashboard) {
    let header = dashboard.header();
    let view = dashboard.derived();
    println!(
        "{} | {} | {} | {}",
        header.scheme, header.indicator, header.period, header.resolution
    );
    println!(
        "Average {} | Min {} | Max {} ({} with data)",
        format_value(view.indicator, Some(view.kpis.average)),
        format_value(view.indicator, Some(view.kpis.min)),
        format_value(view.indicator, Some(view.kpis.max)),
        view.kpis.count
    );
    for (i, row) in view.top.iter().take(3).enumerate() {
        println!(
            "{}. {} {}",
            i + 1,
            row.name,
            format_value(view.indicator, Some(row.total))
        );
    }
    println!();
}
