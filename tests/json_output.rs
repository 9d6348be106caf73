use chrono::{TimeZone, Utc};
use serde_json::Value;

use green_ledger::display::{
    DisplayOptions, build_analytics_json, build_home_json, build_map_json, render_analytics,
    render_home, render_map,
};
use green_ledger::insights::{category_bars, insights, monthly_bars};
use green_ledger::models::{CarbonEntry, CarbonSummary, Category, CategoryBreakdown, MonthlyData};
use green_ledger::screens::{MapScreen, Notice};

fn sample_summary() -> CarbonSummary {
    CarbonSummary {
        total_carbon: 250.0,
        category_breakdown: [("transport", 150.0), ("shopping", 100.0)]
            .into_iter()
            .collect::<CategoryBreakdown>(),
        monthly_data: vec![
            MonthlyData {
                month: "2025-03".to_string(),
                carbon_amount: 210.0,
            },
            MonthlyData {
                month: "2025-02".to_string(),
                carbon_amount: 40.0,
            },
        ],
    }
}

fn sample_entry(id: u64) -> CarbonEntry {
    CarbonEntry {
        id: Some(id),
        activity: "Car commute".to_string(),
        category: Category::Transport,
        carbon_amount: 12.5,
        location: "Berlin".to_string(),
        latitude: None,
        longitude: None,
        timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
    }
}

#[test]
fn home_json_shape() {
    let summary = sample_summary();
    let entries = vec![sample_entry(1), sample_entry(2)];
    let json: Value = build_home_json(Some(&summary), &entries, None);

    for key in ["screen", "summary", "recentEntries", "notice"] {
        assert!(json.get(key).is_some(), "missing key: {}", key);
    }
    assert_eq!(json["screen"], "home");
    assert_eq!(json["summary"]["totalCarbon"], 250.0);
    assert_eq!(json["summary"]["categoryBreakdown"][0]["category"], "transport");
    assert_eq!(json["summary"]["categoryBreakdown"][0]["color"], "#FF6B6B");
    assert_eq!(json["summary"]["categoryBreakdown"][1]["color"], "#CCCCCC");
    assert_eq!(json["recentEntries"][0]["carbonAmount"], 12.5);
    assert!(json["notice"].is_null());
}

#[test]
fn home_json_carries_notice_without_summary() {
    let notice = Notice::error("Connection Error", "Could not connect to server.");
    let json = build_home_json(None, &[], Some(&notice));
    assert!(json["summary"].is_null());
    assert_eq!(json["recentEntries"].as_array().unwrap().len(), 0);
    assert_eq!(json["notice"]["level"], "error");
    assert_eq!(json["notice"]["title"], "Connection Error");
}

#[test]
fn analytics_json_shape() {
    let summary = sample_summary();
    let json = build_analytics_json(
        &monthly_bars(&summary),
        &category_bars(&summary),
        Some(&insights(&summary)),
        None,
    );
    assert_eq!(json["screen"], "analytics");
    assert_eq!(json["monthly"][0]["widthPercent"], 100.0);
    assert_eq!(json["monthly"][0]["tier"], "high");
    assert_eq!(json["monthly"][0]["color"], "#F44336");
    assert_eq!(json["monthly"][1]["widthPercent"], 20.0);
    assert_eq!(json["monthly"][1]["tier"], "low");
    assert_eq!(json["categories"][0]["percentage"], 60.0);
    assert_eq!(json["categories"][1]["percentage"], 40.0);
    assert_eq!(json["insights"]["monthlyAverage"], 125.0);
    assert_eq!(json["insights"]["largestCategory"], "transport");
}

#[test]
fn map_json_lists_legend_and_features() {
    let json = build_map_json(&MapScreen);
    assert_eq!(json["legend"].as_array().unwrap().len(), 3);
    assert_eq!(json["legend"][0]["color"], "#4CAF50");
    assert_eq!(json["legend"][2]["label"], "High Emissions");
    assert_eq!(json["features"].as_array().unwrap().len(), 4);
}

#[test]
fn plain_text_rendering() {
    let summary = sample_summary();
    let opts = DisplayOptions::plain();

    let home = render_home(Some(&summary), &[sample_entry(9)], opts);
    assert!(home.contains("Total: 250.00 kg CO₂"));
    assert!(home.contains("Shopping"));
    assert!(home.contains("#9 Car commute [Transport]"));
    assert!(home.contains("12.5 kg CO₂ · 📍 Berlin"));

    let analytics = render_analytics(
        &monthly_bars(&summary),
        &category_bars(&summary),
        Some(&insights(&summary)),
        opts,
    );
    assert!(analytics.contains("Mar 2025"));
    assert!(analytics.contains("Total Footprint   250.0 kg CO₂"));
    assert!(analytics.contains("(150.0 kg CO₂)"));
    assert!(analytics.contains("210.0 kg CO₂"));
    assert!(analytics.contains("Monthly Average   125.0 kg CO₂"));
    assert!(analytics.contains("Largest Category  Transport"));

    let map = render_map(&MapScreen, opts);
    assert!(map.contains("Carbon Footprint Map"));
    assert!(map.contains("• Travel route analysis"));
}
