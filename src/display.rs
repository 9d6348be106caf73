use serde_json::json;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn plain(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bright_black(&self) -> Plain {
            self.plain()
        }
        fn bright_white(&self) -> Plain {
            self.plain()
        }
        fn red(&self) -> Plain {
            self.plain()
        }
        fn yellow(&self) -> Plain {
            self.plain()
        }
        fn green(&self) -> Plain {
            self.plain()
        }
        fn cyan(&self) -> Plain {
            self.plain()
        }
        fn blue(&self) -> Plain {
            self.plain()
        }
        fn magenta(&self) -> Plain {
            self.plain()
        }
        fn white(&self) -> Plain {
            self.plain()
        }
        fn bold(&self) -> Plain {
            self.plain()
        }
        fn dimmed(&self) -> Plain {
            self.plain()
        }
        fn truecolor(&self, _r: u8, _g: u8, _b: u8) -> Plain {
            self.plain()
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
    impl ColorizeShim for Plain {
        fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::cli::Args;
use crate::insights::{CategoryBar, EmissionTier, Insights, MonthlyBar};
use crate::models::{CarbonEntry, CarbonSummary, Category, Rgb};
use crate::screens::{MapScreen, Notice, NoticeLevel};
use crate::utils::{
    colors_disabled, format_kg, format_kg_tenths, format_local_date, format_month_label,
    format_percent, parse_bool_env,
};

pub const BAR_CELLS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub color: bool,
    pub truecolor: bool,
}

impl DisplayOptions {
    pub fn from_args(args: &Args) -> Self {
        Self {
            color: !colors_disabled(),
            truecolor: args.truecolor || parse_bool_env("GREEN_LEDGER_TRUECOLOR"),
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            truecolor: false,
        }
    }
}

/// Closest of the basic ANSI colors, used when truecolor is off.
fn basic_color_name(rgb: Rgb) -> &'static str {
    let Rgb(r, g, b) = rgb;
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let spread = r.max(g).max(b) - r.min(g).min(b);
    if spread < 40 {
        return "white";
    }
    if r >= g + 40 && r >= b + 40 {
        if g >= 0x90 { "yellow" } else { "red" }
    } else if r >= 0xC0 && g >= 0xC0 {
        "yellow"
    } else if g >= r && b >= g - 20 && b + 20 >= g {
        "cyan"
    } else if g > r && g > b {
        "green"
    } else if b > r && b > g {
        "blue"
    } else {
        "magenta"
    }
}

pub fn paint(text: &str, rgb: Rgb, opts: DisplayOptions) -> String {
    if !opts.color {
        return text.to_string();
    }
    if opts.truecolor {
        return text.truecolor(rgb.0, rgb.1, rgb.2).to_string();
    }
    match basic_color_name(rgb) {
        "red" => text.red().to_string(),
        "yellow" => text.yellow().to_string(),
        "green" => text.green().to_string(),
        "cyan" => text.cyan().to_string(),
        "blue" => text.blue().to_string(),
        "magenta" => text.magenta().to_string(),
        _ => text.white().to_string(),
    }
}

fn heading(text: &str, opts: DisplayOptions) -> String {
    if opts.color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn muted(text: &str, opts: DisplayOptions) -> String {
    if opts.color {
        text.bright_black().to_string()
    } else {
        text.to_string()
    }
}

/// Filled portion of a bar for a percentage in [0, 100].
pub fn bar(percent: f64, rgb: Rgb, opts: DisplayOptions) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!(
        "{}{}",
        paint(&"█".repeat(filled), rgb, opts),
        muted(&"░".repeat(BAR_CELLS - filled), opts)
    )
}

fn category_dot(category: &Category, opts: DisplayOptions) -> String {
    paint("●", category.color(), opts)
}

pub fn render_notice(notice: &Notice, opts: DisplayOptions) -> String {
    let (mark, rgb) = match notice.level {
        NoticeLevel::Success => ("✔", EmissionTier::Low.color()),
        NoticeLevel::Error => ("✖", EmissionTier::High.color()),
    };
    format!(
        "{} {}: {}",
        paint(mark, rgb, opts),
        heading(&notice.title, opts),
        notice.message
    )
}

pub fn render_entry(entry: &CarbonEntry, opts: DisplayOptions) -> String {
    let pill = paint(&format!("[{}]", entry.category.display_name()), entry.category.color(), opts);
    let id = entry.id.map(|id| format!("#{id} ")).unwrap_or_default();
    format!(
        "{}{} {}\n  {} kg CO₂ · 📍 {} · {}",
        muted(&id, opts),
        heading(&entry.activity, opts),
        pill,
        entry.carbon_amount,
        entry.location,
        muted(&format_local_date(entry.timestamp), opts)
    )
}

pub fn render_home(
    summary: Option<&CarbonSummary>,
    recent: &[CarbonEntry],
    opts: DisplayOptions,
) -> String {
    let mut out = Vec::new();
    out.push(heading("Carbon Footprint Summary", opts));
    match summary {
        Some(summary) => {
            out.push(format!("Total: {}", heading(&format_kg(summary.total_carbon), opts)));
            out.push(muted(&"─".repeat(32), opts));
            out.push(heading("By Category", opts));
            for (category, amount) in summary.category_breakdown.iter() {
                out.push(format!(
                    "{} {:<16} {:>10.2} kg",
                    category_dot(category, opts),
                    category.display_name(),
                    amount
                ));
            }
        }
        None => out.push("No data available".to_string()),
    }
    out.push(String::new());
    out.push(heading("Recent Entries", opts));
    if recent.is_empty() {
        out.push(muted("No entries yet. Add your first carbon entry!", opts));
    } else {
        for entry in recent {
            out.push(render_entry(entry, opts));
        }
    }
    out.join("\n")
}

pub fn render_entries(entries: &[CarbonEntry], opts: DisplayOptions) -> String {
    if entries.is_empty() {
        return muted("No entries yet. Add your first carbon entry!", opts);
    }
    entries
        .iter()
        .map(|e| render_entry(e, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_analytics(
    months: &[MonthlyBar],
    categories: &[CategoryBar],
    insights: Option<&Insights>,
    opts: DisplayOptions,
) -> String {
    let mut out = Vec::new();
    out.push(heading("Monthly Analysis", opts));
    for m in months {
        out.push(format!(
            "{:<10} {} {:>14}",
            format_month_label(&m.month),
            bar(m.width_percent, m.tier.color(), opts),
            format_kg_tenths(m.amount)
        ));
    }
    out.push(String::new());
    out.push(heading("Category Distribution", opts));
    for c in categories {
        out.push(format!(
            "{} {:<12} {} {:>6} ({})",
            category_dot(&c.category, opts),
            c.category.display_name(),
            bar(c.percentage, c.color(), opts),
            format_percent(c.percentage),
            format_kg_tenths(c.amount)
        ));
    }
    out.push(String::new());
    out.push(heading("Insights", opts));
    let (total, average, largest) = match insights {
        Some(i) => (
            i.total_carbon,
            i.monthly_average,
            i.largest_category
                .as_ref()
                .map(|c| c.display_name())
                .unwrap_or_default(),
        ),
        None => (0.0, 0.0, String::new()),
    };
    out.push(format!("Total Footprint   {}", format_kg_tenths(total)));
    out.push(format!("Monthly Average   {}", format_kg_tenths(average)));
    out.push(format!("Largest Category  {largest}"));
    out.join("\n")
}

pub fn render_map(map: &MapScreen, opts: DisplayOptions) -> String {
    let mut out = vec![
        heading(MapScreen::TITLE, opts),
        MapScreen::DESCRIPTION.to_string(),
        String::new(),
        format!("🗺️  {}", heading("Map View", opts)),
        muted(MapScreen::PLACEHOLDER, opts),
    ];
    for tier in map.legend() {
        out.push(format!("  {} {}", paint("■", tier.color(), opts), tier.label()));
    }
    out.push(String::new());
    out.push(heading("Map Features", opts));
    for feature in MapScreen::FEATURES {
        out.push(format!("• {feature}"));
    }
    out.join("\n")
}

fn notice_json(notice: Option<&Notice>) -> serde_json::Value {
    match notice {
        Some(n) => {
            let level = match n.level {
                NoticeLevel::Success => "success",
                NoticeLevel::Error => "error",
            };
            json!({
            "level": level,
            "title": n.title,
            "message": n.message,
            })
        }
        None => serde_json::Value::Null,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn build_home_json(
    summary: Option<&CarbonSummary>,
    recent: &[CarbonEntry],
    notice: Option<&Notice>,
) -> serde_json::Value {
    json!({
        "screen": "home",
        "summary": summary.map(|s| json!({
            "totalCarbon": s.total_carbon,
            "categoryBreakdown": s.category_breakdown.iter().map(|(c, amount)| json!({
                "category": c.as_str(),
                "amount": amount,
                "color": c.color().hex(),
            })).collect::<Vec<_>>(),
        })),
        "recentEntries": recent,
        "notice": notice_json(notice),
    })
}

pub fn build_notice_json(notice: Option<&Notice>) -> serde_json::Value {
    json!({ "notice": notice_json(notice) })
}

pub fn build_entries_json(entries: &[CarbonEntry], notice: Option<&Notice>) -> serde_json::Value {
    json!({
        "screen": "entries",
        "entries": entries,
        "notice": notice_json(notice),
    })
}

pub fn build_analytics_json(
    months: &[MonthlyBar],
    categories: &[CategoryBar],
    insights: Option<&Insights>,
    notice: Option<&Notice>,
) -> serde_json::Value {
    json!({
        "screen": "analytics",
        "monthly": months.iter().map(|m| json!({
            "month": m.month,
            "carbonAmount": m.amount,
            "widthPercent": m.width_percent,
            "tier": m.tier.as_str(),
            "color": m.tier.color().hex(),
        })).collect::<Vec<_>>(),
        "categories": categories.iter().map(|c| json!({
            "category": c.category.as_str(),
            "carbonAmount": c.amount,
            "percentage": round1(c.percentage),
            "color": c.color().hex(),
        })).collect::<Vec<_>>(),
        "insights": insights.map(|i| json!({
            "totalCarbon": i.total_carbon,
            "monthlyAverage": round1(i.monthly_average),
            "largestCategory": i.largest_category.as_ref().map(|c| c.as_str()).unwrap_or(""),
        })),
        "notice": notice_json(notice),
    })
}

pub fn build_map_json(map: &MapScreen) -> serde_json::Value {
    json!({
        "screen": "map",
        "title": MapScreen::TITLE,
        "description": MapScreen::DESCRIPTION,
        "legend": map.legend().iter().map(|t| json!({
            "tier": t.as_str(),
            "label": t.label(),
            "color": t.color().hex(),
        })).collect::<Vec<_>>(),
        "features": MapScreen::FEATURES,
    })
}

pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
