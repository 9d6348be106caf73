use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::debug;

use green_ledger::cli::{Args, Command};
use green_ledger::client::CarbonClient;
use green_ledger::config;
use green_ledger::display::{
    DisplayOptions, build_analytics_json, build_entries_json, build_home_json, build_map_json,
    build_notice_json, print_json, render_analytics, render_entries, render_home, render_map,
    render_notice,
};
use green_ledger::screens::{AnalyticsScreen, EntriesScreen, HomeScreen, MapScreen, Notice};
use green_ledger::utils::init_logging;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.debug);

    let cfg = config::load(&args).context("load configuration")?;
    debug!(api_url = %cfg.api_url, timeout = ?cfg.timeout, "configuration resolved");
    let client = CarbonClient::new(&cfg.api_url, cfg.timeout);
    let opts = DisplayOptions::from_args(&args);

    let ok = match args.command() {
        Command::Home => {
            let screen = HomeScreen::mount(&client, &cfg.api_url);
            show_home(&args, &screen, opts)?
        }
        Command::Add(add) => {
            let mut screen = HomeScreen::new(&client, &cfg.api_url);
            screen.open_form();
            screen.form = add.to_form();
            match screen.submit_entry() {
                Ok(_) => show_home(&args, &screen, opts)?,
                Err(_) => report_failure(&args, screen.notice(), opts)?,
            }
        }
        Command::Update(update) => {
            let mut screen = HomeScreen::new(&client, &cfg.api_url);
            match screen.update_entry(update.id, &update.to_form()) {
                Ok(_) => show_home(&args, &screen, opts)?,
                Err(_) => report_failure(&args, screen.notice(), opts)?,
            }
        }
        Command::Delete { id } => {
            let mut screen = HomeScreen::new(&client, &cfg.api_url);
            match screen.delete_entry(id) {
                Ok(()) => show_home(&args, &screen, opts)?,
                Err(_) => report_failure(&args, screen.notice(), opts)?,
            }
        }
        Command::Entries => {
            let mut screen = EntriesScreen::new(&client);
            let loaded = screen.load_all().is_loaded();
            show_entries(&args, &screen, opts)? && loaded
        }
        Command::Show { id } => {
            let mut screen = EntriesScreen::new(&client);
            let loaded = screen.load_one(id).is_loaded();
            show_entries(&args, &screen, opts)? && loaded
        }
        Command::Analytics => {
            let screen = AnalyticsScreen::mount(&client);
            let months = screen.monthly_bars();
            let categories = screen.category_bars();
            let insights = screen.insights();
            if args.json {
                print_json(&build_analytics_json(
                    &months,
                    &categories,
                    insights.as_ref(),
                    screen.notice(),
                ))?;
            } else {
                println!("{}", render_analytics(&months, &categories, insights.as_ref(), opts));
                print_notice(screen.notice(), opts);
            }
            screen.notice().is_none()
        }
        Command::Map => {
            let map = MapScreen;
            if args.json {
                print_json(&build_map_json(&map))?;
            } else {
                println!("{}", render_map(&map, opts));
            }
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Returns false when the screen ended on an error notice.
fn show_home(
    args: &Args,
    screen: &HomeScreen<'_, CarbonClient>,
    opts: DisplayOptions,
) -> Result<bool> {
    if args.json {
        print_json(&build_home_json(screen.summary(), screen.recent_entries(), screen.notice()))?;
    } else {
        println!("{}", render_home(screen.summary(), screen.recent_entries(), opts));
        print_notice(screen.notice(), opts);
    }
    Ok(!is_error(screen.notice()))
}

fn show_entries(
    args: &Args,
    screen: &EntriesScreen<'_, CarbonClient>,
    opts: DisplayOptions,
) -> Result<bool> {
    if args.json {
        print_json(&build_entries_json(screen.entries(), screen.notice()))?;
    } else {
        println!("{}", render_entries(screen.entries(), opts));
        print_notice(screen.notice(), opts);
    }
    Ok(!is_error(screen.notice()))
}

/// A flow stopped before anything was reloaded: only the notice is shown.
fn report_failure(args: &Args, notice: Option<&Notice>, opts: DisplayOptions) -> Result<bool> {
    if args.json {
        print_json(&build_notice_json(notice))?;
    } else {
        print_notice(notice, opts);
    }
    Ok(false)
}

fn print_notice(notice: Option<&Notice>, opts: DisplayOptions) {
    match notice {
        Some(n) if n.is_error() => eprintln!("{}", render_notice(n, opts)),
        Some(n) => println!("{}", render_notice(n, opts)),
        None => {}
    }
}

fn is_error(notice: Option<&Notice>) -> bool {
    notice.is_some_and(Notice::is_error)
}
