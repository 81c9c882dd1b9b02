use chrono::Datelike;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::filter::DateRange;
use crate::models::parse_date;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Spendboard", cmd_quit, r);
    register_command!("quit", "Quit Spendboard", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("a", "Add an expense", cmd_add, r);
    register_command!("add", "Add an expense", cmd_add, r);
    register_command!("edit", "Edit selected expense", cmd_edit, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "from",
        "Set start date (e.g. :from 2024-01-01, empty to unset)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Set end date (e.g. :to 2024-01-31, empty to unset)",
        cmd_to,
        r
    );
    register_command!(
        "filter",
        "Set date range (e.g. :filter 2024-01-01 2024-01-31)",
        cmd_filter,
        r
    );
    register_command!("clear", "Clear filter (current month)", cmd_clear, r);
    register_command!("month", "Show a month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Show a month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("theme", "Toggle light/dark theme", cmd_theme, r);
    register_command!("reload", "Reload expenses from storage", cmd_reload, r);
    register_command!(
        "export",
        "Export visible expenses to CSV (e.g. :export ~/spend.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.open_add_form();
    Ok(())
}

fn cmd_edit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.open_edit_form();
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.request_delete();
    Ok(())
}

fn cmd_from(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_range(DateRange::new(None, app.range.end));
        return Ok(());
    }
    match parse_date(args) {
        Ok(date) => app.set_range(DateRange::new(Some(date), app.range.end)),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_to(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_range(DateRange::new(app.range.start, None));
        return Ok(());
    }
    match parse_date(args) {
        Ok(date) => app.set_range(DateRange::new(app.range.start, Some(date))),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :filter <from YYYY-MM-DD> <to YYYY-MM-DD>");
        return Ok(());
    }
    match (parse_date(parts[0]), parse_date(parts[1])) {
        (Ok(start), Ok(end)) => {
            app.set_range(DateRange::new(Some(start), Some(end)));
            if start > end {
                app.set_status("Start date is after end date, nothing to show");
            }
        }
        (Err(e), _) | (_, Err(e)) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.set_range(DateRange::default());
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_range(DateRange::default());
        return Ok(());
    }

    // Accept formats like "2024-01", "2024-1", "01", "1"
    let month = if args.len() <= 2 {
        let today = App::today();
        let year = app.range.effective(today).start.unwrap_or(today);
        format!("{}-{args:0>2}", year.format("%Y"))
    } else {
        args.to_string()
    };

    let parsed = chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .ok()
        .and_then(|d| DateRange::month(d.year(), d.month()));
    match parsed {
        Some(range) => app.set_range(range),
        None => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.shift_month(1);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.shift_month(-1);
    Ok(())
}

fn cmd_theme(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.toggle_theme();
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.reload();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let stamp = App::today().format("%Y-%m-%d");
        PathBuf::from(format!("{home}/spendboard-export-{stamp}.csv"))
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    let visible: Vec<&crate::models::Expense> = app.view.visible.iter().collect();
    match crate::export::export_to_path(&path, &visible) {
        Ok(0) => app.set_status("No expenses to export"),
        Ok(count) => app.set_status(format!("Exported {count} expenses to {}", path.display())),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}
