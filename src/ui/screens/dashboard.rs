use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::chart::{Projection, Series};
use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Spending over time
            Constraint::Length(9), // Category bars
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_line_chart(f, chunks[1], app);
    render_category_chart(f, chunks[2], app);
}

fn titled_block<'a>(title: &str, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.overlay))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(p.text_dim)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let view = &app.view;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let debit_count = view.visible.iter().filter(|e| !e.kind.is_credit()).count();
    let credit_count = view.visible.len() - debit_count;

    render_card(
        f,
        cards[0],
        "Total",
        app.currency.format(view.total),
        p.accent,
        String::new(),
        &p,
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        view.visible.len().to_string(),
        p.text,
        app.range.describe(App::today()),
        &p,
    );
    render_card(
        f,
        cards[2],
        "Debit",
        app.currency.format(view.debit_total),
        p.red,
        format!("{debit_count} entries"),
        &p,
    );
    render_card(
        f,
        cards[3],
        "Credit",
        app.currency.format(view.credit_total),
        p.green,
        format!("{credit_count} entries"),
        &p,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
    p: &Palette,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(truncate(&subtitle, inner_width), p.dim_style())),
    ])
    .centered()
    .block(titled_block(title, p));

    f.render_widget(text, area);
}

fn render_no_data(f: &mut Frame, area: Rect, title: &str, p: &Palette) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No data to visualize", p.dim_style())),
        Line::from(Span::styled(
            "Add an expense with 'a' or widen the range with :from / :to",
            p.dim_style(),
        )),
    ])
    .centered()
    .block(titled_block(title, p));
    f.render_widget(msg, area);
}

fn render_line_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let series = match &app.view.projection {
        Projection::NoData => {
            render_no_data(f, area, "Spending Over Time", &p);
            return;
        }
        Projection::Series(series) => series,
    };

    let points = series.points();
    let dataset = Dataset::default()
        .name("Amount")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(p.accent))
        .data(&points);

    let x_max = (series.len().saturating_sub(1)).max(1) as f64;
    let y_max = series.max_amount().to_f64().unwrap_or(0.0).max(1.0) * 1.1;

    let chart = Chart::new(vec![dataset])
        .block(titled_block("Spending Over Time", &p))
        .x_axis(
            Axis::default()
                .style(p.dim_style())
                .bounds([0.0, x_max])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .style(p.dim_style())
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw(app.currency.format(Decimal::ZERO)),
                    Span::raw(app.currency.format(series.max_amount())),
                ]),
        );

    f.render_widget(chart, area);
}

/// First, middle and last label so the axis stays readable.
fn x_labels(series: &Series) -> Vec<Span<'static>> {
    let labels: Vec<&str> = series.iter().map(|(label, _)| label).collect();
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.iter().map(|l| Span::raw(l.to_string())).collect(),
        n => vec![
            Span::raw(labels[0].to_string()),
            Span::raw(labels[n / 2].to_string()),
            Span::raw(labels[n - 1].to_string()),
        ],
    }
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    if app.view.by_category.is_empty() {
        render_no_data(f, area, "By Category", &p);
        return;
    }

    let bars: Vec<Bar> = app
        .view
        .by_category
        .iter()
        .map(|(category, amt)| {
            let val = amt.abs().to_u64().unwrap_or(0);
            let label = truncate(&format!("{} {}", category.icon(), category), 12);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .text_value(app.currency.format(*amt))
                .style(Style::default().fg(p.accent))
                .value_style(
                    Style::default()
                        .fg(p.header_bg)
                        .bg(p.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block("By Category", &p))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent))
        .value_style(Style::default().fg(p.text));

    f.render_widget(chart, area);
}
