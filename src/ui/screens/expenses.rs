use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let view = &app.view;
    let range_label = app.range.describe(App::today());

    if view.visible.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No expenses for {range_label}"),
                p.dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press 'a' to add one, or change the range with :from / :to / :clear",
                p.dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default()
                    .fg(p.text_dim)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Type", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = view
        .visible
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let amount_style = if expense.kind.is_credit() {
                p.credit_style()
            } else {
                p.debit_style()
            };
            let amount_str = app.currency.entry(expense);

            let style = if i == app.expense_index {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", expense.date.format("%Y-%m-%d"))),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(format!("{} {}", expense.category.icon(), expense.category)),
                Cell::from(expense.kind.as_str()),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(16),
    ];

    let title = format!(
        " Expenses ({}) | {} | total {} ",
        view.visible.len(),
        range_label,
        app.currency.format(view.total)
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.overlay))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(p.text_dim)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
