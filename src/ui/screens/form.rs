use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::app::{App, FormField, FormState};

const LABEL_WIDTH: usize = 20;

/// Add/edit form drawn as a centered popup over the current screen.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &FormState) {
    let p = app.palette();
    let current = state.current_field();

    let mut lines = vec![Line::from("")];
    for field in FormField::all() {
        let focused = *field == current;
        let marker = if focused { "> " } else { "  " };
        let value = state.value(*field);
        let shown = if field.is_choice() {
            format!("< {value} >")
        } else if focused {
            format!("{value}_")
        } else {
            value.to_string()
        };

        let label_style = if focused {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            p.dim_style()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
            Span::styled(shown, p.normal_style()),
        ]));
    }

    lines.push(Line::from(""));
    match &state.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("  {err}"),
            Style::default().fg(p.red).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        "  Tab/Up/Down field | Left/Right choose | Enter save | Esc cancel",
        p.dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_width = 64.min(area.width);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .title(Span::styled(
                state.title(),
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(form, popup_area);
}
