//! Screen rendering

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, Screen};
use crate::views::{FormView, ListView};

const LABEL_WIDTH: usize = 15;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(7), // Logs
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match &mut app.screen {
        Screen::List(view) => render_list(frame, view, chunks[1]),
        Screen::Form(form) => render_form(frame, form, chunks[1]),
    }

    render_logs(frame, chunks[2]);
    render_hints(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Staffdir ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("| "),
        Span::styled(app.route.path(), Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn render_list(frame: &mut Frame, view: &mut ListView, area: Rect) {
    let title = if view.busy {
        " Directory (loading...) "
    } else {
        " Directory "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    // A failed load/delete shows above whatever rows are current
    let (banner, body) = match &view.error {
        Some(_) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            (Some(rows[0]), rows[1])
        }
        None => (None, area),
    };
    if let (Some(banner_area), Some(message)) = (banner, &view.error) {
        frame.render_widget(
            Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
            banner_area,
        );
    }

    let Some(employees) = &view.employees else {
        let placeholder = if view.error.is_some() {
            "Could not reach the directory - press 'r' to retry"
        } else {
            "Loading directory..."
        };
        frame.render_widget(Paragraph::new(placeholder).block(block), body);
        return;
    };

    if employees.is_empty() {
        frame.render_widget(
            Paragraph::new("No employees yet - press 'a' to add one").block(block),
            body,
        );
        return;
    }

    let rows: Vec<Row> = employees
        .iter()
        .map(|e| {
            Row::new(vec![
                e.id.clone().unwrap_or_else(|| "-".into()),
                e.name.clone(),
                e.email.clone(),
                e.job_title.clone(),
                e.phone.clone(),
                e.employee_code.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(14),
        Constraint::Min(22),
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(["Id", "Name", "Email", "Job title", "Phone", "Code"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, body, &mut view.table);
}

fn render_form(frame: &mut Frame, form: &FormView, area: Rect) {
    let title = if form.route_id.is_some() {
        " Edit employee "
    } else {
        " New employee "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if form.is_fatal() {
        let message = form.error.as_deref().unwrap_or("load failed");
        let lines = vec![
            Line::styled(message.to_string(), Style::default().fg(Color::Red)),
            Line::raw(""),
            Line::raw("Esc to return to the list"),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    if !form.loaded {
        frame.render_widget(Paragraph::new("Loading employee...").block(block), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let banner_lines = if let Some(message) = &form.error {
        lines.push(Line::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ));
        lines.push(Line::raw(""));
        2u16
    } else {
        0
    };

    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
            Span::raw(field.value().to_string()),
        ];
        if (field.touched || form.submitted) && !field.errors.is_empty() {
            let messages: Vec<&str> = field.errors.iter().map(|e| e.message()).collect();
            spans.push(Span::styled(
                format!("  ({})", messages.join(", ")),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(spans));
    }

    if form.saving {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Saving...", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);

    // Cursor sits in the focused field's value
    if !form.saving
        && let Some(field) = form.fields.get(form.focus)
    {
        frame.set_cursor_position((
            area.x + 1 + LABEL_WIDTH as u16 + field.input.visual_cursor() as u16,
            area.y + 1 + banner_lines + form.focus as u16,
        ));
    }
}

fn render_logs(frame: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                ),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White));
    frame.render_widget(logs, area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match &app.screen {
        Screen::List(_) => " up/down select | a add | e edit | d delete | r refresh | q quit",
        Screen::Form(_) => " Tab next | Shift-Tab prev | Enter save | Esc back",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}
