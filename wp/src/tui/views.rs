//! TUI views and rendering
//!
//! Pure rendering over `AppState`: the weekly grid (four day columns on
//! top, three below), the todo and memo panels on the right, and the
//! goal-prompt / help overlays.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{AppState, DAY_ROWS, Focus, InteractionMode, TODO_ROWS};
use crate::domain::dates;
use crate::domain::{DayKey, Task, TaskColor};

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Planner grid
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_planner(state, frame, chunks[1]);
    render_footer(state, frame, chunks[2]);

    // Overlays
    match &state.mode {
        InteractionMode::GoalPrompt(buffer) => render_goal_dialog(state, buffer, frame, chunks[1]),
        InteractionMode::Help => render_help_overlay(frame, chunks[1]),
        _ => {}
    }
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let range = week_range_label(&state.week_id);

    let mut spans = vec![
        Span::styled("Weekplan ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(range, Style::default().fg(Color::Yellow)),
    ];

    if state.generating {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("● generating plan…", Style::default().fg(Color::Magenta)));
    }

    if state.dirty {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("○ unsaved", Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(Block::default().borders(Borders::ALL).title(" Week "));

    frame.render_widget(header, area);
}

/// Render the planner grid: day columns left, todo/memo right
fn render_planner(state: &AppState, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(area);

    render_day_grid(state, frame, columns[0]);
    render_side_panel(state, frame, columns[1]);
}

/// Render the 4 + 3 day grid
fn render_day_grid(state: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    let week = dates::parse_iso(&state.week_id).ok().map(dates::week_dates);

    for day in DayKey::ALL {
        let cell = if day.index() < 4 {
            top[day.index()]
        } else {
            bottom[day.index() - 4]
        };
        render_day_cell(state, day, week.as_ref().map(|w| w[day.index()]), frame, cell);
    }
}

/// Render one day column
fn render_day_cell(state: &AppState, day: DayKey, date: Option<NaiveDate>, frame: &mut Frame, area: Rect) {
    let focused = state.focus == Focus::Day(day);
    let title = match date {
        Some(d) => format!(" {} {} ", day.label(), d.format("%m-%d")),
        None => format!(" {} ", day.label()),
    };

    let day_data = state.data.days.day(day);
    let mut lines: Vec<Line> = Vec::with_capacity(DAY_ROWS + 1);

    for row in 0..DAY_ROWS {
        let task = state.data.day_task(day, row);
        lines.push(task_line(&task, edited_text(state, focused, row), focused && state.row == row));
    }

    // Day note under the task rows
    let note_style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
    let note = match (&state.mode, focused) {
        (InteractionMode::EditNote(buffer), true) => format!("✎ {}█", buffer),
        _ => format!("✎ {}", day_data.note),
    };
    lines.push(Line::from(Span::styled(note, note_style)));

    let block = Block::default().borders(Borders::ALL).title(title).border_style(pane_style(focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the todo list and memo pad
fn render_side_panel(state: &AppState, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // Todo list
    let todo_focused = state.focus == Focus::Todo;
    let mut lines: Vec<Line> = Vec::with_capacity(TODO_ROWS);
    for row in 0..TODO_ROWS {
        let task = state.data.todo_task(row);
        lines.push(task_line(&task, edited_text(state, todo_focused, row), todo_focused && state.row == row));
    }

    let todo_block = Block::default()
        .borders(Borders::ALL)
        .title(" To Do ")
        .border_style(pane_style(todo_focused));
    frame.render_widget(Paragraph::new(lines).block(todo_block), rows[0]);

    // Memo pad
    let memo_focused = state.focus == Focus::Memo;
    let memo = match (&state.mode, memo_focused) {
        (InteractionMode::EditMemo(buffer), true) => format!("{}█", buffer),
        _ => state.data.memo.clone(),
    };

    let memo_block = Block::default()
        .borders(Borders::ALL)
        .title(" Memo ")
        .border_style(pane_style(memo_focused));
    frame.render_widget(Paragraph::new(memo).wrap(Wrap { trim: false }).block(memo_block), rows[1]);
}

/// One checkbox row: color bar, checkbox, text
fn task_line<'a>(task: &Task, edit_override: Option<&'a str>, selected: bool) -> Line<'a> {
    let bar_color = match task.color {
        Some(TaskColor::Red) => Color::Red,
        Some(TaskColor::Blue) => Color::Blue,
        Some(TaskColor::Yellow) => Color::Yellow,
        None => Color::DarkGray,
    };

    let checkbox = if task.done { "[x] " } else { "[ ] " };

    let (text, cursor) = match edit_override {
        Some(buffer) if selected => (buffer.to_string(), "█"),
        _ => (task.text.clone(), ""),
    };

    let mut text_style = Style::default();
    if task.done {
        text_style = text_style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        text_style = text_style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![
        Span::styled("▌", Style::default().fg(bar_color)),
        Span::styled(checkbox, text_style),
        Span::styled(format!("{}{}", text, cursor), text_style),
    ])
}

/// The active edit buffer, when the focused pane is being edited
fn edited_text(state: &AppState, pane_focused: bool, _row: usize) -> Option<&str> {
    match &state.mode {
        InteractionMode::EditTask(buffer) if pane_focused => Some(buffer.as_str()),
        _ => None,
    }
}

/// Render the footer bar: key hints, or the current error/status
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let content = if let Some(error) = &state.error_message {
        Line::from(Span::styled(
            format!(" ✗ {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &state.status_message {
        Line::from(Span::styled(format!(" ✓ {}", status), Style::default().fg(Color::Green)))
    } else {
        Line::from(vec![
            Span::styled(" q", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit "),
            Span::styled(" ?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Help "),
            Span::styled(" ↑↓←→", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Move "),
            Span::styled(" Enter", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Edit "),
            Span::styled(" Space", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Done "),
            Span::styled(" c", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Color "),
            Span::styled(" [ ]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Week "),
            Span::styled(" g", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Smart plan "),
        ])
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render the smart-plan goal dialog
fn render_goal_dialog(state: &AppState, buffer: &str, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from("Describe your goal for this week:"),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(format!("{}█", buffer), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
    ];

    if state.generating {
        lines.push(Line::from(Span::styled(
            "Generating plan…",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(error) = &state.error_message {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter Generate · Esc Close",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Smart Plan ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("q, Ctrl+c  ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
        Line::from(vec![
            Span::styled("?, F1      ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle help"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Planner", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(vec![
            Span::styled("←/→, h/l   ", Style::default().fg(Color::Cyan)),
            Span::raw("Switch pane (days, todo, memo)"),
        ]),
        Line::from(vec![
            Span::styled("↑/↓, j/k   ", Style::default().fg(Color::Cyan)),
            Span::raw("Move between rows"),
        ]),
        Line::from(vec![
            Span::styled("Enter, i   ", Style::default().fg(Color::Cyan)),
            Span::raw("Edit task text / memo"),
        ]),
        Line::from(vec![
            Span::styled("Space      ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle done"),
        ]),
        Line::from(vec![
            Span::styled("c          ", Style::default().fg(Color::Cyan)),
            Span::raw("Cycle color (red, blue, yellow)"),
        ]),
        Line::from(vec![
            Span::styled("o          ", Style::default().fg(Color::Cyan)),
            Span::raw("Edit day note"),
        ]),
        Line::from(vec![
            Span::styled("m          ", Style::default().fg(Color::Cyan)),
            Span::raw("Jump to memo"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Weeks", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(vec![
            Span::styled("[ / ]      ", Style::default().fg(Color::Cyan)),
            Span::raw("Previous / next week"),
        ]),
        Line::from(vec![
            Span::styled("t          ", Style::default().fg(Color::Cyan)),
            Span::raw("Jump to current week"),
        ]),
        Line::from(vec![
            Span::styled("g          ", Style::default().fg(Color::Cyan)),
            Span::raw("Smart plan from a goal"),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Border style for a pane, highlighted when focused
fn pane_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Start..end label for the displayed week
fn week_range_label(week_id: &str) -> String {
    match dates::parse_iso(week_id) {
        Ok(monday) => {
            let dates = dates::week_dates(monday);
            format!("{} ~ {}", dates::iso_date(dates[0]), dates::iso_date(dates[6]))
        }
        Err(_) => week_id.to_string(),
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
