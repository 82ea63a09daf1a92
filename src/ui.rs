//! UI rendering module.
//!
//! This module handles all the TUI rendering using ratatui,
//! implementing the Kanagawa Dragon aesthetic around the guide grid.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, LogLevel};
use crate::grid::{self, GuideGrid};
use crate::models::Program;
use crate::theme::{colors, styles};
use crate::timeutil;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    // Create main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with category chips
            Constraint::Length(3), // Date tabs
            Constraint::Min(8),    // Main content
            Constraint::Length(7), // Console
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_date_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_console(frame, app, chunks[3]);
    render_status_line(frame, app, chunks[4]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the header bar with the static category chips
fn render_header(frame: &mut Frame, area: Rect) {
    let chips = Line::from(vec![
        Span::styled(" Movies ", styles::chip()),
        Span::raw("  "),
        Span::styled(" Sport ", styles::chip()),
        Span::raw("  "),
        Span::styled(" Regions ", styles::chip()),
    ]);

    let header = Paragraph::new(chips).block(
        Block::default()
            .title(" EPG TV Guide ")
            .title_style(styles::title())
            .borders(Borders::ALL)
            .border_style(styles::border())
            .style(Style::default().bg(colors::BG_MEDIUM)),
    );

    frame.render_widget(header, area);
}

/// Render the week of date tabs
fn render_date_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = app
        .week
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let label = if i == 0 {
                "Today".to_string()
            } else {
                date.format("%a %d").to_string()
            };
            Line::from(Span::styled(format!(" {} ", label), styles::date_tab()))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Schedule ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .select(app.selected_day)
        .style(styles::text())
        .highlight_style(styles::date_selected())
        .divider(Span::styled("|", styles::border_dim()));

    frame.render_widget(tabs, area);
}

/// Render the main content area: loading, error, empty state, or the grid
fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    if app.is_loading {
        render_loading(frame, app, area);
        return;
    }

    if let Some(error) = &app.load_error {
        render_load_error(frame, error, area);
        return;
    }

    let day = app.day_programs();
    if app.channels.is_empty() || day.is_empty() {
        render_empty_state(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(area);

    let guide = GuideGrid::new(&app.channels, &day, &app.grid, app.now_hour());
    frame.render_widget(guide, chunks[0]);

    render_program_details(frame, app, &day, chunks[1]);
}

/// Render the loading state with a spinner
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" TV Guide ")
        .title_style(styles::title())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let spinner = SPINNER_FRAMES[(app.frame_count / 2) as usize % SPINNER_FRAMES.len()];
    let text = Paragraph::new(format!("{} Loading EPG data...", spinner))
        .style(styles::info())
        .alignment(Alignment::Center);

    let y = inner.y + inner.height / 2;
    frame.render_widget(text, Rect::new(inner.x, y, inner.width, 1));
}

/// Render a fatal load error in place of the grid
fn render_load_error(frame: &mut Frame, error: &str, area: Rect) {
    let block = Block::default()
        .title(" TV Guide ")
        .title_style(Style::default().fg(colors::RED).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::RED))
        .style(Style::default().bg(colors::BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "Error loading data:",
            Style::default().fg(colors::RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, styles::text())),
        Line::from(""),
        Line::from(Span::styled(
            "The guide is fetched once at startup. Restart to try again.",
            styles::text_dim(),
        )),
    ];

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    let y = inner.y + (inner.height / 2).saturating_sub(2);
    let height = inner.height.saturating_sub(y - inner.y);
    frame.render_widget(text, Rect::new(inner.x + 2, y, inner.width.saturating_sub(4), height));
}

/// Render the empty state message
fn render_empty_state(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" TV Guide ")
        .title_style(styles::title())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = Paragraph::new("No EPG data available. Check API or selected date.")
        .style(styles::text_dim())
        .alignment(Alignment::Center);

    let y = inner.y + inner.height / 2;
    frame.render_widget(text, Rect::new(inner.x, y, inner.width, 1));
}

/// Render the details panel for the selected channel and program
fn render_program_details(frame: &mut Frame, app: &App, day: &[&Program], area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_MEDIUM));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(channel) = app.channels.get(app.grid.selected_channel) else {
        return;
    };

    let list = grid::channel_programs(day, &channel.id);
    let program = app.grid.selected_program.and_then(|i| list.get(i).copied());

    let lines = match program {
        Some(p) => {
            let start_clock = timeutil::format_clock(timeutil::utc_fractional_hour(&p.start));
            let end_clock = timeutil::format_clock(timeutil::utc_fractional_hour(&p.end));

            let mut lines = vec![
                Line::from(Span::styled(
                    p.display_title(),
                    Style::default()
                        .fg(colors::FG_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(format!("{} - {} UTC", start_clock, end_clock), styles::info()),
                    Span::raw("   "),
                    Span::styled(&channel.name, styles::text_dim()),
                ]),
            ];

            if let Some(description) = &p.description {
                lines.push(Line::from(Span::styled(description, styles::text_dim())));
            }
            if let Some(logo) = &channel.logo_url {
                lines.push(Line::from(Span::styled(
                    format!("logo: {}", logo),
                    styles::text_hint(),
                )));
            }
            lines
        }
        None => vec![
            Line::from(Span::styled(&channel.name, styles::title())),
            Line::from(Span::styled(
                format!("{} programs on this day", list.len()),
                styles::text_dim(),
            )),
            Line::from(Span::styled("h/l to browse programs", styles::text_hint())),
        ],
    };

    let text = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

/// Render the console area
fn render_console(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Info => ("i", colors::BLUE),
                LogLevel::Success => ("+", colors::GREEN),
                LogLevel::Warning => ("!", colors::YELLOW),
                LogLevel::Error => ("x", colors::RED),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", prefix), Style::default().fg(color)),
                Span::styled(&entry.message, styles::text_dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Console ")
            .title_style(Style::default().fg(colors::FG_DIM))
            .borders(Borders::ALL)
            .border_style(styles::border_dim())
            .style(Style::default().bg(colors::BG_DARK)),
    );

    frame.render_widget(list, area);
}

/// Render the one-line status bar
fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_text())
        .style(styles::text_dim())
        .alignment(Alignment::Left);
    frame.render_widget(status, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = 58;
    let popup_height = 23;
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(colors::BLUE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation",
            Style::default().fg(colors::PURPLE).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  j/k or Up/Down  ", Style::default().fg(colors::BLUE)),
            Span::raw("Move between channels"),
        ]),
        Line::from(vec![
            Span::styled("  h/l             ", Style::default().fg(colors::BLUE)),
            Span::raw("Step through a channel's programs"),
        ]),
        Line::from(vec![
            Span::styled("  Left/Right      ", Style::default().fg(colors::BLUE)),
            Span::raw("Scroll one hour (Shift: six hours)"),
        ]),
        Line::from(vec![
            Span::styled("  +/-             ", Style::default().fg(colors::BLUE)),
            Span::raw("Zoom the time axis in/out"),
        ]),
        Line::from(vec![
            Span::styled("  Home            ", Style::default().fg(colors::BLUE)),
            Span::raw("Jump to the start of the day"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Dates",
            Style::default().fg(colors::PURPLE).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  [ / ]           ", Style::default().fg(colors::BLUE)),
            Span::raw("Previous / next day"),
        ]),
        Line::from(vec![
            Span::styled("  1-7             ", Style::default().fg(colors::BLUE)),
            Span::raw("Pick a day of the week directly"),
        ]),
        Line::from(vec![
            Span::styled("  t               ", Style::default().fg(colors::BLUE)),
            Span::raw("Back to today"),
        ]),
        Line::from(vec![
            Span::styled("  c               ", Style::default().fg(colors::BLUE)),
            Span::raw("Center the view on the current time"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "General",
            Style::default().fg(colors::PURPLE).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ?               ", Style::default().fg(colors::BLUE)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("  q/Ctrl+C        ", Style::default().fg(colors::BLUE)),
            Span::raw("Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .style(styles::text());

    frame.render_widget(paragraph, popup_area);
}

/// Helper to create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
