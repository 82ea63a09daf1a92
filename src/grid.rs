//! Channel/time grid widget.
//!
//! The guide's central view: one row per channel, a 24-hour UTC axis across
//! the columns. Block geometry is derived from program timestamps and the
//! current zoom on every render; nothing is cached between frames.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::geometry;
use crate::models::{Channel, Program};
use crate::theme::{colors, program_color, styles};
use crate::timeutil;

/// Unicode block characters for program bars
const BLOCK_FULL: char = '█';
const BLOCK_LEFT: char = '▌';
const BLOCK_RIGHT: char = '▐';
const NOW_MARKER: char = '│';
const AXIS_TICK: char = '┬';
const AXIS_LINE: char = '─';
const AXIS_NOW: char = '▼';

/// Width of the channel name column, including the color indicator.
pub const CHANNEL_COL_WIDTH: u16 = 18;

const MIN_CELLS_PER_HOUR: u16 = 2;
const MAX_CELLS_PER_HOUR: u16 = 16;
const DEFAULT_CELLS_PER_HOUR: u16 = 4;

/// Grid widget state
#[derive(Debug, Clone)]
pub struct GridState {
    /// Left edge of the viewport, in fractional hours from midnight UTC
    pub scroll_hours: f64,
    /// Zoom level (terminal cells per hour)
    pub cells_per_hour: u16,
    /// Selected channel row
    pub selected_channel: usize,
    /// Cursor within the selected channel's day, if any
    pub selected_program: Option<usize>,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            scroll_hours: 0.0,
            cells_per_hour: DEFAULT_CELLS_PER_HOUR,
            selected_channel: 0,
            selected_program: None,
        }
    }
}

impl GridState {
    /// Scroll left (earlier in the day)
    pub fn scroll_left(&mut self, hours: f64) {
        self.scroll_hours = (self.scroll_hours - hours).max(0.0);
    }

    /// Scroll right (later in the day)
    pub fn scroll_right(&mut self, hours: f64) {
        self.scroll_hours = (self.scroll_hours + hours).min(23.0);
    }

    /// Zoom in (more cells per hour)
    pub fn zoom_in(&mut self) {
        if self.cells_per_hour < MAX_CELLS_PER_HOUR {
            self.cells_per_hour *= 2;
        }
    }

    /// Zoom out (fewer cells per hour)
    pub fn zoom_out(&mut self) {
        if self.cells_per_hour > MIN_CELLS_PER_HOUR {
            self.cells_per_hour /= 2;
        }
    }

    /// Move the channel selection up, wrapping at the top
    pub fn select_previous_channel(&mut self, total: usize) {
        if total == 0 {
            self.selected_channel = 0;
            return;
        }
        self.selected_channel = if self.selected_channel == 0 {
            total - 1
        } else {
            self.selected_channel - 1
        };
        self.selected_program = None;
    }

    /// Move the channel selection down, wrapping at the bottom
    pub fn select_next_channel(&mut self, total: usize) {
        if total == 0 {
            self.selected_channel = 0;
            return;
        }
        self.selected_channel = if self.selected_channel + 1 >= total {
            0
        } else {
            self.selected_channel + 1
        };
        self.selected_program = None;
    }

    /// Convert a fractional hour to a viewport column (can be off-screen)
    pub fn col_for_hour(&self, hour: f64) -> i64 {
        ((hour - self.scroll_hours) * self.cells_per_hour as f64).floor() as i64
    }

    /// Scroll so the given hour sits in the middle of the viewport
    pub fn center_on_hour(&mut self, hour: f64, viewport_cells: u16) {
        let half = self.visible_hours(viewport_cells) / 2.0;
        self.scroll_hours = (hour - half).clamp(0.0, 23.0);
    }

    /// How many hours the viewport spans at the current zoom
    pub fn visible_hours(&self, viewport_cells: u16) -> f64 {
        viewport_cells as f64 / self.cells_per_hour as f64
    }
}

/// A channel's programs for the day being shown, in start order.
///
/// Both the widget and the program cursor walk this list, so the ordering
/// here is the ordering everywhere.
pub fn channel_programs<'a>(programs: &[&'a Program], channel_id: &str) -> Vec<&'a Program> {
    let mut list: Vec<&Program> = programs
        .iter()
        .filter(|p| p.channel_id == channel_id)
        .copied()
        .collect();
    list.sort_by(|a, b| {
        timeutil::utc_fractional_hour(&a.start).total_cmp(&timeutil::utc_fractional_hour(&b.start))
    });
    list
}

/// The channel/time grid
pub struct GuideGrid<'a> {
    channels: &'a [Channel],
    programs: &'a [&'a Program],
    state: &'a GridState,
    /// Current fractional hour, present only when the shown day is today
    now_hour: Option<f64>,
}

impl<'a> GuideGrid<'a> {
    pub fn new(
        channels: &'a [Channel],
        programs: &'a [&'a Program],
        state: &'a GridState,
        now_hour: Option<f64>,
    ) -> Self {
        Self {
            channels,
            programs,
            state,
            now_hour,
        }
    }

    /// Render the hour axis (two rows: labels, then the tick line)
    fn render_hour_axis(&self, area: Rect, buf: &mut Buffer) {
        let cph = self.state.cells_per_hour;
        // Hours between labels so "HH:00" never collides with its neighbor
        let stride = ((5 + cph) / cph).max(1) as u32;

        for col in 0..area.width {
            let pos = (area.x + col, area.y + 1);
            buf[pos].set_char(AXIS_LINE);
            buf[pos].set_style(Style::default().fg(colors::BORDER_DIM));
        }

        for hour in 0..24u32 {
            let col = self.state.col_for_hour(hour as f64);
            if col < 0 || col >= area.width as i64 {
                continue;
            }
            let col = col as u16;

            let tick = (area.x + col, area.y + 1);
            buf[tick].set_char(AXIS_TICK);
            buf[tick].set_style(Style::default().fg(colors::BORDER));

            if hour % stride == 0 {
                let label = format!("{:02}:00", hour);
                if col + label.len() as u16 <= area.width {
                    buf.set_string(area.x + col, area.y, &label, styles::text_dim());
                }
            }
        }

        if let Some(now) = self.now_hour {
            let col = self.state.col_for_hour(now);
            if col >= 0 && col < area.width as i64 {
                let pos = (area.x + col as u16, area.y + 1);
                buf[pos].set_char(AXIS_NOW);
                buf[pos].set_style(
                    Style::default()
                        .fg(colors::NOW_MARKER)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    /// Render one channel row: color indicator, name, then program blocks
    fn render_channel_row(
        &self,
        area: Rect,
        buf: &mut Buffer,
        channel: &Channel,
        channel_index: usize,
        row: u16,
        is_selected: bool,
    ) {
        let color = program_color(channel_index);
        let y = area.y + row;

        let prefix_style = Style::default().fg(if is_selected { colors::YELLOW } else { color });
        buf.set_string(area.x, y, "│", prefix_style);

        let name_width = CHANNEL_COL_WIDTH as usize - 3;
        let name: String = if channel.name.chars().count() > name_width {
            let truncated: String = channel.name.chars().take(name_width - 1).collect();
            format!("{}…", truncated)
        } else {
            format!("{:width$}", channel.name, width = name_width)
        };
        let name_style = if is_selected {
            Style::default()
                .fg(colors::BG_DARK)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::FG_PRIMARY)
        };
        buf.set_string(area.x + 2, y, &name, name_style);

        let bar_x = area.x + CHANNEL_COL_WIDTH;
        let bar_width = area.width.saturating_sub(CHANNEL_COL_WIDTH);
        if bar_width == 0 {
            return;
        }

        let cph = self.state.cells_per_hour as f64;
        for (pidx, program) in channel_programs(self.programs, &channel.id)
            .iter()
            .enumerate()
        {
            let Some(block) = geometry::program_block(&program.start, &program.end, cph) else {
                continue;
            };

            let start_col_raw = (block.offset - self.state.scroll_hours * cph).floor() as i64;
            let len = (block.width.ceil() as i64).max(1);
            let end_col_raw = start_col_raw + len - 1;

            if end_col_raw < 0 || start_col_raw >= bar_width as i64 {
                continue;
            }

            let visible_start = start_col_raw.max(0) as u16;
            let visible_end = end_col_raw.min(bar_width as i64 - 1) as u16;

            let is_cursor = is_selected && self.state.selected_program == Some(pidx);
            let block_color = program_color(channel_index + pidx);

            for col in visible_start..=visible_end {
                let pos = (bar_x + col, y);
                let bar_char = if col as i64 == start_col_raw && len > 1 {
                    BLOCK_LEFT
                } else if col as i64 == end_col_raw && len > 1 {
                    BLOCK_RIGHT
                } else {
                    BLOCK_FULL
                };

                let mut style = Style::default().fg(block_color);
                if is_cursor {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                buf[pos].set_char(bar_char);
                buf[pos].set_style(style);
            }

            // Inline title once the block is wide enough to carry one
            let span = visible_end - visible_start + 1;
            if span >= 5 {
                let text_width = span as usize - 2;
                let title = program.display_title();
                let label: String = if title.chars().count() > text_width {
                    title.chars().take(text_width).collect()
                } else {
                    title.to_string()
                };
                let mut label_style = Style::default().fg(colors::BG_DARK).bg(block_color);
                if is_cursor {
                    label_style = label_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                buf.set_string(bar_x + visible_start + 1, y, &label, label_style);
            }
        }
    }

    /// Render the "now" vertical line over the rows
    fn render_now_line(&self, area: Rect, buf: &mut Buffer) {
        let Some(now) = self.now_hour else {
            return;
        };
        let col = self.state.col_for_hour(now);
        let bar_width = area.width.saturating_sub(CHANNEL_COL_WIDTH);
        if col < 0 || col >= bar_width as i64 {
            return;
        }

        let x = area.x + CHANNEL_COL_WIDTH + col as u16;
        for row in 0..area.height {
            let pos = (x, area.y + row);
            buf[pos].set_char(NOW_MARKER);
            buf[pos].set_style(
                Style::default()
                    .fg(colors::NOW_MARKER)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl Widget for GuideGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" TV Guide ")
            .title_style(
                Style::default()
                    .fg(colors::PURPLE)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(styles::border())
            .style(Style::default().bg(colors::BG_DARK));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < CHANNEL_COL_WIDTH + 8 || inner.height < 4 {
            return; // Too small to render
        }

        let axis_area = Rect::new(
            inner.x + CHANNEL_COL_WIDTH,
            inner.y,
            inner.width.saturating_sub(CHANNEL_COL_WIDTH),
            2,
        );
        self.render_hour_axis(axis_area, buf);

        let rows_area = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );

        // Window the channel rows so the selection stays on screen
        let visible_rows = rows_area.height as usize;
        let total = self.channels.len();
        let window_start = if total <= visible_rows {
            0
        } else {
            self.state
                .selected_channel
                .saturating_sub(visible_rows / 2)
                .min(total - visible_rows)
        };

        for (row, (index, channel)) in self
            .channels
            .iter()
            .enumerate()
            .skip(window_start)
            .take(visible_rows)
            .enumerate()
        {
            let is_selected = self.state.selected_channel == index;
            self.render_channel_row(rows_area, buf, channel, index, row as u16, is_selected);
        }

        self.render_now_line(rows_area, buf);

        // Navigation hints and window position in the bottom border
        let hint_y = area.y + area.height - 1;
        if self.state.scroll_hours > 0.0 {
            buf.set_string(area.x + 1, hint_y, "◀ ←", styles::text_hint());
        }
        if self.state.scroll_hours < 23.0 {
            buf.set_string(area.x + area.width - 4, hint_y, "→ ▶", styles::text_hint());
        }
        if total > visible_rows {
            let position = format!(
                " {}-{}/{} ",
                window_start + 1,
                (window_start + visible_rows).min(total),
                total
            );
            buf.set_string(area.x + 6, hint_y, &position, styles::text_hint());
        }
    }
}
