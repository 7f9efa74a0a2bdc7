use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::{GameState, GameStatus};

const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let geometry = state.geometry();
    let line = info_line(
        state.length(),
        state.current_speed(),
        state.active_food().len(),
        (geometry.cells_x, geometry.cells_y),
        state.status,
        usize::from(status_area.width),
    );

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn info_line(
    length: usize,
    speed: u32,
    food_count: usize,
    grid: (u16, u16),
    status: GameStatus,
    available_width: usize,
) -> Line<'static> {
    let compact = info_width(length, speed, food_count, grid, status, false) > available_width;
    let labels = Labels::new(compact);
    let value = Style::default().fg(Color::White);

    let mut spans = vec![
        Span::raw(format!("{}: ", labels.length)),
        Span::styled(length.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels.speed)),
        Span::styled(speed.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels.food)),
        Span::styled(food_count.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}x{}", grid.0, grid.1)),
    ];

    if status == GameStatus::Paused {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            labels.paused,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

fn info_width(
    length: usize,
    speed: u32,
    food_count: usize,
    grid: (u16, u16),
    status: GameStatus,
    compact: bool,
) -> usize {
    let labels = Labels::new(compact);
    let mut width = format!("{}: {length}", labels.length).width()
        + format!("{}: {speed}", labels.speed).width()
        + format!("{}: {food_count}", labels.food).width()
        + format!("{}x{}", grid.0, grid.1).width()
        + SEPARATOR.width() * 3;

    if status == GameStatus::Paused {
        width += SEPARATOR.width() + labels.paused.width();
    }
    width
}

struct Labels {
    length: &'static str,
    speed: &'static str,
    food: &'static str,
    paused: &'static str,
}

impl Labels {
    fn new(compact: bool) -> Self {
        if compact {
            Self {
                length: "L",
                speed: "S",
                food: "F",
                paused: "‖",
            }
        } else {
            Self {
                length: "Length",
                speed: "Speed",
                food: "Food",
                paused: "PAUSED [P]",
            }
        }
    }
}
