use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::food::FoodKind;
use crate::game::GameState;
use crate::geometry::{Cell, GridGeometry};
use crate::input::Direction;
use crate::snake::TurnKind;
use crate::ui::hud::render_hud;

const GLYPH_FOOD: [&str; 4] = ["✿", "●", "◆", "★"];
const FOOD_COLORS: [Color; 4] = [Color::Magenta, Color::Yellow, Color::Red, Color::Cyan];

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state);

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state);
    render_snake(frame, inner, state);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let geometry = state.geometry();
    let buffer = frame.buffer_mut();

    for food in state.active_food() {
        let Some((x, y)) = logical_to_terminal(inner, geometry, food.cell) else {
            continue;
        };
        let (glyph, color) = food_glyph(food.kind);
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let geometry = state.geometry();
    let length = state.length();
    let tail_heading = state.tail_heading();
    let buffer = frame.buffer_mut();

    for (index, segment) in state.segments().enumerate().skip(1) {
        let Some((x, y)) = logical_to_terminal(inner, geometry, segment.cell()) else {
            continue;
        };

        if index + 1 == length {
            buffer.set_string(
                x,
                y,
                tail_glyph(tail_heading),
                Style::new().fg(Color::DarkGray),
            );
        } else {
            buffer.set_string(
                x,
                y,
                body_glyph(
                    segment.turn(),
                    geometry.direction_between(segment.cell(), segment.next_cell()),
                ),
                Style::new().fg(Color::Green),
            );
        }
    }

    // Head last so it stays on top of a tail sharing its cell.
    if let Some((x, y)) = logical_to_terminal(inner, geometry, state.head_cell()) {
        buffer.set_string(
            x,
            y,
            head_glyph(state.direction()),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    }
}

fn food_glyph(kind: FoodKind) -> (&'static str, Color) {
    let index = kind.0 % GLYPH_FOOD.len();
    (GLYPH_FOOD[index], FOOD_COLORS[index])
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

fn tail_glyph(heading: Option<Direction>) -> &'static str {
    match heading {
        Some(Direction::Left | Direction::Right) => "╌",
        Some(Direction::Up | Direction::Down) => "╎",
        None => "·",
    }
}

/// Straight segments need their axis, which the turn kind alone lacks.
fn body_glyph(turn: TurnKind, heading: Option<Direction>) -> &'static str {
    match turn {
        TurnKind::Straight => match heading {
            Some(Direction::Up | Direction::Down) => "║",
            _ => "═",
        },
        TurnKind::CornerNE => "╚",
        TurnKind::CornerNW => "╝",
        TurnKind::CornerSE => "╔",
        TurnKind::CornerSW => "╗",
    }
}

fn logical_to_terminal(inner: Rect, geometry: GridGeometry, cell: Cell) -> Option<(u16, u16)> {
    if !geometry.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
