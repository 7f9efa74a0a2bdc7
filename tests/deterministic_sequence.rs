use toroid_snake::config::GameConfig;
use toroid_snake::events::GameEvent;
use toroid_snake::food::{Food, FoodKind, FoodManager};
use toroid_snake::game::GameState;
use toroid_snake::geometry::{Cell, GridGeometry, WrapMode};
use toroid_snake::input::{Direction, GameInput};
use toroid_snake::snake::Snake;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(config: GameConfig) -> GameState {
    GameState::new_with_seed(&config, 42).expect("test config should be valid")
}

fn park_food(state: &mut GameState, cell: Cell) {
    state.food.set_items(vec![Food::new(cell, FoodKind(0))]);
}

#[test]
fn head_travels_three_cells_in_three_steps() {
    let mut state = seeded(GameConfig {
        cells_x: 24,
        cells_y: 24,
        cell_width: 10,
        cell_height: 10,
        ..GameConfig::default()
    });
    park_food(&mut state, Cell::new(12, 12));

    // Speed 14: fifteen accumulated frames release exactly one step.
    for _ in 0..3 {
        assert!(state.tick(15.0).is_empty());
        assert_eq!(state.length(), 1);
    }

    assert_eq!(state.step_count, 3);
    assert_eq!(state.head_cell(), Cell::new(3, 0));
    assert_eq!(state.head_pixel(), (30, 0));
}

#[test]
fn toroidal_wrap_is_clean_in_both_directions() {
    let geometry = GridGeometry::new(24, 24, 10, 10);

    assert_eq!(
        geometry.advance(Cell::new(23, 7), Direction::Right),
        Cell::new(0, 7)
    );
    assert_eq!(
        geometry.advance(Cell::new(0, 7), Direction::Left),
        Cell::new(23, 7)
    );
    assert_eq!(
        geometry.advance(Cell::new(7, 0), Direction::Up),
        Cell::new(7, 23)
    );
}

#[test]
fn far_edge_wrap_parks_one_past_the_grid() {
    let geometry = GridGeometry::new(24, 24, 10, 10).with_wrap_mode(WrapMode::FarEdge);

    assert_eq!(
        geometry.advance(Cell::new(23, 7), Direction::Right),
        Cell::new(0, 7)
    );
    assert_eq!(
        geometry.advance(Cell::new(0, 7), Direction::Left),
        Cell::new(24, 7)
    );
    assert_eq!(geometry.wrap_pixel(-10, 0), (240, 0));
}

#[test]
fn far_edge_session_parks_then_recovers() {
    let mut state = seeded(GameConfig {
        wrap_mode: WrapMode::FarEdge,
        start: Cell::new(0, 5),
        start_direction: Direction::Left,
        ..GameConfig::default()
    });
    park_food(&mut state, Cell::new(12, 12));

    state.step();
    assert_eq!(state.head_cell(), Cell::new(24, 5));
    assert_eq!(state.head_pixel(), (240, 50));

    state.step();
    assert_eq!(state.head_cell(), Cell::new(23, 5));
}

#[test]
fn respawn_twice_gives_valid_and_usually_different_batches() {
    let mut rng = StdRng::seed_from_u64(5);
    let geometry = GridGeometry::new(24, 24, 10, 10);
    let mut food = FoodManager::new(2);

    let first = food.respawn(&mut rng, &geometry).to_vec();
    let second = food.respawn(&mut rng, &geometry).to_vec();

    assert!((1..=2).contains(&first.len()));
    assert!((1..=2).contains(&second.len()));
    assert_ne!(first, second);
}

#[test]
fn length_six_collision_on_segment_three_leaves_four() {
    let mut state = seeded(GameConfig::default());
    let geometry = state.geometry();
    state.snake = Snake::from_cells(
        vec![
            Cell::new(5, 4),
            Cell::new(4, 4),
            Cell::new(4, 5),
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(7, 5),
        ],
        Direction::Right,
        &geometry,
    );
    park_food(&mut state, Cell::new(20, 20));

    state.apply_input(GameInput::Direction(Direction::Down));
    let events = state.step();

    assert_eq!(state.length(), 4);
    let collisions: Vec<&GameEvent> = events
        .iter()
        .filter(|event| matches!(event, GameEvent::SelfCollision { .. }))
        .collect();
    assert_eq!(collisions, vec![&GameEvent::SelfCollision { truncated: 2 }]);
}

#[test]
fn speed_drops_once_when_growing_from_four_to_eight() {
    let mut state = seeded(GameConfig {
        initial_speed: 14,
        speed_step: 1,
        min_speed: 1,
        ..GameConfig::default()
    });
    let geometry = state.geometry();
    state.snake = Snake::from_cells(
        vec![
            Cell::new(3, 0),
            Cell::new(2, 0),
            Cell::new(1, 0),
            Cell::new(0, 0),
        ],
        Direction::Right,
        &geometry,
    );

    let mut speed_changes = Vec::new();
    while state.length() < 8 {
        let head = state.head_cell();
        park_food(&mut state, head);
        for event in state.step() {
            if let GameEvent::SpeedChanged { speed } = event {
                speed_changes.push((state.length(), speed));
            }
        }
    }

    assert_eq!(speed_changes, vec![(8, 13)]);
    assert_eq!(state.current_speed(), 13);
}

#[test]
fn reversal_request_leaves_direction_unchanged() {
    let mut state = seeded(GameConfig {
        start: Cell::new(10, 10),
        ..GameConfig::default()
    });
    park_food(&mut state, Cell::new(0, 20));

    state.request_direction(Direction::Left);
    state.step();

    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.head_cell(), Cell::new(11, 10));
}

#[test]
fn eating_then_turning_builds_a_corner() {
    let mut state = seeded(GameConfig {
        start: Cell::new(5, 5),
        ..GameConfig::default()
    });

    for _ in 0..2 {
        let head = state.head_cell();
        park_food(&mut state, head);
        state.step();
    }
    park_food(&mut state, Cell::new(20, 20));
    state.request_direction(Direction::Up);
    state.step();

    let cells: Vec<Cell> = state.segments().map(|segment| segment.cell()).collect();
    assert_eq!(
        cells,
        vec![Cell::new(7, 4), Cell::new(7, 5), Cell::new(6, 5)]
    );
    assert_eq!(state.tail_heading(), Some(Direction::Right));
}
