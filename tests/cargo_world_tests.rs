//! Cargo world scenarios through the public API

use gridlearn::{
    CargoConfig, CargoKind, CargoLayout, CargoWorld, Direction, Environment, Position,
    cargo_world::{LAYER_GOOD, LAYER_ROBOT, LAYER_TIME_LIMITED},
};

fn world_with(config: CargoConfig, layout: CargoLayout) -> CargoWorld {
    let mut world = CargoWorld::new(config).expect("valid config");
    world.reset_with(layout).expect("valid layout");
    world
}

fn layout(robot: Position, time_limited: Position, good: Position) -> CargoLayout {
    CargoLayout {
        robot,
        time_limited,
        goods: vec![good, Position::new(7, 0), Position::new(7, 1)],
        bads: vec![Position::new(6, 6), Position::new(6, 7)],
    }
}

#[test]
fn test_adjacent_good_cargo_collected() {
    let mut world = world_with(
        CargoConfig::default(),
        layout(Position::new(2, 2), Position::new(5, 5), Position::new(3, 2)),
    );

    let step = world.step(Direction::Down);
    assert_eq!(step.reward, 9.0);
    assert!(!world.goods()[0].is_active());
    assert_eq!(step.observation[[LAYER_ROBOT, 3, 2]], 1.0);
    assert_eq!(step.observation[[LAYER_GOOD, 3, 2]], 0.0);
}

#[test]
fn test_wall_bump_at_top_left() {
    let mut world = world_with(
        CargoConfig::default(),
        layout(Position::new(0, 0), Position::new(5, 5), Position::new(3, 3)),
    );

    let step = world.step(Direction::Up);
    assert_eq!(step.reward, -6.0);
    assert_eq!(world.robot(), Position::new(0, 0));
    assert_eq!(world.score(), -6.0);

    let step = world.step(Direction::Left);
    assert_eq!(step.reward, -6.0);
    assert_eq!(world.score(), -12.0);
}

#[test]
fn test_time_limited_expires_before_collection() {
    let config = CargoConfig {
        time_limited_lifetime: 1,
        ..CargoConfig::default()
    };
    let mut world = world_with(
        config,
        layout(Position::new(4, 4), Position::new(4, 5), Position::new(0, 0)),
    );

    // the robot lands on it in the same step it expires
    let step = world.step(Direction::Right);
    assert_eq!(step.reward, -1.0);
    assert!(!world.time_limited().is_active());
    assert_eq!(
        step.observation
            .index_axis(ndarray::Axis(0), LAYER_TIME_LIMITED)
            .sum(),
        0.0
    );

    // stepping off and back on pays nothing either
    assert_eq!(world.step(Direction::Left).reward, -1.0);
    assert_eq!(world.step(Direction::Right).reward, -1.0);
}

#[test]
fn test_time_limited_collected_in_time() {
    let mut world = world_with(
        CargoConfig::default(),
        layout(Position::new(4, 4), Position::new(4, 6), Position::new(0, 0)),
    );

    assert_eq!(world.step(Direction::Right).reward, -1.0);
    assert_eq!(world.step(Direction::Right).reward, 29.0);
    assert!(matches!(
        world.time_limited().kind(),
        CargoKind::TimeLimited {
            lifetime: 20,
            remaining: 18
        }
    ));
}

#[test]
fn test_remaining_lifetime_counts_down_by_one() {
    let mut world = world_with(
        CargoConfig::default(),
        layout(Position::new(0, 0), Position::new(7, 7), Position::new(3, 3)),
    );

    let mut previous = 20;
    for _ in 0..25 {
        world.step(Direction::Up);
        let CargoKind::TimeLimited { remaining, .. } = world.time_limited().kind() else {
            panic!("expected time-limited cargo");
        };
        if previous > 0 {
            assert_eq!(remaining, previous - 1);
        } else {
            assert_eq!(remaining, 0);
        }
        assert_eq!(world.time_limited().is_active(), remaining > 0);
        previous = remaining;
    }
}

#[test]
fn test_bad_cargo_costs() {
    let mut world = world_with(
        CargoConfig::default(),
        layout(Position::new(6, 5), Position::new(0, 7), Position::new(0, 0)),
    );
    assert_eq!(world.step(Direction::Right).reward, -11.0);
    assert!(!world.bads()[0].is_active());
}

#[test]
fn test_episode_ends_at_max_steps_through_port() {
    let config = CargoConfig {
        max_steps: 12,
        ..CargoConfig::default().with_seed(8)
    };
    let mut world = CargoWorld::new(config).unwrap();
    Environment::reset(&mut world);

    let mut steps = 0;
    loop {
        steps += 1;
        let step = Environment::step(&mut world, steps % 4).unwrap();
        assert!(!step.truncated);
        if step.terminated {
            break;
        }
    }
    assert_eq!(steps, 12);
    assert_eq!(world.steps(), 12);
}

#[test]
fn test_reset_restores_everything() {
    let mut world = CargoWorld::new(CargoConfig::default().with_seed(21)).unwrap();
    for direction in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
        world.step(direction);
    }

    let obs = world.reset();
    assert_eq!(world.steps(), 0);
    assert_eq!(world.score(), 0.0);
    assert!(world.goods().iter().all(|c| c.is_active()));
    assert!(world.bads().iter().all(|c| c.is_active()));
    assert!(world.time_limited().is_active());
    assert_eq!(obs.index_axis(ndarray::Axis(0), LAYER_ROBOT).sum(), 1.0);
    assert_eq!(obs.index_axis(ndarray::Axis(0), LAYER_GOOD).sum(), 3.0);
}
