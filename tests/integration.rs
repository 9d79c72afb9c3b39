use glam::Vec3;

use robot_fun_police::assets::{parse_scene, write_scene, AssetError, MeshLibrary, MeshVertex, SceneRecord};
use robot_fun_police::balloon::BalloonState;
use robot_fun_police::input::{InputEvent, Key};
use robot_fun_police::robot::CHAIN;
use robot_fun_police::{FrameOutcome, Game, GameConfig, GameError, GameMode};

// ---------------------------------------------------------------------------
// Helpers: build both asset blobs in memory and load them back
// ---------------------------------------------------------------------------

const BALLOONS: [&str; 5] = ["Balloon1", "Balloon2", "Balloon3", "Balloon4", "Balloon5"];

/// Robot whose tip sits 3 units out along +X at height 2, so turning the
/// base sweeps the tip around a circle of radius 3.
fn robot_records() -> Vec<SceneRecord> {
    vec![
        SceneRecord::new("Stand", Vec3::ZERO),
        SceneRecord::new("Base", Vec3::new(0.0, 0.0, 0.5)),
        SceneRecord::new("Link1", Vec3::new(0.0, 0.0, 1.0)),
        SceneRecord::new("Link2", Vec3::new(0.0, 0.0, 1.5)),
        SceneRecord::new("Link3", Vec3::new(0.0, 0.0, 2.0)),
        SceneRecord::new("Tip", Vec3::new(3.0, 0.0, 2.0)),
    ]
}

fn mesh_blob() -> Vec<u8> {
    let vertex = MeshVertex {
        position: [0.0; 3],
        normal: [0.0, 0.0, 1.0],
        color: [200, 30, 30, 255],
    };
    let mut library = MeshLibrary::new();
    for name in CHAIN.iter().chain(BALLOONS.iter()).chain(["Balloon1-Pop"].iter()) {
        library.insert(*name, &[vertex; 3]).unwrap();
    }
    let mut blob = Vec::new();
    library.write_to(&mut blob).unwrap();
    blob
}

fn load_game(config: &GameConfig, records: &[SceneRecord]) -> Result<Game, GameError> {
    let mut scene_blob = Vec::new();
    write_scene(&mut scene_blob, records)?;

    let meshes = MeshLibrary::from_reader(&mut mesh_blob().as_slice())?;
    let records = parse_scene(&mut scene_blob.as_slice())?;
    Game::from_records(config, &meshes, &records)
}

fn balloon_states(game: &Game) -> Vec<BalloonState> {
    game.balloons().iter().map(|(_, b)| b.state()).collect()
}

// ---------------------------------------------------------------------------
// Healthy balloons drift, untouched
// ---------------------------------------------------------------------------

#[test]
fn untouched_balloons_advance_by_velocity() {
    let mut records = robot_records();
    for (i, name) in BALLOONS.iter().enumerate() {
        records.push(SceneRecord::new(*name, Vec3::new(10.0 + i as f32, 10.0, 1.2)));
    }
    let config = GameConfig::default();
    let mut game = load_game(&config, &records).unwrap();

    let dts = [0.016, 0.033, 0.05, 0.1, 0.1, 0.08, 0.25, 0.016];
    let mut expected_z = 1.2;
    for dt in dts {
        assert_eq!(game.update(dt).unwrap(), FrameOutcome::Running);
        expected_z += config.clamp_step(dt);
    }

    assert_eq!(game.balloons().len(), 5);
    for (i, (_, balloon)) in game.balloons().iter().enumerate() {
        assert_eq!(balloon.state(), BalloonState::Healthy);
        let expected = Vec3::new(10.0 + i as f32, 10.0, expected_z);
        assert!((balloon.center - expected).length() < 1e-4, "{:?}", balloon.center);

        // the scene object follows the balloon
        let object = balloon.object.unwrap();
        let position = game.scene().object(object).unwrap().transform.position;
        assert!((position - balloon.center).length() < 1e-6);
    }
    assert!(!game.is_game_over());
    assert_eq!(game.frame().unwrap().draws.len(), CHAIN.len() + BALLOONS.len());
}

// ---------------------------------------------------------------------------
// Popping every balloon ends the game with the right time
// ---------------------------------------------------------------------------

#[test]
fn popping_every_balloon_finishes_the_game() {
    // Balloons sit still on the tip's circle, one radian apart.
    let mut records = robot_records();
    for (k, name) in BALLOONS.iter().enumerate() {
        let angle = k as f32;
        records.push(SceneRecord::new(*name, Vec3::new(3.0 * angle.cos(), 3.0 * angle.sin(), 2.0)));
    }
    let config = GameConfig {
        balloon_speed: 0.0,
        ..Default::default()
    };
    let mut game = load_game(&config, &records).unwrap();
    let pop_effect = game.balloons().pop_effect().unwrap();
    let dt = 0.0625;
    let mut frames = 0;

    // Tip starts touching the first balloon.
    assert_eq!(game.update(dt).unwrap(), FrameOutcome::Running);
    frames += 1;
    assert_eq!(balloon_states(&game)[0], BalloonState::Popping);
    assert_eq!(balloon_states(&game)[1], BalloonState::Healthy);
    assert!(!game.scene().object(pop_effect).unwrap().invisible);

    // Ten presses of A turn the base one radian onto the next balloon.
    for k in 1..BALLOONS.len() {
        for _ in 0..10 {
            game.handle_event(InputEvent::KeyDown(Key::A));
        }
        assert_eq!(game.update(dt).unwrap(), FrameOutcome::Running);
        frames += 1;
        assert_eq!(balloon_states(&game)[k], BalloonState::Popping);
    }

    // Wait for the last pop to finish.
    while !game.is_game_over() {
        assert_eq!(game.update(dt).unwrap(), FrameOutcome::Running);
        frames += 1;
        assert!(frames < 100);
    }
    assert!(balloon_states(&game).iter().all(|s| *s == BalloonState::Gone));
    assert!(game.scene().object(pop_effect).unwrap().invisible);

    // Last balloon popped on frame 5 and needs 17 frames of 1/16 s to pass 1 s.
    assert_eq!(frames, 21);
    let end_time = game.total_time();
    assert!((end_time - 21.0 * dt).abs() < 1e-5);

    // Grace delay, then the recorded time is reported.
    let mut grace_frames = 0;
    let total_time = loop {
        match game.update(dt).unwrap() {
            FrameOutcome::Running => grace_frames += 1,
            FrameOutcome::Finished { total_time } => break total_time,
            FrameOutcome::Quit => panic!("unexpected quit"),
        }
        assert!(grace_frames < 100);
    };
    assert_eq!(grace_frames, 32);
    assert!((total_time - end_time).abs() < 1e-6);

    // Only the robot is left to draw.
    assert_eq!(game.frame().unwrap().draws.len(), CHAIN.len());
}

// ---------------------------------------------------------------------------
// Endless mode keeps a population alive
// ---------------------------------------------------------------------------

#[test]
fn endless_mode_spawns_balloons() {
    let config = GameConfig {
        mode: GameMode::Endless,
        kinematic: true,
        ..Default::default()
    };
    let mut game = load_game(&config, &robot_records()).unwrap();
    assert!(game.balloons().is_empty());

    for _ in 0..30 {
        assert_eq!(game.update(0.05).unwrap(), FrameOutcome::Running);
    }
    assert_eq!(game.balloons().active_count(), config.min_active);
    assert!(game
        .balloons()
        .iter()
        .all(|(_, b)| b.state() == BalloonState::Healthy && b.center.z > 1.0));
    assert!(!game.is_game_over());
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

#[test]
fn scene_record_past_string_table_fails() {
    let mut blob = Vec::new();
    write_scene(&mut blob, &robot_records()).unwrap();
    // Stretch the first record's name_end past the 27-byte string table.
    let first_record = 8 + 27 + 8;
    blob[first_record + 4..first_record + 8].copy_from_slice(&100u32.to_le_bytes());

    let err = parse_scene(&mut blob.as_slice()).unwrap_err();
    assert!(matches!(err, AssetError::NameOutOfRange { index: 0, .. }));
}

#[test]
fn unknown_mesh_fails_load() {
    let mut records = robot_records();
    records.push(SceneRecord::new("Teapot", Vec3::ZERO));
    let err = load_game(&GameConfig::default(), &records).err().unwrap();
    assert!(err.to_string().contains("Teapot"), "{err}");
}

#[test]
fn quit_key_stops_the_game() {
    let mut game = load_game(&GameConfig::default(), &robot_records()).unwrap();
    assert_eq!(game.update(0.016).unwrap(), FrameOutcome::Running);
    game.handle_event(InputEvent::KeyDown(Key::Q));
    assert_eq!(game.update(0.016).unwrap(), FrameOutcome::Quit);
}
