use anyhow::Result;
use common::{Board, Position, TurnSnapshot};
use search::build_turns;
use terminal::player::{TurnPlayer, MAX_PLAY_SPEED, MIN_PLAY_SPEED};

fn food_event(turn: u32) -> String {
    format!(
        r#"{{"who":"7","item":"food","turn":{},"coordinates":{{"x":{},"y":0}}}}"#,
        turn, turn
    )
}

#[test]
fn test_player_walks_reconstructed_turns() -> Result<()> {
    // Turn 2 never appears in the logs
    let payloads: Vec<String> = [3, 0, 1, 4].into_iter().map(food_event).collect();
    let turns = build_turns(Board::default(), &payloads);
    let mut player = TurnPlayer::new(turns);

    assert_eq!(player.turn_count(), 4);
    assert_eq!(player.current().map(|t| t.turn), Some(0));

    player.step_forward(1);
    assert_eq!(player.current().map(|t| t.turn), Some(1));
    player.step_forward(1);
    assert_eq!(player.current().map(|t| t.turn), Some(3));
    assert!(player
        .current()
        .unwrap()
        .food
        .contains(&Position { x: 3, y: 0 }));

    player.step_forward(10);
    assert_eq!(player.current().map(|t| t.turn), Some(4));
    assert!(player.is_at_end());

    player.step_backward(2);
    assert_eq!(player.current().map(|t| t.turn), Some(1));
    player.step_backward(5);
    assert_eq!(player.position(), 0);
    Ok(())
}

#[test]
fn test_playback_stops_at_last_turn() {
    let turns = (0..3).map(|t| TurnSnapshot::new(t, Board::default())).collect();
    let mut player = TurnPlayer::new(turns);

    player.toggle_play();
    assert!(player.is_playing);
    player.step_forward(2);
    assert!(!player.is_playing);

    // Cannot resume from the end
    player.toggle_play();
    assert!(!player.is_playing);

    player.seek(1);
    player.toggle_play();
    assert!(player.is_playing);
    player.seek_to_end();
    assert_eq!(player.position(), 2);
}

#[test]
fn test_speed_is_bounded() {
    let mut player = TurnPlayer::new(Vec::new());
    for _ in 0..10 {
        player.speed_up();
    }
    assert_eq!(player.play_speed, MAX_PLAY_SPEED);
    for _ in 0..10 {
        player.slow_down();
    }
    assert_eq!(player.play_speed, MIN_PLAY_SPEED);
}

#[test]
fn test_empty_replay() {
    let mut player = TurnPlayer::new(Vec::new());
    assert!(player.current().is_none());
    player.step_forward(1);
    player.toggle_play();
    assert!(!player.is_playing);
    assert_eq!(player.position(), 0);
}
