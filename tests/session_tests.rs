//! Session tests - move orchestration, scoring pipeline, status machine

use tetris_service::core::{HoldBehavior, Piece};
use tetris_service::error::GameError;
use tetris_service::session::{GameConfig, GameSession};
use tetris_service::types::{GameStatus, MoveKind, PieceKind, DEFAULT_BOARD_WIDTH};

fn session() -> GameSession {
    GameSession::new(&GameConfig::default(), 42).unwrap()
}

#[test]
fn test_new_session_initial_state() {
    let session = session();
    assert_eq!(session.status, GameStatus::Ongoing);
    assert_eq!(session.score, 0);
    assert_eq!(session.level, 1);
    assert_eq!(session.lines_cleared, 0);
    assert_eq!(session.board.occupied_cells(), 0);
    assert!(session.can_hold);
    assert!(session.held.is_none());
    assert_eq!((session.current.row, session.current.col), (0, 3));
}

#[test]
fn test_config_validation() {
    assert!(GameConfig::default().validate().is_ok());

    let narrow = GameConfig {
        width: 2,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameSession::new(&narrow, 1),
        Err(GameError::InvalidConfig(_))
    ));

    let level_zero = GameConfig {
        start_level: 0,
        ..GameConfig::default()
    };
    assert!(level_zero.validate().is_err());
}

#[test]
fn test_moves_rejected_unless_ongoing() {
    let mut session = session();
    session.set_paused(true).unwrap();

    let err = session
        .apply_move(MoveKind::Left, HoldBehavior::default())
        .unwrap_err();
    assert_eq!(err, GameError::NotOngoing(GameStatus::Paused));

    session.set_paused(false).unwrap();
    session.forfeit().unwrap();
    let err = session
        .apply_move(MoveKind::Left, HoldBehavior::default())
        .unwrap_err();
    assert_eq!(err, GameError::NotOngoing(GameStatus::GameOver));
}

#[test]
fn test_illegal_move_is_reported_not_errored() {
    let mut session = session();
    session.current.col = 0;
    let before = session.clone();

    let report = session
        .apply_move(MoveKind::Left, HoldBehavior::default())
        .unwrap();

    assert!(!report.success);
    assert_eq!(report.message, "cannot move left");
    assert_eq!(session, before, "rejected move leaves the session untouched");
}

#[test]
fn test_hard_drop_clears_line_and_scores_with_bonus() {
    let mut session = session();
    // Bottom row complete except the two columns the O will fill
    for col in 0..DEFAULT_BOARD_WIDTH as i16 {
        if col != 3 && col != 4 {
            session.board.set(19, col, 1);
        }
    }
    session.current = Piece::spawn(PieceKind::O, DEFAULT_BOARD_WIDTH);

    let report = session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();

    assert!(report.success);
    assert!(report.placed);
    assert_eq!(report.cleared_lines.as_slice(), &[19]);
    assert_eq!(report.score_delta, 120, "100 * level + 20 * level bonus");
    assert_eq!(session.score, 120);
    assert_eq!(session.lines_cleared, 1);
    assert_eq!(session.level, 1);
    // Only the O's top half survives the clear, shifted to the bottom row
    assert_eq!(session.board.get(19, 3), Some(4));
    assert_eq!(session.board.get(19, 4), Some(4));
    assert_eq!(session.board.occupied_cells(), 2);
}

#[test]
fn test_soft_drop_scores_without_bonus() {
    let mut session = session();
    for col in 0..DEFAULT_BOARD_WIDTH as i16 {
        if col != 3 && col != 4 {
            session.board.set(19, col, 1);
        }
    }
    session.current = Piece::spawn(PieceKind::O, DEFAULT_BOARD_WIDTH);

    let report = session
        .apply_move(MoveKind::Drop, HoldBehavior::default())
        .unwrap();

    assert_eq!(report.score_delta, 100);
}

#[test]
fn test_placement_without_clear_scores_nothing() {
    let mut session = session();
    let report = session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();

    assert!(report.placed);
    assert!(report.cleared_lines.is_empty());
    assert_eq!(report.score_delta, 0);
    assert_eq!(session.score, 0);
}

#[test]
fn test_level_follows_cleared_lines() {
    let mut session = session();
    session.lines_cleared = 9;
    // The tenth line takes the session to level 2
    for col in 0..DEFAULT_BOARD_WIDTH as i16 {
        if col != 3 && col != 4 {
            session.board.set(19, col, 1);
        }
    }
    session.current = Piece::spawn(PieceKind::O, DEFAULT_BOARD_WIDTH);

    let report = session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();

    // Scored at the pre-clear level
    assert_eq!(report.score_delta, 120);
    assert_eq!(session.lines_cleared, 10);
    assert_eq!(session.level, 2);
}

#[test]
fn test_level_never_drops_below_start_level() {
    let config = GameConfig {
        start_level: 5,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(&config, 7).unwrap();
    assert_eq!(session.level, 5);

    session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();
    assert_eq!(session.level, 5, "placement without clears keeps the level");
}

#[test]
fn test_game_over_when_spawn_is_buried() {
    let mut session = session();
    // Stack everything below row 2, leaving column 0 open in every row so
    // nothing ever clears. The O locks right at the top and buries the
    // spawn area for whatever piece is promoted next.
    for row in 2..20 {
        for col in 1..DEFAULT_BOARD_WIDTH as i16 {
            session.board.set(row, col, 1);
        }
    }
    session.current = Piece::spawn(PieceKind::O, DEFAULT_BOARD_WIDTH);

    let report = session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();

    assert!(report.placed);
    assert!(report.game_over);
    assert_eq!(report.message, "game over");
    assert_eq!(session.status, GameStatus::GameOver);

    let err = session
        .apply_move(MoveKind::Down, HoldBehavior::default())
        .unwrap_err();
    assert_eq!(err, GameError::NotOngoing(GameStatus::GameOver));
}

#[test]
fn test_hold_then_hold_fails_then_rearms_on_placement() {
    let mut session = session();

    let first = session
        .apply_move(MoveKind::Hold, HoldBehavior::default())
        .unwrap();
    assert!(first.success);
    assert!(!session.can_hold);
    assert!(session.held.is_some());

    let second = session
        .apply_move(MoveKind::Hold, HoldBehavior::default())
        .unwrap();
    assert!(!second.success);
    assert_eq!(second.message, "hold already used");

    session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();
    assert!(session.can_hold);

    let third = session
        .apply_move(MoveKind::Hold, HoldBehavior::default())
        .unwrap();
    assert!(third.success);
}

#[test]
fn test_pause_toggle_and_forfeit() {
    let mut session = session();

    session.set_paused(true).unwrap();
    assert_eq!(session.status, GameStatus::Paused);
    session.set_paused(false).unwrap();
    assert_eq!(session.status, GameStatus::Ongoing);

    session.forfeit().unwrap();
    assert_eq!(session.status, GameStatus::GameOver);

    assert_eq!(session.forfeit().unwrap_err(), GameError::AlreadyFinished);
    assert_eq!(
        session.set_paused(true).unwrap_err(),
        GameError::AlreadyFinished
    );
}

#[test]
fn test_session_json_roundtrip_preserves_piece_sequence() {
    let mut session = session();
    session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();

    let json = serde_json::to_string(&session).unwrap();
    let mut restored: GameSession = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);

    // The persisted RNG state keeps both copies drawing the same pieces
    let a = session
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();
    let b = restored
        .apply_move(MoveKind::HardDrop, HoldBehavior::default())
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(session.next, restored.next);
}
