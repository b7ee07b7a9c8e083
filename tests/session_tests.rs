//! Session tests against the on-disk store

use std::fs;

use daily_puzzles::core::{Clock, FixedClock, GameAction, GameState, PackingAction, PieceId, SlidingAction};
use daily_puzzles::store::{FsStore, SessionStore};
use daily_puzzles::types::GameMode;
use daily_puzzles::Session;
use tempfile::TempDir;
use time::macros::date;

fn clock() -> FixedClock {
    FixedClock::at_date(date!(2025 - 10 - 16))
}

fn session_in(dir: &TempDir, mode: GameMode) -> Session<FixedClock, FsStore> {
    Session::start(mode, clock(), Some(SessionStore::new(FsStore::new(dir.path()))))
}

fn slide_once(session: &mut Session<FixedClock, FsStore>) {
    let tile = session.state().as_sliding().unwrap().movable_tiles()[0];
    assert!(session.apply(SlidingAction::Tap(tile).into()).unwrap());
}

#[test]
fn test_progress_written_under_storage_key() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, GameMode::Daily15);
    slide_once(&mut session);

    let path = dir.path().join("daily15_20251016.json");
    let json: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
    assert_eq!(json["kind"], "sliding");
    assert_eq!(json["state"]["moves"], 1);
    assert_eq!(json["state"]["isComplete"], false);
}

#[test]
fn test_resume_from_disk() {
    let dir = TempDir::new().unwrap();
    let mut first = session_in(&dir, GameMode::Daily15);
    slide_once(&mut first);
    slide_once(&mut first);

    let second = session_in(&dir, GameMode::Daily15);
    assert!(second.restored());
    assert_eq!(second.state(), first.state());
}

#[test]
fn test_other_day_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let mut today = session_in(&dir, GameMode::Daily15);
    slide_once(&mut today);

    let tomorrow = Session::start(
        GameMode::Daily15,
        FixedClock::at_date(date!(2025 - 10 - 17)),
        Some(SessionStore::new(FsStore::new(dir.path()))),
    );
    assert!(!tomorrow.restored());
    assert_eq!(tomorrow.seed(), 20251017);
    assert_eq!(tomorrow.state().moves(), 0);
}

#[test]
fn test_garbage_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("daily15_20251016.json"), b"not json").unwrap();

    let session = session_in(&dir, GameMode::Daily15);
    assert!(!session.restored());
    assert_eq!(session.state(), &GameState::new(GameMode::Daily15, 20251016));
}

#[test]
fn test_blitz_and_block_logic_leave_no_files() {
    let dir = TempDir::new().unwrap();

    let mut blitz = session_in(&dir, GameMode::QuickBlitz);
    slide_once(&mut blitz);

    let mut block = session_in(&dir, GameMode::BlockLogic);
    let action: GameAction = PackingAction::SelectPiece(PieceId(0)).into();
    assert!(block.apply(action).unwrap());
    assert!(block.reset().unwrap());

    assert_eq!(fs::read_dir(dir.path()).map(|entries| entries.count()).unwrap_or(0), 0);
}

#[test]
fn test_packing_session_uses_clock() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir, GameMode::BlockLogic);
    let puzzle = session.state().as_packing().unwrap().clone();
    let at = puzzle.board().first_empty().unwrap();

    session.apply(PackingAction::SelectPiece(PieceId(0)).into()).unwrap();
    session.clock_mut().advance_millis(1_500);
    assert!(session.apply(PackingAction::TapCell(at).into()).unwrap());

    let after = session.state().as_packing().unwrap();
    assert_eq!(after.moves(), 1);
    assert_eq!(after.start_time(), Some(clock().timestamp_millis() + 1_500));
    assert_eq!(after.board().get(at).and_then(|cell| cell.piece()), Some(PieceId(0)));
}
