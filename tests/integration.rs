use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use serde_json::{Value, json};

use patta_client::net::{GameSync, MessageKind, Move, RecordingTransport, Transport};
use patta_client::{Card, ClientError, GamePhase, Rank, Session, Suit};

fn card(token: &str) -> Card {
	Card::parse(token).unwrap()
}

fn new_session(name: &str) -> Arc<Session> {
	patta_client::logging::set_log_dir(std::env::temp_dir().join("patta-test-logs"));
	Arc::new(Session::new(name))
}

fn snapshot(kind: &str, current: usize, state: &str, moves: Value) -> String {
	json!({
		"type": kind,
		"me": {"index": 0, "name": "Alice", "cards": ["A:H", "7:S", "10:C"]},
		"game": {
			"players": [
				{"index": 1, "name": "Bob"},
				{"index": 0, "name": "Alice"}
			],
			"current_player_id": current,
			"state": state,
			"card_map": [[], [], ["8:S", "8:S"], []],
			"card_count": 48
		},
		"possible_moves": moves
	})
	.to_string()
}

#[test]
fn test_lobby_then_play_connection() {
	let session = new_session("patta-1");

	let lobby = Arc::new(RecordingTransport::new());
	let lobby_sync = GameSync::new(Arc::clone(&session), lobby.clone());
	let (tx, rx) = mpsc::channel();
	tx.send(snapshot("game_update", 1, "NOT STARTED", json!(null))).unwrap();
	tx.send(snapshot("game_start", 0, "STARTED", json!(["7:S"]))).unwrap();

	assert!(lobby_sync.pump_until_started(&rx));
	assert!(lobby.is_closed());
	assert!(matches!(lobby_sync.submit_move(Move::Pass), Err(ClientError::ClosedTransport)));

	let play = Arc::new(RecordingTransport::new());
	let sync = GameSync::new(Arc::clone(&session), play.clone());
	let snapshot_now = session.latest().unwrap();
	let state = &snapshot_now.state;

	assert_eq!(snapshot_now.kind, MessageKind::GameStart);
	assert_eq!(state.phase(), GamePhase::Started);
	assert!(state.is_my_turn());

	let chosen = card("7:S");
	assert!(state.can_attempt_move(&chosen));
	assert!(state.is_playable(&chosen));
	assert_eq!(state.me().index_of(&chosen).unwrap(), 1);
	sync.submit_move(Move::Play(chosen)).unwrap();
	sync.submit_move(Move::Pass).unwrap();

	assert_eq!(
		play.sent(),
		vec![r#"{"message":"7:S"}"#.to_string(), r#"{"message":"pass"}"#.to_string()]
	);
}

#[test]
fn test_reader_sees_turn_change() {
	let session = new_session("patta-2");
	let sync = GameSync::new(Arc::clone(&session), Arc::new(RecordingTransport::new()));
	let mut reader = session.reader();

	sync.on_message(&snapshot("game_update", 0, "STARTED", json!(["A:H"]))).unwrap();
	let first = reader.take_changed().unwrap();
	assert!(first.state.is_my_turn());

	sync.on_message(&snapshot("game_update", 1, "STARTED", json!([]))).unwrap();
	let second = reader.take_changed().unwrap();
	assert!(!second.state.is_my_turn());
	assert_eq!(second.state.current_player().unwrap().name, "Bob");

	// the earlier snapshot is untouched by the replace
	assert!(first.state.is_my_turn());
	assert!(first.state.is_playable(&card("A:H")));
}

#[test]
fn test_malformed_message_keeps_last_good() {
	let session = new_session("patta-3");
	let sync = GameSync::new(Arc::clone(&session), Arc::new(RecordingTransport::new()));
	sync.on_message(&snapshot("game_update", 0, "STARTED", json!(["A:H"]))).unwrap();
	let before = session.latest().unwrap();

	let raw = snapshot("game_update", 1, "ENDED", json!([]));
	let mut broken: Value = serde_json::from_str(&raw).unwrap();
	broken["game"].as_object_mut().unwrap().remove("state");
	let result = sync.on_message(&broken.to_string());

	assert!(matches!(result, Err(ClientError::Decode(_))));
	let after = session.latest().unwrap();
	assert_eq!(*after, *before);
	assert_eq!(after.state.current_player_index(), 0);
	assert_eq!(after.state.phase(), GamePhase::Started);
	assert_eq!(after.state.possible_moves(), &[card("A:H")]);
}

#[test]
fn test_concurrent_writer_and_readers() {
	let session = new_session("patta-4");
	let sync = Arc::new(GameSync::new(Arc::clone(&session), Arc::new(RecordingTransport::new())));

	let writer = {
		let sync = Arc::clone(&sync);
		thread::spawn(move || {
			for i in 0..200 {
				sync.on_message(&snapshot("game_update", i % 2, "STARTED", json!([]))).unwrap();
			}
		})
	};

	let readers: Vec<_> = (0..4)
		.map(|_| {
			let reader = session.reader();
			thread::spawn(move || {
				for _ in 0..200 {
					if let Some(snap) = reader.latest() {
						assert_eq!(snap.state.players().len(), 2);
						assert_eq!(snap.state.me().len(), 3);
						assert!(snap.state.current_player_index() < 2);
					}
				}
			})
		})
		.collect();

	writer.join().unwrap();
	for r in readers {
		r.join().unwrap();
	}

	assert_eq!(session.latest().unwrap().state.current_player_index(), 1);
}

#[test]
fn test_ended_game() {
	let session = new_session("patta-5");
	let sync = GameSync::new(Arc::clone(&session), Arc::new(RecordingTransport::new()));
	sync.on_message(&snapshot("game_update", 1, "ENDED", json!(null))).unwrap();

	let snap = session.latest().unwrap();
	assert!(snap.state.is_ended());
	assert_eq!(snap.state.current_player_index(), 1);
	assert!(snap.state.possible_moves().is_empty());
}

#[test]
fn test_laid_cards_from_card_map() {
	let session = new_session("patta-6");
	let sync = GameSync::new(Arc::clone(&session), Arc::new(RecordingTransport::new()));
	sync.on_message(&snapshot("game_update", 0, "STARTED", json!([]))).unwrap();

	let snap = session.latest().unwrap();
	assert_eq!(snap.state.laid_cards(Suit::Spade), vec![Card::new(Suit::Spade, Rank::Eight)]);
	assert!(snap.state.laid_cards(Suit::Heart).is_empty());
}
