use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;

use clap::Parser;

use patta_client::config::{ClientConfig, load_config, load_config_auto};
use patta_client::net::{GameSync, Move, WsTransport};
use patta_client::{ClientError, GameState, Session, SnapshotReader, Suit, logging};

#[derive(Parser)]
#[command(name = "patta-client")]
#[command(about = "Join a Patta game session")]
struct Cli {
	/// Game session name
	session: String,

	#[arg(short, long)]
	config: Option<PathBuf>,

	#[arg(short, long, env = "PATTA_SERVER")]
	server: Option<String>,

	/// Seconds between state polls
	#[arg(short, long)]
	poll: Option<u64>,
}

fn main() {
	if let Err(e) = run(Cli::parse()) {
		eprintln!("error: {}", e);
		std::process::exit(1);
	}
}

fn load(cli: &Cli) -> Result<ClientConfig, ClientError> {
	let mut config = match &cli.config {
		Some(path) => load_config(path)?,
		None => load_config_auto()?,
	};
	if let Some(server) = &cli.server {
		config.server_url = server.clone();
	}
	if let Some(poll) = cli.poll {
		config.poll_interval_secs = poll;
	}
	Ok(config)
}

fn run(cli: Cli) -> Result<(), ClientError> {
	let config = load(&cli)?;
	logging::set_log_dir(config.log_dir.clone());
	logging::set_session(&cli.session);

	let session = Arc::new(Session::new(cli.session));
	let endpoint = config.endpoint(session.name());

	println!("waiting for game to start");
	let (lobby, inbound) = WsTransport::connect(&endpoint)?;
	let lobby = GameSync::new(Arc::clone(&session), Arc::new(lobby));
	if !lobby.pump_until_started(&inbound) {
		return Err(ClientError::Transport(
			"connection closed before the game started".to_string(),
		));
	}

	let (transport, inbound) = WsTransport::connect(&endpoint)?;
	let sync = Arc::new(GameSync::new(Arc::clone(&session), Arc::new(transport)));
	{
		let sync = Arc::clone(&sync);
		thread::spawn(move || {
			sync.pump(&inbound);
		});
	}

	let commands = spawn_stdin_reader();
	let mut reader = session.reader();
	if let Some(snapshot) = reader.latest() {
		render(&snapshot.state);
	}

	loop {
		if let Some(snapshot) = reader.take_changed() {
			render(&snapshot.state);
			if snapshot.state.is_ended() {
				println!("Player {} wins", snapshot.state.current_player_index());
				sync.close();
				return Ok(());
			}
		}

		if sync.is_closed() {
			return Err(ClientError::ClosedTransport);
		}

		match commands.recv_timeout(config.poll_interval()) {
			Ok(line) => handle_command(&sync, &reader, &line),
			Err(RecvTimeoutError::Timeout) => {}
			Err(RecvTimeoutError::Disconnected) => {
				sync.close();
				return Ok(());
			}
		}
	}
}

fn spawn_stdin_reader() -> Receiver<String> {
	let (tx, rx) = mpsc::channel();
	thread::spawn(move || {
		for line in io::stdin().lock().lines() {
			let Ok(line) = line else { break };
			if tx.send(line).is_err() {
				break;
			}
		}
	});
	rx
}

fn handle_command(sync: &GameSync, reader: &SnapshotReader, line: &str) {
	if line.trim().is_empty() {
		return;
	}
	let mv: Move = match line.parse() {
		Ok(mv) => mv,
		Err(e) => {
			println!("{}", e);
			return;
		}
	};
	let Some(snapshot) = reader.latest() else {
		println!("no game state yet");
		return;
	};

	let state = &snapshot.state;
	let allowed = match mv {
		Move::Pass => state.is_my_turn(),
		Move::Play(card) => state.can_attempt_move(&card) && state.is_playable(&card),
	};
	if !allowed {
		println!("invalid move");
		return;
	}

	if let Err(e) = sync.submit_move(mv) {
		eprintln!("could not send {}: {}", mv, e);
	}
}

fn render(state: &GameState) {
	println!();
	println!("== {} ({} cards in play) ==", state.phase().label(), state.card_count());
	for suit in Suit::ALL {
		let laid: Vec<String> = state.laid_cards(suit).iter().map(|c| c.image_name()).collect();
		println!("  {:<9} {}", suit.name(), laid.join(" "));
	}

	let me = state.me();
	let hand: Vec<String> = me
		.cards()
		.iter()
		.map(|c| {
			if state.is_playable(c) {
				format!("[{}]", c)
			} else {
				c.to_string()
			}
		})
		.collect();
	println!("  {}: {}", me.player.name, hand.join(" "));

	match state.current_player() {
		Some(_) if state.is_my_turn() => println!("  your turn: enter a card like 7:H, or 'pass'"),
		Some(player) => println!("  waiting for {}", player.name),
		None => println!("  waiting for player {}", state.current_player_index()),
	}
}
