use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	file: Option<std::fs::File>,
	dir: Option<PathBuf>,
	current_date: String,
	session: String,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	file: None,
	dir: None,
	current_date: String::new(),
	session: String::new(),
});

fn ensure_log_file(state: &mut LogState) {
	let date = Local::now().format("%Y-%m-%d").to_string();
	if state.current_date != date || state.file.is_none() {
		let dir = state.dir.clone().unwrap_or_else(|| PathBuf::from("logs"));
		let _ = fs::create_dir_all(&dir);
		let path = dir.join(format!("patta-{}.log", date));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

pub fn set_log_dir(dir: impl Into<PathBuf>) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.dir = Some(dir.into());
		state.file = None;
	}
}

pub fn set_session(name: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.session = name.to_string();
	}
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		ensure_log_file(&mut state);

		let session = if state.session.is_empty() { "-" } else { &state.session };
		let line = format!(
			"[{}][{}][{}:{}] {}\n",
			Local::now().format("%H:%M:%S%.3f"),
			session,
			module,
			log_type,
			message
		);

		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub fn log_verbatim(module: &str, log_type: &str, label: &str, content: &str) {
	let single_line = content.replace('\n', " ").replace('\r', "");
	log(module, log_type, &format!("{}: <<<{}>>>", label, single_line));
}

pub mod sync {
	use super::{log, log_verbatim};

	pub fn received(raw: &str) {
		log_verbatim("Sync", "RECV", "message", raw);
	}

	pub fn applied(kind: &str, current_player: usize, phase: &str) {
		log("Sync", "APPLY", &format!("{} current={} state={}", kind, current_player, phase));
	}

	pub fn decode_failed(err: &str) {
		log("Sync", "DECODE", &format!("kept previous snapshot: {}", err));
	}

	pub fn started() {
		log("Sync", "START", "game_start received, closing lobby connection");
	}

	pub fn move_sent(token: &str) {
		log("Sync", "MOVE", token);
	}

	pub fn move_failed(token: &str, err: &str) {
		log("Sync", "MOVE", &format!("{} failed: {}", token, err));
	}
}

pub mod transport {
	use super::log;

	pub fn opened(endpoint: &str) {
		log("Transport", "OPEN", endpoint);
	}

	pub fn closed(reason: &str) {
		log("Transport", "CLOSE", reason);
	}

	pub fn error(msg: &str) {
		log("Transport", "ERROR", msg);
	}
}
