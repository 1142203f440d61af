//! Go Text Protocol (GTP) front end.
//!
//! Drives a [`Replay`] from a GTP stream so the rules engine, the Zobrist keys
//! and the opening book can be exercised from a Go GUI or a test script.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Only the loaded table's size is accepted
//! - `clear_board`, `komi <value>`
//! - `play <color> <vertex>` - Vertex may be `pass`
//! - `undo`
//! - `genmove <color>` - First legal book forecast, else pass
//! - `showboard`
//! - `zobrist_key` - Current position key in hex
//! - `book_forecasts` - Book continuations for the current position
//! - `ladder_capture <color> <vertex>` - Is this a failed ladder attack?
//! - `ladder_escape <color> <vertex>` - Is this a failed ladder escape?
//!
//! ## Example
//!
//! ```ignore
//! use goban_rust::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::{debug, info};

use crate::board::{Stone, StoneColor, format_vertex, parse_vertex};
use crate::book::OpeningBook;
use crate::constants::MAX_GTP_BOARD_SIZE;
use crate::ladder::{is_ladder_capture_fail, is_ladder_escape_fail};
use crate::replay::{GameEvent, Replay};
use crate::zobrist::ZobristTable;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "book_forecasts",
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "komi",
    "ladder_capture",
    "ladder_escape",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
    "zobrist_key",
];

/// True if GTP vertices can address every point of a `size` board.
pub fn supports_board_size(size: usize) -> bool {
    (2..=MAX_GTP_BOARD_SIZE).contains(&size)
}

/// GTP engine state.
pub struct GtpEngine {
    replay: Replay,
    book: Option<Arc<OpeningBook>>,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Engine on the default 19x19 table without a book.
    pub fn new() -> Self {
        Self::with_table(Arc::new(ZobristTable::default()), None)
    }

    pub fn with_table(table: Arc<ZobristTable>, book: Option<Arc<OpeningBook>>) -> Self {
        Self {
            replay: Replay::new(table),
            book,
        }
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.replay.set_komi(komi);
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over any line source and sink.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!(size = self.replay.board_size(), "gtp session started");
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "gtp command");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_stone(&self, args: &[&str]) -> Result<Stone, String> {
        let [color, vertex, ..] = args else {
            return Err("missing arguments".to_string());
        };
        let color = StoneColor::parse(color).ok_or("invalid color")?;
        let coord = parse_vertex(vertex, self.replay.board_size()).ok_or("invalid vertex")?;
        Ok(Stone { coord, color })
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                None => (false, "missing argument".to_string()),
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
            },

            "quit" => (true, String::new()),

            "boardsize" => {
                let size = self.replay.board_size();
                match args.first().map(|a| a.parse::<usize>()) {
                    None => (false, "missing argument".to_string()),
                    Some(Ok(n)) if n == size => {
                        self.replay.reset();
                        (true, String::new())
                    }
                    Some(Ok(n)) => (
                        false,
                        format!("unacceptable size, only {size} is supported (got {n})"),
                    ),
                    Some(Err(_)) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.replay.reset();
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f32>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(komi)) => {
                    self.replay.set_komi(komi);
                    (true, String::new())
                }
                Some(Err(_)) => (false, "invalid komi".to_string()),
            },

            "play" => {
                if args.len() >= 2 && args[1].eq_ignore_ascii_case("pass") {
                    return match StoneColor::parse(args[0]) {
                        Some(color) => {
                            self.replay.apply(GameEvent::Pass(color));
                            (true, String::new())
                        }
                        None => (false, "invalid color".to_string()),
                    };
                }
                match self.parse_stone(args) {
                    Err(msg) => (false, msg),
                    Ok(stone) if self.replay.apply(GameEvent::Place(stone)) => {
                        (true, String::new())
                    }
                    Ok(_) => (false, "illegal move".to_string()),
                }
            }

            "undo" => match self.replay.undo() {
                Some(_) => (true, String::new()),
                None => (false, "cannot undo".to_string()),
            },

            "genmove" => {
                let Some(color) = args.first().and_then(|a| StoneColor::parse(a)) else {
                    return (false, "invalid color".to_string());
                };
                self.genmove(color)
            }

            "showboard" => (true, format!("\n{}", self.replay.position())),

            "zobrist_key" => (true, format!("{:016x}", self.replay.key())),

            "book_forecasts" => {
                let size = self.replay.board_size();
                let lines: Vec<String> = self
                    .book
                    .as_deref()
                    .and_then(|book| self.replay.forecasts(book))
                    .map(|(_, forecasts)| {
                        forecasts
                            .iter()
                            .map(|f| {
                                let first = f.info.lines().next().unwrap_or_default();
                                format!("{} {first}", format_vertex(f.coord(size), size))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                (true, lines.join("\n"))
            }

            "ladder_capture" => match self.parse_stone(args) {
                Ok(stone) => {
                    let failed = is_ladder_capture_fail(self.replay.position(), stone);
                    (true, failed.to_string())
                }
                Err(msg) => (false, msg),
            },

            "ladder_escape" => match self.parse_stone(args) {
                Ok(stone) => {
                    let failed = is_ladder_escape_fail(self.replay.position(), stone);
                    (true, failed.to_string())
                }
                Err(msg) => (false, msg),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Play the first book forecast that is legal here, or pass.
    fn genmove(&mut self, color: StoneColor) -> (bool, String) {
        let size = self.replay.board_size();
        let candidates = self
            .book
            .as_deref()
            .and_then(|book| self.replay.forecasts(book))
            .map(|(_, forecasts)| forecasts)
            .unwrap_or_default();

        for forecast in candidates {
            let stone = Stone {
                coord: forecast.coord(size),
                color,
            };
            if self.replay.apply(GameEvent::Place(stone)) {
                debug!(at = %stone.coord, "book move");
                return (true, format_vertex(stone.coord, size));
            }
        }

        self.replay.apply(GameEvent::Pass(color));
        (true, "pass".to_string())
    }
}
