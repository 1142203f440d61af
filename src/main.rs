//! goban-rust command line.
//!
//! ## Usage
//!
//! - `goban-rust` - Show a demo
//! - `goban-rust gtp [--zobrist FILE] [--book FILE]` - Start a GTP session
//! - `goban-rust gen-zobrist --out FILE` - Write a fresh Zobrist table
//! - `goban-rust book-info FILE` - Summarize an opening book
//! - `goban-rust demo` - Play a short ladder and print keys
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use goban_rust::board::{Coord, Stone, StoneColor, format_vertex};
use goban_rust::book::OpeningBook;
use goban_rust::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, DEFAULT_ZOBRIST_SEED, MAX_LADDER_ATTEMPT,
};
use goban_rust::format::{
    load_opening_book, load_opening_book_or_default, load_zobrist_table_or_default,
    save_zobrist_table,
};
use goban_rust::gtp::{GtpEngine, supports_board_size};
use goban_rust::ladder::{capture_succeeds, is_ladder_escape_fail};
use goban_rust::replay::{GameEvent, Replay};
use goban_rust::zobrist::ZobristTable;

/// goban-rust: Go position engine with ladder reading and an opening book
#[derive(Parser)]
#[command(name = "goban-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a GTP (Go Text Protocol) session on stdin/stdout
    Gtp {
        /// Zobrist table file; a seeded table is generated when absent
        #[arg(long)]
        zobrist: Option<PathBuf>,
        /// Opening book file
        #[arg(long)]
        book: Option<PathBuf>,
        /// Board size used when no table file is given
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, default_value_t = DEFAULT_KOMI)]
        komi: f32,
    },
    /// Generate a Zobrist table and write it to a file
    GenZobrist {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, default_value_t = DEFAULT_ZOBRIST_SEED)]
        seed: u64,
    },
    /// Print a summary of an opening book file
    BookInfo {
        path: PathBuf,
        /// Number of entries to list
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("goban_rust=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp {
            zobrist,
            book,
            size,
            komi,
        }) => run_gtp(zobrist.as_deref(), book.as_deref(), size, komi),
        Some(Commands::GenZobrist { out, size, seed }) => {
            if size < 2 || size > usize::from(u8::MAX) {
                bail!("board size {size} is out of range");
            }
            let table = ZobristTable::generate(size, seed);
            save_zobrist_table(&out, &table)
                .with_context(|| format!("writing {}", out.display()))?;
            Ok(())
        }
        Some(Commands::BookInfo { path, limit }) => run_book_info(&path, limit),
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn run_gtp(zobrist: Option<&Path>, book: Option<&Path>, size: usize, komi: f32) -> Result<()> {
    if !supports_board_size(size) {
        bail!("board size {size} is out of range for GTP");
    }
    let table = match zobrist {
        Some(path) => load_zobrist_table_or_default(path, size),
        None => ZobristTable::generate(size, DEFAULT_ZOBRIST_SEED),
    };
    if !supports_board_size(table.size()) {
        bail!("zobrist table is for a {0}x{0} board, too large for GTP", table.size());
    }
    // Book positions must line up with the table's board.
    let book = book
        .map(|path| load_opening_book_or_default(path, table.size() as u8))
        .filter(|book| {
            let matches = usize::from(book.board_size()) == table.size();
            if !matches {
                warn!(
                    book = book.board_size(),
                    table = table.size(),
                    "ignoring opening book for another board size"
                );
            }
            matches
        });
    info!(
        size = table.size(),
        book_entries = book.as_ref().map_or(0, OpeningBook::size),
        "starting gtp"
    );

    let mut engine = GtpEngine::with_table(Arc::new(table), book.map(Arc::new));
    engine.set_komi(komi);
    engine.run()?;
    Ok(())
}

fn run_book_info(path: &Path, limit: usize) -> Result<()> {
    let book: OpeningBook = load_opening_book(path)
        .with_context(|| format!("reading {}", path.display()))?
        .with_context(|| format!("{} is not an opening book", path.display()))?;

    let size = usize::from(book.board_size());
    println!("board size: {size}");
    println!("positions:  {}", book.size());
    for (hash, forecasts) in book.iter().take(limit) {
        let moves: Vec<String> = forecasts
            .iter()
            .map(|f| format_vertex(f.coord(size), size))
            .collect();
        println!("{hash:016x}  {}", moves.join(" "));
    }
    Ok(())
}

fn run_demo() {
    println!("goban-rust: Go position engine\n");

    let table = Arc::new(ZobristTable::generate(9, DEFAULT_ZOBRIST_SEED));
    let mut replay = Replay::new(table);

    // A lone black stone pinned against two white stones.
    for stone in [
        Stone::new(4, 4, StoneColor::Black),
        Stone::new(3, 4, StoneColor::White),
        Stone::new(4, 3, StoneColor::White),
        Stone::new(5, 5, StoneColor::White),
    ] {
        replay.apply(GameEvent::SetupAdd(stone));
    }
    println!("=== Setup ===");
    println!("{}", replay.position());
    println!("key: {:016x}\n", replay.key());

    println!("=== Ladder Reading ===");
    let prey = Coord::new(4, 4);
    for attack in [Coord::new(4, 5), Coord::new(5, 4)] {
        let stone = Stone {
            coord: attack,
            color: StoneColor::White,
        };
        let works = capture_succeeds(replay.position(), stone, prey, MAX_LADDER_ATTEMPT);
        println!("White {} captures: {works}", format_vertex(attack, 9));
    }

    replay.apply(GameEvent::Place(Stone::new(4, 5, StoneColor::White)));
    let escape = Stone::new(5, 4, StoneColor::Black);
    println!(
        "Black {} runs into a dead ladder: {}",
        format_vertex(escape.coord, 9),
        is_ladder_escape_fail(replay.position(), escape)
    );
    println!("{}", replay.position());

    replay.undo();
    println!("after undo, key: {:016x}", replay.key());
}
