//! Binary file formats for Zobrist tables and opening books.
//!
//! Both formats are big-endian and share a header:
//!
//! ```text
//! magic     2 x u16   "ZH" (table) or "OB" (book), one UTF-16 unit per letter
//! version   u8
//! size      u8        board size, must be > 1
//! metadata  u16 + UTF-8 bytes
//! ```
//!
//! A Zobrist table then stores the pass constant (u64) followed by
//! `size * size * 3` values in x, y, state order.
//!
//! An opening book stores an entry count (u32), then per entry the hash
//! (u64), a forecast count (u8, at most 127) and per forecast the point index
//! (u16) and info string (u16 length + UTF-8).
//!
//! Readers either return a complete value or an error; nothing is partially
//! loaded. The `load_*` helpers turn a malformed file into "nothing loaded"
//! with a warning, while I/O failures still reach the caller.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::book::{Forecast, OpeningBook};
use crate::constants::{
    BOOK_MAGIC, DEFAULT_ZOBRIST_SEED, FORMAT_METADATA, FORMAT_VERSION, MAX_FORECASTS, MIN_BOARD_SIZE,
    POSITION_STATE_COUNT, ZOBRIST_MAGIC,
};
use crate::zobrist::ZobristTable;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bad magic header {found:?}, expected {expected:?}")]
    BadMagic { expected: String, found: String },
    #[error("board size {0} is out of range")]
    BadBoardSize(usize),
    #[error("{count} forecasts for hash {hash:#018x}, at most {max} fit", max = MAX_FORECASTS)]
    TooManyForecasts { hash: u64, count: usize },
    #[error("forecast point {position} is off a {size}x{size} board")]
    BadPosition { position: u16, size: usize },
    #[error("string of {0} bytes does not fit a u16 length prefix")]
    StringTooLong(usize),
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FormatError {
    /// True for content problems, false for I/O failures other than a file
    /// that ends early.
    pub fn is_malformed(&self) -> bool {
        match self {
            FormatError::Io(err) => err.kind() == io::ErrorKind::UnexpectedEof,
            _ => true,
        }
    }
}

// ============================================================================
// Primitives
// ============================================================================

fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

fn read_string<R: Read>(r: &mut R) -> Result<String, FormatError> {
    let len = read_u16(r)?;
    let mut buf = vec![0u8; usize::from(len)];
    r.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<(), FormatError> {
    let len = u16::try_from(s.len()).map_err(|_| FormatError::StringTooLong(s.len()))?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_header<W: Write>(w: &mut W, magic: [char; 2], size: usize) -> Result<(), FormatError> {
    let size = u8::try_from(size)
        .ok()
        .filter(|&s| s > MIN_BOARD_SIZE)
        .ok_or(FormatError::BadBoardSize(size))?;
    for ch in magic {
        // Both magic letters are ASCII, so one UTF-16 unit each.
        w.write_all(&(ch as u16).to_be_bytes())?;
    }
    w.write_all(&[FORMAT_VERSION, size])?;
    write_string(w, FORMAT_METADATA)
}

/// Read and check the header. Returns the board size.
fn read_header<R: Read>(r: &mut R, magic: [char; 2]) -> Result<usize, FormatError> {
    let mut found = String::new();
    for _ in 0..2 {
        let unit = read_u16(r)?;
        found.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    let expected: String = magic.iter().collect();
    if !found.eq_ignore_ascii_case(&expected) {
        return Err(FormatError::BadMagic { expected, found });
    }

    let _version = read_u8(r)?;
    let size = read_u8(r)?;
    if size <= MIN_BOARD_SIZE {
        return Err(FormatError::BadBoardSize(usize::from(size)));
    }
    let _metadata = read_string(r)?;
    Ok(usize::from(size))
}

// ============================================================================
// Zobrist tables
// ============================================================================

pub fn write_zobrist_table<W: Write>(w: &mut W, table: &ZobristTable) -> Result<(), FormatError> {
    write_header(w, ZOBRIST_MAGIC, table.size())?;
    w.write_all(&table.pass_hash().to_be_bytes())?;
    for value in table.values_in_file_order() {
        w.write_all(&value.to_be_bytes())?;
    }
    Ok(())
}

pub fn read_zobrist_table<R: Read>(r: &mut R) -> Result<ZobristTable, FormatError> {
    let size = read_header(r, ZOBRIST_MAGIC)?;
    let pass_hash = read_u64(r)?;
    let count = POSITION_STATE_COUNT * size * size;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_u64(r)?);
    }
    ZobristTable::from_parts(size, pass_hash, &values).ok_or(FormatError::BadBoardSize(size))
}

// ============================================================================
// Opening books
// ============================================================================

pub fn write_opening_book<W: Write>(w: &mut W, book: &OpeningBook) -> Result<(), FormatError> {
    write_header(w, BOOK_MAGIC, usize::from(book.board_size()))?;
    w.write_all(&(book.size() as u32).to_be_bytes())?;
    for (hash, forecasts) in book.iter() {
        let count = u8::try_from(forecasts.len())
            .ok()
            .filter(|&n| usize::from(n) <= MAX_FORECASTS)
            .ok_or(FormatError::TooManyForecasts {
                hash,
                count: forecasts.len(),
            })?;
        w.write_all(&hash.to_be_bytes())?;
        w.write_all(&[count])?;
        for forecast in forecasts {
            w.write_all(&forecast.position.to_be_bytes())?;
            write_string(w, &forecast.info)?;
        }
    }
    Ok(())
}

pub fn read_opening_book<R: Read>(r: &mut R) -> Result<OpeningBook, FormatError> {
    let size = read_header(r, BOOK_MAGIC)?;
    // read_header already bounds the size to a u8.
    let mut book = OpeningBook::new(size as u8);
    let entries = read_u32(r)?;
    for _ in 0..entries {
        let hash = read_u64(r)?;
        let count = read_u8(r)?;
        for _ in 0..count {
            let position = read_u16(r)?;
            if usize::from(position) >= size * size {
                return Err(FormatError::BadPosition { position, size });
            }
            let info = read_string(r)?;
            book.add(hash, Forecast::new(position, info));
        }
    }
    Ok(book)
}

// ============================================================================
// Files
// ============================================================================

pub fn save_zobrist_table(path: &Path, table: &ZobristTable) -> Result<(), FormatError> {
    let mut w = BufWriter::new(File::create(path)?);
    write_zobrist_table(&mut w, table)?;
    w.flush()?;
    info!(path = %path.display(), size = table.size(), "saved zobrist table");
    Ok(())
}

pub fn save_opening_book(path: &Path, book: &OpeningBook) -> Result<(), FormatError> {
    let mut w = BufWriter::new(File::create(path)?);
    write_opening_book(&mut w, book)?;
    w.flush()?;
    info!(path = %path.display(), entries = book.size(), "saved opening book");
    Ok(())
}

/// Load a table from `path`. A malformed file yields `Ok(None)`.
pub fn load_zobrist_table(path: &Path) -> Result<Option<ZobristTable>, FormatError> {
    let mut r = BufReader::new(File::open(path)?);
    match read_zobrist_table(&mut r) {
        Ok(table) => {
            info!(path = %path.display(), size = table.size(), "loaded zobrist table");
            Ok(Some(table))
        }
        Err(err) if err.is_malformed() => {
            warn!(path = %path.display(), error = %err, "ignoring malformed zobrist table");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Load a book from `path`. A malformed file yields `Ok(None)`.
pub fn load_opening_book(path: &Path) -> Result<Option<OpeningBook>, FormatError> {
    let mut r = BufReader::new(File::open(path)?);
    match read_opening_book(&mut r) {
        Ok(book) => {
            info!(path = %path.display(), entries = book.size(), "loaded opening book");
            Ok(Some(book))
        }
        Err(err) if err.is_malformed() => {
            warn!(path = %path.display(), error = %err, "ignoring malformed opening book");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Load a table, or fall back to the seeded default of `size` when the file
/// cannot be read or is malformed. Failures are logged.
pub fn load_zobrist_table_or_default(path: &Path, size: usize) -> ZobristTable {
    match load_zobrist_table(path) {
        Ok(Some(table)) => table,
        Ok(None) => ZobristTable::generate(size, DEFAULT_ZOBRIST_SEED),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "using default zobrist table");
            ZobristTable::generate(size, DEFAULT_ZOBRIST_SEED)
        }
    }
}

/// Load a book, or fall back to an empty book for `size` when the file
/// cannot be read or is malformed. Failures are logged.
pub fn load_opening_book_or_default(path: &Path, size: u8) -> OpeningBook {
    match load_opening_book(path) {
        Ok(Some(book)) => book,
        Ok(None) => OpeningBook::new(size),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "using empty opening book");
            OpeningBook::new(size)
        }
    }
}
