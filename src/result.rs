//! Game results in SGF `RE[]` form.
//!
//! - `0`, `Draw`, `Jigo` for a draw
//! - `B+R`/`B+Resign`, `W+T`/`W+Time`, `B+F`/`B+Forfeit`
//! - `W+12.5` for a win by points, `B+` when the margin is not given
//! - `Void` for no result, `?` for unknown

use std::fmt;

use crate::board::StoneColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Margin {
    Points(f32),
    Resign,
    Time,
    Forfeit,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameResult {
    Win { winner: StoneColor, margin: Margin },
    Draw,
    Void,
    Unknown,
}

impl GameResult {
    /// Result of `color` resigning.
    pub fn resignation(color: StoneColor) -> Self {
        GameResult::Win {
            winner: color.opposite(),
            margin: Margin::Resign,
        }
    }

    /// Parse an SGF result string. Returns `None` for an empty string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let first = s.chars().next()?.to_ascii_uppercase();
        let winner = match first {
            '0' | 'D' | 'J' => return Some(GameResult::Draw),
            'V' => return Some(GameResult::Void),
            'B' => StoneColor::Black,
            'W' => StoneColor::White,
            _ => return Some(GameResult::Unknown),
        };

        let rest = s.get(2..).unwrap_or("");
        let margin = match rest.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('R') => Margin::Resign,
            Some('T') => Margin::Time,
            Some('F') => Margin::Forfeit,
            Some(c) if c.is_ascii_digit() => rest
                .parse::<f32>()
                .map(Margin::Points)
                .unwrap_or(Margin::Unknown),
            _ => Margin::Unknown,
        };
        Some(GameResult::Win { winner, margin })
    }

    pub fn winner(&self) -> Option<StoneColor> {
        match self {
            GameResult::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Draw => write!(f, "0"),
            GameResult::Void => write!(f, "Void"),
            GameResult::Unknown => write!(f, "?"),
            GameResult::Win { winner, margin } => {
                write!(f, "{winner}+")?;
                match margin {
                    Margin::Points(p) if *p > 0.0 => write!(f, "{p:.1}"),
                    Margin::Resign => write!(f, "R"),
                    Margin::Time => write!(f, "T"),
                    Margin::Forfeit => write!(f, "F"),
                    _ => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let r = GameResult::parse("W+12.5").unwrap();
        assert_eq!(r.winner(), Some(StoneColor::White));
        assert_eq!(r.to_string(), "W+12.5");
        assert_eq!(GameResult::parse("B+3").unwrap().to_string(), "B+3.0");
    }

    #[test]
    fn test_parse_special() {
        assert_eq!(GameResult::parse("B+Resign").unwrap().to_string(), "B+R");
        assert_eq!(GameResult::parse("w+t").unwrap().to_string(), "W+T");
        assert_eq!(GameResult::parse("B+F").unwrap().to_string(), "B+F");
        assert_eq!(GameResult::parse("Draw"), Some(GameResult::Draw));
        assert_eq!(GameResult::parse("0").unwrap().to_string(), "0");
        assert_eq!(GameResult::parse("Void").unwrap().to_string(), "Void");
        assert_eq!(GameResult::parse("?"), Some(GameResult::Unknown));
        assert_eq!(GameResult::parse("B+").unwrap().to_string(), "B+");
        assert_eq!(GameResult::parse(""), None);
    }

    #[test]
    fn test_resignation() {
        let r = GameResult::resignation(StoneColor::Black);
        assert_eq!(r.to_string(), "W+R");
    }
}
