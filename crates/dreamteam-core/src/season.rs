// Season codes: two consecutive years concatenated, e.g. "19871988".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeasonParseError {
    #[error("season code must be 8 digits, got {0:?}")]
    Malformed(String),

    #[error("season code {0} does not span consecutive years")]
    NotConsecutive(String),
}

/// A single season window, identified by the year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeasonCode {
    start: u16,
}

impl SeasonCode {
    pub fn new(start_year: u16) -> Self {
        SeasonCode { start: start_year }
    }

    pub fn start_year(&self) -> u16 {
        self.start
    }

    pub fn end_year(&self) -> u16 {
        self.start + 1
    }
}

impl fmt::Display for SeasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:04}", self.start, self.end_year())
    }
}

impl FromStr for SeasonCode {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SeasonParseError::Malformed(s.to_string()));
        }
        let start: u16 = s[..4]
            .parse()
            .map_err(|_| SeasonParseError::Malformed(s.to_string()))?;
        let end: u16 = s[4..]
            .parse()
            .map_err(|_| SeasonParseError::Malformed(s.to_string()))?;
        if start.checked_add(1) != Some(end) {
            return Err(SeasonParseError::NotConsecutive(s.to_string()));
        }
        Ok(SeasonCode { start })
    }
}

/// Every season window inside the closed year range `oldest..=newest`.
///
/// A window needs both of its years inside the range, so 1987..=2020 yields
/// 33 codes ending with "20192020". Returns an empty list when
/// `newest <= oldest`.
pub fn season_windows(oldest: u16, newest: u16) -> Vec<SeasonCode> {
    (oldest..newest).map(SeasonCode::new).collect()
}
