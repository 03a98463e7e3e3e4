//! Forecast store and console command parsing
//!
//! The companion learns the forecast from its host over a one-line text
//! command: `FORECAST <high> <low> <condition>`. The latest values are kept
//! in memory only; there is no history and nothing survives a reset.

use crate::icons;

/// Weather condition reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Storm,
    Fog,
}

impl Condition {
    /// Parse a console keyword (case-insensitive ASCII)
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            _ if word.eq_ignore_ascii_case("clear") => Some(Condition::Clear),
            _ if word.eq_ignore_ascii_case("clouds") => Some(Condition::Clouds),
            _ if word.eq_ignore_ascii_case("rain") => Some(Condition::Rain),
            _ if word.eq_ignore_ascii_case("snow") => Some(Condition::Snow),
            _ if word.eq_ignore_ascii_case("storm") => Some(Condition::Storm),
            _ if word.eq_ignore_ascii_case("fog") => Some(Condition::Fog),
            _ => None,
        }
    }

    /// Wire-format icon bytes for this condition
    pub fn icon_bytes(self) -> &'static [u8] {
        match self {
            Condition::Clear => icons::CLEAR,
            Condition::Clouds => icons::CLOUDS,
            Condition::Rain => icons::RAIN,
            Condition::Snow => icons::SNOW,
            Condition::Storm => icons::STORM,
            Condition::Fog => icons::FOG,
        }
    }
}

/// Latest forecast values from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Forecast {
    /// Forecast high in whole degrees
    pub high: i32,
    /// Forecast low in whole degrees
    pub low: i32,
    pub condition: Condition,
}

/// Errors from console command parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line does not start with a known command word
    UnknownCommand,
    /// Fewer fields than the command requires
    MissingField,
    /// A temperature field is not a valid integer
    BadNumber,
    /// The condition keyword is not recognized
    UnknownCondition,
}

/// Parse one console line
pub fn parse_line(line: &str) -> Result<Forecast, ParseError> {
    let mut fields = line.split_ascii_whitespace();

    let command = fields.next().ok_or(ParseError::UnknownCommand)?;
    if !command.eq_ignore_ascii_case("forecast") {
        return Err(ParseError::UnknownCommand);
    }

    let high = fields
        .next()
        .ok_or(ParseError::MissingField)?
        .parse::<i32>()
        .map_err(|_| ParseError::BadNumber)?;
    let low = fields
        .next()
        .ok_or(ParseError::MissingField)?
        .parse::<i32>()
        .map_err(|_| ParseError::BadNumber)?;
    let condition = Condition::from_keyword(fields.next().ok_or(ParseError::MissingField)?)
        .ok_or(ParseError::UnknownCondition)?;

    Ok(Forecast {
        high,
        low,
        condition,
    })
}
