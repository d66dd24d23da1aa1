use crate::flight::{Direction, FlightNumber};
use clap::{Parser, ValueEnum};
use rustyline::completion::{Completer, Pair};
use rustyline::hint::HistoryHinter;
use rustyline::{Context, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "On-time history of a flight at Hong Kong International Airport")]
pub struct Args {
    /// Flight number to look up once; starts the interactive prompt when omitted
    pub flight: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start in arrival (a) or departure (d) mode
    #[arg(short, long, value_enum)]
    pub mode: Option<Direction>,

    /// Number of days to look back, today included
    #[arg(short, long, value_name = "DAYS")]
    pub days: Option<u32>,

    /// Response language (en, zh_HK, zh_CN)
    #[arg(long)]
    pub lang: Option<String>,

    /// Flight history endpoint
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format for one-shot lookups
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    SwitchMode(Direction),
    Empty,
    Query(FlightNumber),
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "q" => Input::Quit,
        "a" => Input::SwitchMode(Direction::Arrival),
        "d" => Input::SwitchMode(Direction::Departure),
        _ => FlightNumber::new(trimmed).map_or(Input::Empty, Input::Query),
    }
}

pub fn prompt_banner(mode: Direction) -> String {
    format!(
        "Current mode: [{}]\nTo change mode: Enter 'D' to search for Departure flights, 'A' for Arrival flights",
        mode
    )
}

pub const PROMPT: &str = "Enter flight number, or 'q' to quit: ";

/// Completes and hints flight numbers already looked up in this session.
#[derive(Helper, Highlighter, Validator, Hinter)]
pub struct CompleteHelper {
    pub flights: Vec<String>,
    #[rustyline(Hinter)]
    pub hinter: HistoryHinter,
}

impl CompleteHelper {
    pub fn new() -> Self {
        Self { flights: Vec::new(), hinter: HistoryHinter::new() }
    }

    pub fn remember(&mut self, flight_number: &FlightNumber) {
        let code = flight_number.to_string();
        if !self.flights.contains(&code) {
            self.flights.push(code);
        }
    }
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = line.trim().to_uppercase();
        let candidates = self
            .flights
            .iter()
            .filter(|code| code.starts_with(&typed))
            .map(|code| Pair {
                display: code.clone(),
                replacement: code.clone(),
            })
            .collect();

        Ok((0, candidates))
    }
}
