use crate::cli::{Args, CompleteHelper, Format, Input, PROMPT, parse_input, prompt_banner};
use crate::config::{Config, Overrides};
use crate::error::{AppError, AppResult};
use crate::fetch::{FlightSource, HttpSource, Window, collect};
use crate::flight::{Direction, FlightNumber};
use crate::report::{Query, render, render_json, row_count};
use crate::summary::{Summary, aggregate};
use clap::Parser;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::io::Write;
use std::process::{Command, ExitCode, Stdio};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod fetch;
mod flight;
mod normalize;
mod payload;
mod report;
mod summary;
mod time;

const PAGE_ROWS: usize = 20;

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    pager.wait()?;
    Ok(())
}

fn show(text: &str, rows: usize) {
    if rows > PAGE_ROWS && paginate(text).is_ok() {
        return;
    }
    println!("{}", text);
}

fn lookup(source: &impl FlightSource, config: &Config, flight_number: FlightNumber, direction: Direction) -> (Query, Summary) {
    let window = Window::ending(chrono::Local::now().date_naive(), config.window_days);
    let records = collect(source, &flight_number, direction, &window);
    let query = Query {
        flight_number,
        direction,
        window_days: config.window_days,
    };
    (query, aggregate(records))
}

fn one_shot(source: &impl FlightSource, config: &Config, raw: &str, format: Format) -> AppResult<()> {
    let Some(flight_number) = FlightNumber::new(raw) else {
        return Err(AppError::Config("flight number cannot be empty".to_string()));
    };
    let (query, summary) = lookup(source, config, flight_number, config.mode);
    match format {
        Format::Table => show(&render(&query, &summary), row_count(&summary)),
        Format::Json => println!("{}", render_json(&query, &summary).map_err(AppError::Output)?),
    }
    Ok(())
}

fn interactive(source: &impl FlightSource, config: &Config) -> AppResult<()> {
    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl: Editor<CompleteHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(CompleteHelper::new()));

    let mut mode = config.mode;
    loop {
        println!("{}", prompt_banner(mode));
        match rl.readline(PROMPT) {
            Ok(line) => match parse_input(&line) {
                Input::Quit => {
                    println!("Exiting program.");
                    break;
                }
                Input::SwitchMode(direction) => mode = direction,
                Input::Empty => {
                    println!("Error: Input cannot be empty. Please Enter a valid flight number.");
                }
                Input::Query(flight_number) => {
                    rl.add_history_entry(line.trim())?;
                    if let Some(helper) = rl.helper_mut() {
                        helper.remember(&flight_number);
                    }
                    let (query, summary) = lookup(source, config, flight_number, mode);
                    show(&render(&query, &summary), row_count(&summary));
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run(args: Args) -> AppResult<()> {
    let overrides = Overrides {
        base_url: args.base_url,
        lang: args.lang,
        window_days: args.days,
        mode: args.mode,
        timeout_secs: args.timeout,
    };
    let config = Config::resolve(args.config.as_deref(), overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with_writer(std::io::stderr)
        .init();

    let source = HttpSource::new(&config)?;
    match args.flight {
        Some(raw) => one_shot(&source, &config, &raw, args.format),
        None => interactive(&source, &config),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
