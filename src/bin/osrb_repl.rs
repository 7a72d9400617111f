//! Reads `+ <key>` / `- <key>` lines from stdin and prints the tree after each one.
//!
//! Flags:
//!   --repr     print the in-order representation instead of the diagram
//!   --plain    leave subtree counts out of diagram labels
//!   --compat   only repair removals when a child replaced the removed node
//!
//! `OSRB_LOG` sets the stderr log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).

use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;
use std::str::FromStr;

use log::{LevelFilter, debug, error, warn};
use osrb_tree::command::{Command, parse_line};
use osrb_tree::{OSRBTree, RemovalFixup, RenderStyle};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const LOG_ENV: &str = "OSRB_LOG";

#[derive(Debug, Clone, Copy)]
enum Output {
    Diagram(RenderStyle),
    Representation,
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    output: Output,
    removal_fixup: RemovalFixup,
    log_level: LevelFilter,
}

impl Settings {
    fn from_env() -> Result<Self, String> {
        let mut output = Output::Diagram(RenderStyle::default());
        let mut plain = false;
        let mut removal_fixup = RemovalFixup::default();

        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--repr" => output = Output::Representation,
                "--plain" => plain = true,
                "--compat" => removal_fixup = RemovalFixup::ChildPresent,
                other => return Err(format!("unknown argument `{other}`")),
            }
        }
        if plain && let Output::Diagram(style) = &mut output {
            *style = RenderStyle::PLAIN;
        }

        let log_level = match std::env::var(LOG_ENV) {
            Ok(level) => LevelFilter::from_str(&level).map_err(|_| format!("invalid {LOG_ENV} level `{level}`"))?,
            Err(_) => LevelFilter::Warn,
        };

        Ok(Self {
            output,
            removal_fixup,
            log_level,
        })
    }
}

fn initialize_logging(level: LevelFilter) {
    if TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("osrb_repl: logger already initialized");
    }
}

fn print_tree(out: &mut impl Write, tree: &OSRBTree<i64>, output: Output) -> io::Result<()> {
    match output {
        Output::Diagram(style) => write!(out, "{}", tree.diagram_with(style))?,
        Output::Representation => writeln!(out, "{}", tree.representation())?,
    }
    writeln!(out)?;
    out.flush()
}

fn run(settings: Settings) -> io::Result<()> {
    let mut tree = OSRBTree::with_removal_fixup(settings.removal_fixup);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let command = match parse_line::<i64>(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!("line {}: {err}, skipped", number + 1);
                continue;
            }
        };
        if command == Command::Stop {
            debug!("line {}: stop", number + 1);
            break;
        }
        command.apply(&mut tree);
        print_tree(&mut out, &tree, settings.output)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(message) => {
            eprintln!("osrb_repl: {message}");
            return ExitCode::FAILURE;
        }
    };
    initialize_logging(settings.log_level);
    debug!("starting with {settings:?}");

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("i/o failure: {err}");
            ExitCode::FAILURE
        }
    }
}
