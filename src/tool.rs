// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for experimenting with instrumented hash tables

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use hashkit::{
    AbstractTable, Config, HashType, IdGenerator, ParsableTable, ProbeType, TableType,
};
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};

    () => {{
        eprintln!("Program terminated unexpectedly");
        std::process::exit(1);
    }};
}

use tracing::info;

pub fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // The library logs through the log crate
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("HASHKIT_LOG")
        .from_env_lossy()
        .add_directive(
            "rustyline=warn"
                .parse()
                .expect("Failed to parse rustyline directive"),
        );

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));

    (is_verbose, level_filter)
}

/// CLI tool for experimenting with instrumented hash tables
#[derive(Parser, Debug)]
#[command(name = "hashkit")]
#[command(about = "CLI tool for experimenting with instrumented hash tables")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Collision strategy ("chained" or "open")
    #[arg(short, long, default_value_t = TableType::Chained)]
    engine: TableType,

    /// Initial number of buckets or slots
    #[arg(short, long, default_value_t = hashkit::config::DEFAULT_INITIAL_CAPACITY)]
    capacity: usize,

    /// Load factor threshold in (0, 1]
    #[arg(short, long, default_value_t = hashkit::config::DEFAULT_LOAD_FACTOR)]
    load_factor: f32,

    /// Hash function ("division", "multiplication", "jcf7", "jcf")
    #[arg(long, default_value_t = HashType::Division)]
    hash: HashType,

    /// Probe sequence of open addressing ("linear", "quadratic", "double")
    #[arg(short, long, default_value_t = ProbeType::Linear)]
    probe: ProbeType,

    /// Command to run (if omitted, starts interactive shell)
    #[command(subcommand)]
    command: Option<ToolCommand>,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Insert or overwrite a key-value pair
    #[command(visible_alias = "set")]
    Put {
        /// The key to set
        key: String,
        /// The value to store
        value: String,
    },
    /// Get the value for a key
    Get {
        /// The key to look up
        key: String,
    },
    /// Check whether a key exists
    Contains {
        /// The key to look up
        key: String,
    },
    /// Remove a key (chained tables only)
    #[command(visible_alias = "del")]
    Remove {
        /// The key to remove
        key: String,
    },
    /// Replace the table contents with one value per line of a file
    Load {
        /// Text file to read
        path: PathBuf,

        /// Truncate cells of the printed grid at this delimiter
        #[arg(short, long, default_value = "")]
        delimiter: String,
    },
    /// Print every bucket
    #[command(visible_alias = "ls")]
    Show {
        /// Truncate cells at this delimiter
        delimiter: Option<String>,
    },
    /// Show table statistics
    #[command(visible_alias = "info")]
    Stats,
    /// Remove all items
    Clear,
}

// Internal shell commands, include all external tool commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
{version}

Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    #[command(flatten)]
    ToolCmd(ToolCommand),

    /// Exit the current shell
    #[command(visible_alias = "quit")]
    Exit,
}

struct Session {
    table: ParsableTable<String, String>,
    ids: IdGenerator,
}

impl Session {
    fn open(args: &ToolArgs) -> hashkit::Result<Self> {
        let table = Config::new()
            .initial_capacity(args.capacity)
            .load_factor(args.load_factor)
            .hash_type(args.hash)
            .probe_type(args.probe)
            .open::<String, String>(args.engine)?;

        info!(
            "opened {} table with {} buckets ({}, load factor {})",
            args.engine,
            table.capacity(),
            table.hash_type(),
            table.load_factor(),
        );

        let table = ParsableTable::<String, String>::new(table)
            .with_key_constructor(|text| Ok(text.to_owned()))
            .with_value_constructor(|text| Ok(text.to_owned()));

        Ok(Self {
            table,
            ids: IdGenerator::default(),
        })
    }
}

fn handle_put(session: &mut Session, key: &str, value: &str) {
    match session.table.put_str(key, value) {
        Ok(Some(prev)) => println!("OK (replaced {prev:?})"),
        Ok(None) => println!("OK"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_get(session: &Session, key: &str) {
    match session.table.get(&key.to_owned()) {
        Some(value) => println!("{value}"),
        None => println!("(not found)"),
    }
}

fn handle_contains(session: &Session, key: &str) {
    println!("{}", session.table.contains(&key.to_owned()));
}

fn handle_remove(session: &mut Session, key: &str) {
    match session.table.remove(&key.to_owned()) {
        Ok(Some(value)) => println!("OK (removed {value:?})"),
        Ok(None) => println!("(not found)"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_load(session: &mut Session, path: &Path, delimiter: &str) {
    let report = session.table.load(path, &session.ids);

    if let Some(e) = &report.error {
        eprintln!("Error: {e}");
    }

    println!(
        "Loaded {} items ({} blank lines skipped)\n",
        report.inserted, report.skipped
    );
    handle_show(session, Some(delimiter));
    print_stats(session);
}

fn handle_show(session: &Session, delimiter: Option<&str>) {
    print!("{}", session.table.snapshot().render(delimiter.unwrap_or_default()));
}

fn print_stats(session: &Session) {
    println!("Engine: {}", session.table.table_type());
    println!("Hash: {}", session.table.hash_type());
    if let hashkit::AnyTable::Open(table) = &*session.table {
        println!("Probe: {}", table.probe_type());
    }
    println!("{}", session.table.stats());
}

fn handle_clear(session: &mut Session) {
    session.table.clear();
    println!("OK");
}

/// Result of executing a command
enum CommandResult {
    Continue,
    Exit,
}

/// Execute a parsed command
fn execute_command(session: &mut Session, cmd: ToolCommand) -> CommandResult {
    match cmd {
        ToolCommand::Put { key, value } => handle_put(session, &key, &value),
        ToolCommand::Get { key } => handle_get(session, &key),
        ToolCommand::Contains { key } => handle_contains(session, &key),
        ToolCommand::Remove { key } => handle_remove(session, &key),
        ToolCommand::Load { path, delimiter } => handle_load(session, &path, &delimiter),
        ToolCommand::Show { delimiter } => handle_show(session, delimiter.as_deref()),
        ToolCommand::Stats => print_stats(session),
        ToolCommand::Clear => handle_clear(session),
    }
    CommandResult::Continue
}

/// Execute a shell-only command
fn execute_shell_command(session: &mut Session, cmd: ShellCommand) -> CommandResult {
    match cmd {
        ShellCommand::ToolCmd(tool_cmd) => execute_command(session, tool_cmd),
        ShellCommand::Exit => CommandResult::Exit,
    }
}

/// Parse and run a shell command line
fn run_shell_command(session: &mut Session, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return CommandResult::Continue,
        None => {
            eprintln!("error: unclosed quote");
            return CommandResult::Continue;
        }
    };

    match ShellArgs::try_parse_from(&tokens) {
        Ok(args) => execute_shell_command(session, args.command),
        Err(e) => {
            eprintln!("{e}");
            CommandResult::Continue
        }
    }
}

fn run_shell(session: &mut Session) {
    if io::stdin().is_terminal() {
        run_shell_interactive(session);
    } else {
        run_shell_non_interactive(session);
    }
}

fn run_shell_interactive(session: &mut Session) {
    println!("Welcome to the hashkit shell");
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("hashkit> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {}
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }
    }
}

fn run_shell_non_interactive(session: &mut Session) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if stdout.flush().is_err() {
            die!("can't flush stdout");
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(e) => {
                die!("Error reading input: {}", e);
            }
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut session = match Session::open(&args) {
        Ok(s) => s,
        Err(e) => {
            let note = if verbose {
                ""
            } else {
                ". Note: Use -v (one or multiple times) for more information"
            };
            die!("Error opening table: {}{}", e, note);
        }
    };

    match args.command {
        Some(cmd) => {
            execute_command(&mut session, cmd);
        }
        None => run_shell(&mut session),
    }
}
