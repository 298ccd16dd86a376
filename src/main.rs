use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, LevelFilter};

mod add_command;
mod config;
mod console;
mod current_command;
mod datetime;
mod list_command;
mod report;
mod start_command;
mod stop_command;
mod time_entry;
mod timeline;

use add_command::{AddArgs, AddCommand};
use config::Config;
use console::{ConsolePresenter, ConsoleText};
use current_command::CurrentCommand;
use list_command::ListCommand;
use start_command::{StartArgs, StartCommand};
use stop_command::StopCommand;
use timeline::{Timeline, TimelineRepository};

/// 作業時間を記録するためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- start --notes design,review
/// $ cargo run -- add note "talked to bob"
/// $ cargo run -- stop
/// $ cargo run -- list
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        long = "file",
        env = "WORKTIME_FILE",
        help = "Sets a custom timeline file",
        parse(from_os_str)
    )]
    file: Option<PathBuf>,

    #[clap(
        long = "owner",
        env = "WORKTIME_OWNER",
        help = "Sets the owner name used for a new timeline file"
    )]
    owner: Option<String>,

    #[clap(short = 'v', long = "verbose", help = "Show informational logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Start a new time entry
    Start(StartArgs),
    /// Stop the running time entry
    Stop,
    /// Add an item to the running time entry
    Add(AddArgs),
    /// Show the running time entry
    Current,
    /// Show all time entries grouped by day
    List,
}

fn main() {
    let args = Args::parse();

    let code = {
        let mut stdout = io::stdout().lock();
        let mut presenter = ConsoleText::new(&mut stdout);
        match run(args, &mut presenter) {
            Ok(()) => 0,
            Err(err) => {
                if let Err(show_err) = presenter.show_error(&err) {
                    eprintln!("{:#}", show_err);
                }
                1
            }
        }
    };

    process::exit(code);
}

/// タイムラインを開いてサブコマンドを実行し、成功した場合だけファイルに保存する。
fn run<P: ConsolePresenter>(args: Args, presenter: &mut P) -> Result<()> {
    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    setup_logger(level)?;

    let config = Config::resolve(args.file, args.owner);
    info!("Timeline file: {:?}, owner: {}", config.path, config.owner);

    let timeline = Timeline::open(&config.path, &config.owner)?;
    info!(
        "Loaded {} entries owned by {} from {:?}",
        timeline.entries().len(),
        timeline.owner(),
        timeline.path()
    );

    dispatch(args.subcommand, &timeline, presenter)?;

    timeline.close()?;
    info!("Saved timeline to {:?}", timeline.path());

    Ok(())
}

/// サブコマンドを実行し、結果を表示する。
fn dispatch<T: TimelineRepository, P: ConsolePresenter>(
    subcommand: SubCommands,
    timeline: &T,
    presenter: &mut P,
) -> Result<()> {
    match subcommand {
        SubCommands::Start(start) => {
            let entry = StartCommand::new(timeline).run(start)?;
            presenter.show_started(&entry)
        }
        SubCommands::Stop => {
            let entry = StopCommand::new(timeline).run()?;
            presenter.show_stopped(&entry)
        }
        SubCommands::Add(add) => AddCommand::new(timeline).run(add),
        SubCommands::Current => {
            let entry = CurrentCommand::new(timeline).run()?;
            presenter.show_current(entry.as_ref())
        }
        SubCommands::List => presenter.show_report(&ListCommand::new(timeline).run()),
    }
}

/// ログの出力先と出力レベルを設定する。
fn setup_logger(level: LevelFilter) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .context("Failed to initialize logger")?;

    Ok(())
}
