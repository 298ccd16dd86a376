use anyhow::{bail, Context, Result};
use log::info;

use crate::datetime;
use crate::time_entry::TimeEntry;
use crate::timeline::{TimelineError, TimelineRepository};

/// `start`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct StartArgs {
    #[clap(
        long = "notes",
        help = "Add notes while starting your time entry (comma-separated)",
        value_delimiter = ','
    )]
    notes: Vec<String>,
}

pub struct StartCommand<'a, T: TimelineRepository> {
    timeline: &'a T,
}

impl<'a, T: TimelineRepository> StartCommand<'a, T> {
    /// 新しい`StartCommand`を返す。
    pub fn new(timeline: &'a T) -> Self {
        Self { timeline }
    }

    /// `start`サブコマンドの処理を行う。
    ///
    /// 計測中のエントリーがない場合だけ、現在時刻から新しいエントリーを開始する。
    pub fn run(&self, args: StartArgs) -> Result<TimeEntry> {
        match self.timeline.running_event() {
            Ok(running) => {
                info!("Entry {} is already running", running.id);
                bail!("cannot start a new entry - current time running")
            }
            Err(TimelineError::NotFound) => {
                let entry = self.timeline.start(datetime::now(), Some(args.notes));
                info!("Started entry {} at {}", entry.id, entry.start);
                Ok(entry)
            }
            Err(err) => Err(err).context("Failed to look up the running entry"),
        }
    }
}
