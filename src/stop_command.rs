use anyhow::{bail, Context, Result};
use log::info;

use crate::datetime;
use crate::time_entry::TimeEntry;
use crate::timeline::{TimelineError, TimelineRepository};

/// 計測中のエントリーがない場合に表示するメッセージ。
pub const NO_RUNNING_MESSAGE: &str = "you have no running time - exiting";

pub struct StopCommand<'a, T: TimelineRepository> {
    timeline: &'a T,
}

impl<'a, T: TimelineRepository> StopCommand<'a, T> {
    /// 新しい`StopCommand`を返す。
    pub fn new(timeline: &'a T) -> Self {
        Self { timeline }
    }

    /// `stop`サブコマンドの処理を行う。
    ///
    /// 計測中のエントリーを現在時刻で終了する。
    pub fn run(&self) -> Result<TimeEntry> {
        match self.timeline.stop(datetime::now()) {
            Ok(entry) => {
                info!("Stopped entry {}", entry.id);
                Ok(entry)
            }
            Err(TimelineError::NotFound) => bail!(NO_RUNNING_MESSAGE),
            Err(err) => Err(err).context("Failed to stop the running entry"),
        }
    }
}
