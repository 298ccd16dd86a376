use anyhow::{Context, Result};
use log::debug;

use crate::time_entry::TimeEntry;
use crate::timeline::{TimelineError, TimelineRepository};

pub struct CurrentCommand<'a, T: TimelineRepository> {
    timeline: &'a T,
}

impl<'a, T: TimelineRepository> CurrentCommand<'a, T> {
    /// 新しい`CurrentCommand`を返す。
    pub fn new(timeline: &'a T) -> Self {
        Self { timeline }
    }

    /// `current`サブコマンドの処理を行う。
    ///
    /// 計測中のエントリーがない場合はエラーではなく`None`を返す。
    pub fn run(&self) -> Result<Option<TimeEntry>> {
        match self.timeline.running_event() {
            Ok(entry) => Ok(Some(entry)),
            Err(TimelineError::NotFound) => {
                debug!("No running entry");
                Ok(None)
            }
            Err(err) => Err(err).context("Failed to look up the running entry"),
        }
    }
}
