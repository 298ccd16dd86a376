use std::io::Write;

use anyhow::{Context, Result};

use crate::datetime::{self, format_duration};
use crate::time_entry::TimeEntry;

/// Consoleにサブコマンドの結果を表示するためのtrait。
pub trait ConsolePresenter {
    /// エントリーを開始したことを表示する。
    fn show_started(&mut self, entry: &TimeEntry) -> Result<()>;

    /// エントリーを終了したことを、計測した時間とともに表示する。
    fn show_stopped(&mut self, entry: &TimeEntry) -> Result<()>;

    /// 計測中のエントリーの経過時間とメモを表示する。
    ///
    /// # Arguments
    ///
    /// * `entry` - 計測中のエントリー。`None`の場合は計測していないことを表示する
    fn show_current(&mut self, entry: Option<&TimeEntry>) -> Result<()>;

    /// レポートを表示する。
    fn show_report(&mut self, report: &str) -> Result<()>;

    /// 失敗したサブコマンドのエラーを表示する。
    fn show_error(&mut self, error: &anyhow::Error) -> Result<()>;
}

/// サブコマンドの結果をプレーンテキストで表示する。
pub struct ConsoleText<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleText<'a, W> {
    /// 新しい`ConsoleText`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleText<'a, W> {
    fn show_started(&mut self, entry: &TimeEntry) -> Result<()> {
        writeln!(self.writer, "Time entry created!")
            .with_context(|| format!("Failed to write started entry: {:?}", entry))
    }

    fn show_stopped(&mut self, entry: &TimeEntry) -> Result<()> {
        let elapsed = entry.elapsed(datetime::now());
        writeln!(self.writer, "Time stopped at {}", format_duration(elapsed))
            .with_context(|| format!("Failed to write stopped entry: {:?}", entry))
    }

    fn show_current(&mut self, entry: Option<&TimeEntry>) -> Result<()> {
        let entry = match entry {
            Some(entry) => entry,
            None => {
                return writeln!(self.writer, "No timer running.")
                    .context("Failed to write current entry");
            }
        };

        let elapsed = datetime::now() - entry.start;
        writeln!(self.writer, "Current Duration: {}", format_duration(elapsed))
            .with_context(|| format!("Failed to write current entry: {:?}", entry))?;
        for note in &entry.notes {
            writeln!(self.writer, "-- {:?}", note)
                .with_context(|| format!("Failed to write note: {}", note))?;
        }

        Ok(())
    }

    fn show_report(&mut self, report: &str) -> Result<()> {
        writeln!(self.writer, "{}", report).context("Failed to write report")
    }

    fn show_error(&mut self, error: &anyhow::Error) -> Result<()> {
        writeln!(self.writer, "{:#}", error).context("Failed to write error")
    }
}
