use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::stop_command::NO_RUNNING_MESSAGE;
use crate::timeline::{TimelineError, TimelineRepository};

/// `add`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[clap(subcommand)]
    item: AddItem,
}

/// `add`で追加できる項目。
#[derive(Debug, clap::Subcommand)]
enum AddItem {
    /// Add notes to the running time entry
    Note(NoteArgs),
}

#[derive(Debug, clap::Args)]
struct NoteArgs {
    #[clap(required = true, help = "Notes to add, one per argument")]
    notes: Vec<String>,
}

pub struct AddCommand<'a, T: TimelineRepository> {
    timeline: &'a T,
}

impl<'a, T: TimelineRepository> AddCommand<'a, T> {
    /// 新しい`AddCommand`を返す。
    pub fn new(timeline: &'a T) -> Self {
        Self { timeline }
    }

    /// `add`サブコマンドの処理を行う。
    ///
    /// `add note`では引数ごとに1つのメモとして計測中のエントリーに追加する。
    pub fn run(&self, args: AddArgs) -> Result<()> {
        match args.item {
            AddItem::Note(note) => self.add_notes(&note.notes),
        }
    }

    fn add_notes(&self, notes: &[String]) -> Result<()> {
        for note in notes {
            match self.timeline.add_note(note) {
                Ok(()) => debug!("Added note: {}", note),
                Err(TimelineError::NotFound) => bail!(NO_RUNNING_MESSAGE),
                Err(err) => return Err(err).context("Failed to add a note"),
            }
        }
        info!("Added {} note(s)", notes.len());

        Ok(())
    }
}
