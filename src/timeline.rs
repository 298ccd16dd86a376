use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::datetime;
use crate::report;
use crate::time_entry::{EntryCollection, TimeEntry};

/// エントリーのIDとして利用するUUIDの先頭文字数。
const ID_LENGTH: usize = 8;

/// タイムラインの操作で発生するエラー。
#[derive(Debug, Error)]
pub enum TimelineError {
    /// 計測中のエントリーが存在しない。
    #[error("no running time events exist")]
    NotFound,

    // 以下は`open`でファイルを読み込めなかった場合のエラー。
    #[error("failed to read file at path {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read entry data from {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // 以下は`close`でファイルに保存できなかった場合のエラー。
    #[error("failed to marshal entries")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open file for writing at {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write entries to file at {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// サブコマンドから利用するタイムラインの操作。
#[cfg_attr(test, automock)]
pub trait TimelineRepository {
    /// 計測中のエントリーを返す。
    ///
    /// 計測中のエントリーがない場合は`TimelineError::NotFound`を返す。
    fn running_event(&self) -> Result<TimeEntry, TimelineError>;

    /// 新しいエントリーを`when`から開始する。
    ///
    /// 計測中のエントリーが既にあるかどうかは確認しないため、呼び出し側で
    /// `running_event`を使って確認すること。
    fn start(&self, when: DateTime<Utc>, notes: Option<Vec<String>>) -> TimeEntry;

    /// 計測中のエントリーを`when`で終了し、終了後のエントリーを返す。
    fn stop(&self, when: DateTime<Utc>) -> Result<TimeEntry, TimelineError>;

    /// 計測中のエントリーにメモを追加する。
    fn add_note(&self, note: &str) -> Result<(), TimelineError>;

    /// 日毎にまとめたレポートを返す。
    fn report_format(&self) -> String;
}

/// 1ユーザー分のエントリーをファイルに保存するストア。
///
/// `open`でファイルを全て読み込み、`close`で全て書き戻す。
/// その間の変更はメモリ上にのみ存在する。
/// 同じファイルを開いた別プロセスとの排他は行わないため、後から`close`した方の内容で上書きされる。
///
/// # Examples
///
/// ```ignore
/// let timeline = Timeline::open("timeline.yaml", "alice")?;
/// timeline.start(Utc::now(), None);
/// timeline.close()?;
/// ```
#[derive(Debug)]
pub struct Timeline {
    path: PathBuf,
    collection: RwLock<EntryCollection>,
}

impl Timeline {
    /// `path`のファイルからタイムラインを読み込む。
    ///
    /// ファイルが存在しない場合は`owner`を所有者とする空のタイムラインを返す。
    /// ファイルが存在する場合はファイルに保存された所有者を利用し、エントリーを開始時刻の昇順に並べる。
    /// ファイルで省略された項目(空のファイルを含む)は空の値として扱う。
    pub fn open(path: impl Into<PathBuf>, owner: &str) -> Result<Self, TimelineError> {
        let path = path.into();
        let collection = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => EntryCollection::default(),
            Ok(content) => {
                let mut collection: EntryCollection = serde_yaml::from_str(&content)
                    .map_err(|source| TimelineError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                collection.entries.sort_by_key(|entry| entry.start);
                collection
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => EntryCollection::new(owner),
            Err(source) => return Err(TimelineError::Read { path, source }),
        };

        Ok(Self {
            path,
            collection: RwLock::new(collection),
        })
    }

    /// 保存先のファイルパスを返す。
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn owner(&self) -> String {
        self.read().owner.clone()
    }

    /// 現在のエントリーの一覧を返す。
    pub fn entries(&self) -> Vec<TimeEntry> {
        self.read().entries.clone()
    }

    /// メモリ上の内容をファイルに書き戻す。
    ///
    /// 親ディレクトリが存在しない場合は作成し、既存のファイルは置き換える。
    pub fn close(&self) -> Result<(), TimelineError> {
        let collection = self.write();
        let content = serde_yaml::to_string(&*collection).map_err(TimelineError::Serialize)?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| TimelineError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut file = File::create(&self.path).map_err(|source| TimelineError::Create {
            path: self.path.clone(),
            source,
        })?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|source| TimelineError::Write {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, EntryCollection> {
        self.collection.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntryCollection> {
        self.collection.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimelineRepository for Timeline {
    fn running_event(&self) -> Result<TimeEntry, TimelineError> {
        self.read()
            .running()
            .cloned()
            .ok_or(TimelineError::NotFound)
    }

    fn start(&self, when: DateTime<Utc>, notes: Option<Vec<String>>) -> TimeEntry {
        let mut collection = self.write();
        let entry = TimeEntry {
            id: generate_id(&collection.entries),
            start: when,
            end: None,
            notes: notes.unwrap_or_default(),
        };
        collection.entries.push(entry.clone());

        entry
    }

    fn stop(&self, when: DateTime<Utc>) -> Result<TimeEntry, TimelineError> {
        let mut collection = self.write();
        let running = collection.running_mut().ok_or(TimelineError::NotFound)?;
        running.end = Some(when);

        Ok(running.clone())
    }

    fn add_note(&self, note: &str) -> Result<(), TimelineError> {
        let mut collection = self.write();
        let running = collection.running_mut().ok_or(TimelineError::NotFound)?;
        running.notes.push(note.to_string());

        Ok(())
    }

    fn report_format(&self) -> String {
        let collection = self.read();
        report::render(&collection.owner, &collection.entries, datetime::now())
    }
}

impl EntryCollection {
    fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            entries: vec![],
        }
    }

    /// 格納順で最初に見つかった計測中のエントリー。
    fn running(&self) -> Option<&TimeEntry> {
        self.entries.iter().find(|entry| entry.is_running())
    }

    fn running_mut(&mut self) -> Option<&mut TimeEntry> {
        self.entries.iter_mut().find(|entry| entry.is_running())
    }
}

/// 既存のエントリーと重複しないIDを生成する。
fn generate_id(entries: &[TimeEntry]) -> String {
    loop {
        let id = Uuid::new_v4().to_string()[..ID_LENGTH].to_string();
        if entries.iter().all(|entry| entry.id != id) {
            return id;
        }
    }
}
