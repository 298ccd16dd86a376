use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1回分の作業セッション。
///
/// `end`が`None`の場合は計測中のエントリーを表す。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl TimeEntry {
    /// 計測中かどうかを返す。
    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// `end`、計測中であれば`now`までの経過時間を返す。
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.end.unwrap_or(now) - self.start
    }
}

/// 1ユーザー分の永続化されるデータ全体。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}
