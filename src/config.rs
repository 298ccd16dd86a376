use std::env;
use std::path::PathBuf;

/// 保存先ディレクトリ名。ホームディレクトリ直下に作成する。
const DATA_DIR: &str = ".worktime";
const DATA_FILE: &str = "timeline.yaml";
/// ユーザー名が取得できない場合の所有者名。
const FALLBACK_OWNER: &str = "guest";

/// タイムラインの保存先と所有者の設定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub owner: String,
}

impl Config {
    /// 引数で指定された値を優先し、指定されていない項目は既定値で補う。
    ///
    /// # Arguments
    ///
    /// * `file` - 保存先のファイル。`None`の場合は`~/.worktime/timeline.yaml`
    /// * `owner` - 所有者名。`None`の場合はOSのユーザー名
    pub fn resolve(file: Option<PathBuf>, owner: Option<String>) -> Self {
        Self {
            path: file.unwrap_or_else(|| default_path(dirs::home_dir())),
            owner: owner
                .filter(|owner| !owner.is_empty())
                .unwrap_or_else(|| default_owner(env_username())),
        }
    }
}

/// ホームディレクトリが取得できない場合はルートディレクトリを利用する。
fn default_path(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(|| PathBuf::from("/"))
        .join(DATA_DIR)
        .join(DATA_FILE)
}

fn default_owner(username: Option<String>) -> String {
    username
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_OWNER.to_string())
}

/// 環境変数`USER`(Windowsでは`USERNAME`)からユーザー名を取得する。
///
/// passwdは参照しないため、cronなど環境変数が設定されていない状況では`None`になり、
/// 所有者は`guest`になる。
fn env_username() -> Option<String> {
    env::var("USER").or_else(|_| env::var("USERNAME")).ok()
}
