use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, Utc};

use crate::datetime::format_duration;
use crate::time_entry::TimeEntry;

const DAY_FORMAT: &str = "%B %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M:%S %p";
const IN_PROGRESS: &str = " (in progress)";

/// 同じ日に開始したエントリーのまとまり。
struct DayGroup<'a> {
    header: String,
    total: Duration,
    entries: Vec<&'a TimeEntry>,
}

/// エントリーを開始日ごとにまとめたレポートを作成する。
///
/// 日付と時刻はLocalタイムゾーンで表示する。
/// 日ごとのまとまりは見出しの文字列の降順で並ぶため、日付順にはならない
/// (例えば"January"は"February"より前、"December"は"April"より前になる)。
/// まとまりの中はエントリーの格納順のまま表示する。
///
/// # Arguments
///
/// * `owner` - レポートの所有者名
/// * `entries` - 表示するエントリー
/// * `now` - 計測中のエントリーの経過時間を計算する基準時刻
pub fn render(owner: &str, entries: &[TimeEntry], now: DateTime<Utc>) -> String {
    let mut report = format!("Time for {}\n", owner);

    for group in group_by_day(entries, now) {
        let header = format!("{} - Total: {}", group.header, format_duration(group.total));
        // 見出しの改行の分だけ下線を1文字長くする
        let rule = "-".repeat(header.chars().count() + 1);

        report.push_str(&format!("\n{}\n{}\n", header, rule));
        for entry in group.entries {
            let suffix = if entry.is_running() { IN_PROGRESS } else { "" };
            report.push_str(&format!(
                "{} - {}{}\n",
                entry.start.with_timezone(&Local).format(TIME_FORMAT),
                format_duration(entry.elapsed(now)),
                suffix
            ));
        }
        report.push_str(&format!("{}\n", rule));
    }

    report
}

/// エントリーを開始日の見出しごとにまとめ、見出しの降順に並べる。
fn group_by_day(entries: &[TimeEntry], now: DateTime<Utc>) -> Vec<DayGroup<'_>> {
    let grouped: HashMap<String, Vec<&TimeEntry>> =
        entries.iter().fold(HashMap::new(), |mut acc, entry| {
            let header = entry
                .start
                .with_timezone(&Local)
                .format(DAY_FORMAT)
                .to_string();
            acc.entry(header).or_default().push(entry);
            acc
        });

    let mut groups = grouped
        .into_iter()
        .map(|(header, entries)| {
            let total = entries
                .iter()
                .fold(Duration::zero(), |acc, entry| acc + entry.elapsed(now));
            DayGroup {
                header,
                total,
                entries,
            }
        })
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| b.header.cmp(&a.header));

    groups
}
