use chrono::{DateTime, Duration, Utc};

#[cfg(not(test))]
/// 現在のUTC時間を取得する。
pub fn now() -> DateTime<Utc> {
    Utc::now()
}


#[cfg(test)]
pub use mock_datetime::now;

/// 経過時間を秒単位に丸める。
///
/// ちょうど0.5秒の場合は0から遠い方に丸める。
pub fn round_to_seconds(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds();
    let seconds = (millis.abs() + 500) / 1000;
    if millis < 0 {
        -seconds
    } else {
        seconds
    }
}

/// 経過時間を秒単位に丸めて`1h2m3s`の形式で表す。
///
/// 1分未満は`45s`、1時間未満は`2m0s`のように上位の0の単位は省略する。
pub fn format_duration(duration: Duration) -> String {
    let seconds = round_to_seconds(duration);
    if seconds == 0 {
        return "0s".to_string();
    }

    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.abs();
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, SecondsFormat, Utc};
    use rstest::rstest;

    use super::mock_datetime;
    use super::{format_duration, round_to_seconds};

    /// 何も設定しない場合は、現在時間が取得できることを確認する。
    ///
    ///  - 現在時刻での比較を行なっているため、ミリ秒単位まで比較するとテストが失敗する可能性があり、秒単位で比較している。
    #[test]
    fn test_now() {
        assert_eq!(
            mock_datetime::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    /// モック時間を設定した時に、その時間が取得できることを確認する。
    #[test]
    fn test_now_specific_datetime() {
        let datetime = String::from("2024-01-01T00:00:00+00:00");
        mock_datetime::set_mock_time(
            DateTime::parse_from_rfc3339(datetime.as_str())
                .unwrap()
                .to_utc(),
        );

        assert_eq!(mock_datetime::now().to_rfc3339(), datetime);
    }

    /// モック時間をリセットした時に、現在時間が取得できることを確認する。
    #[test]
    fn test_now_after_clear_mock_time() {
        let datetime = String::from("2024-01-01T00:00:00+00:00");
        mock_datetime::set_mock_time(
            DateTime::parse_from_rfc3339(datetime.as_str())
                .unwrap()
                .to_utc(),
        );
        mock_datetime::clear_mock_time();

        assert_eq!(
            mock_datetime::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    #[rstest]
    #[case::below_half(Duration::milliseconds(1499), 1)]
    #[case::half(Duration::milliseconds(1500), 2)]
    #[case::negative_half(Duration::milliseconds(-1500), -2)]
    #[case::zero(Duration::zero(), 0)]
    fn test_round_to_seconds(#[case] input: Duration, #[case] expected: i64) {
        assert_eq!(round_to_seconds(input), expected);
    }

    #[rstest]
    #[case::zero(Duration::milliseconds(400), "0s")]
    #[case::seconds(Duration::seconds(45), "45s")]
    #[case::minutes(Duration::seconds(120), "2m0s")]
    #[case::hours(Duration::seconds(3 * 3600 + 5), "3h0m5s")]
    #[case::rounded_up(Duration::milliseconds(59_600), "1m0s")]
    #[case::many_hours(Duration::hours(30) + Duration::minutes(1), "30h1m0s")]
    #[case::negative(Duration::seconds(-61), "-1m1s")]
    fn test_format_duration(#[case] input: Duration, #[case] expected: &str) {
        assert_eq!(format_duration(input), expected);
    }
}
