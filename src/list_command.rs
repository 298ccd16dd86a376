use log::debug;

use crate::timeline::TimelineRepository;

pub struct ListCommand<'a, T: TimelineRepository> {
    timeline: &'a T,
}

impl<'a, T: TimelineRepository> ListCommand<'a, T> {
    /// 新しい`ListCommand`を返す。
    pub fn new(timeline: &'a T) -> Self {
        Self { timeline }
    }

    /// `list`サブコマンドの処理を行う。日毎にまとめたレポートを返す。
    pub fn run(&self) -> String {
        let report = self.timeline.report_format();
        debug!("Report has {} line(s)", report.lines().count());

        report
    }
}
