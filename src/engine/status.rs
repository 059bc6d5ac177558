// ==========================================
// 考试日程查询工具 - 考试状态判定引擎
// ==========================================
// 职责: 根据场次时间窗与当前时刻判定考试状态、计算剩余时间
// 输入: 规范考试条目 + 当前时刻（本地时间）
// 输出: ExamStatus / TimeRemaining
// 边界:
// - 无日期条目: Upcoming，不计算剩余时间
// - 无法识别的场次: 按 AN 时间窗（13:00-16:00）判定
// ==========================================

use crate::config::session_windows::SessionWindows;
use crate::domain::exam::ExamEntry;
use crate::domain::types::ExamStatus;
use chrono::NaiveDateTime;
use std::fmt;

// ==========================================
// TimeRemaining - 剩余时间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    /// 场次进行中，距结束的分钟数
    InSession { minutes: i64 },
    /// 尚未开考，距开考的时长
    UntilStart { days: i64, hours: i64, minutes: i64 },
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeRemaining::InSession { minutes } => {
                let hours = minutes / 60;
                let rem = minutes % 60;
                if hours > 0 {
                    write!(f, "{}h {}m left", hours, rem)
                } else {
                    write!(f, "{}m left", rem)
                }
            }
            // 只展示最大的一到两个单位
            TimeRemaining::UntilStart {
                days,
                hours,
                minutes,
            } => {
                if days > 0 {
                    write!(f, "{}d {}h left", days, hours)
                } else if hours > 0 {
                    write!(f, "{}h left", hours)
                } else {
                    write!(f, "{}m left", minutes)
                }
            }
        }
    }
}

// ==========================================
// StatusClassifier - 考试状态判定引擎
// ==========================================
pub struct StatusClassifier {
    windows: SessionWindows,
}

impl StatusClassifier {
    pub fn new(windows: SessionWindows) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &SessionWindows {
        &self.windows
    }

    /// 判定单个条目状态
    ///
    /// 优先级（命中即返回）:
    /// 1) now > 场次结束 → Finished
    /// 2) 场次开始 <= now <= 场次结束 → Ongoing
    /// 3) 考试日期 == 今天 → Today
    /// 4) 其他 → Upcoming
    pub fn classify(&self, entry: &ExamEntry, now: NaiveDateTime) -> ExamStatus {
        let date = match entry.calendar_date() {
            Some(d) => d,
            None => return ExamStatus::Upcoming,
        };

        let window = self.windows.window_for(&entry.session);
        let start = window.start_on(date);
        let end = window.end_on(date);

        if now > end {
            ExamStatus::Finished
        } else if now >= start {
            ExamStatus::Ongoing
        } else if date == now.date() {
            ExamStatus::Today
        } else {
            ExamStatus::Upcoming
        }
    }

    /// 场次是否已结束
    pub fn is_finished(&self, entry: &ExamEntry, now: NaiveDateTime) -> bool {
        self.classify(entry, now) == ExamStatus::Finished
    }

    /// 剩余时间
    ///
    /// - 场次进行中: 距结束的分钟数
    /// - 未开考: 距开考的 天/时/分
    /// - 已结束或无日期: None
    pub fn time_remaining(&self, entry: &ExamEntry, now: NaiveDateTime) -> Option<TimeRemaining> {
        let date = entry.calendar_date()?;
        let window = self.windows.window_for(&entry.session);
        let start = window.start_on(date);
        let end = window.end_on(date);

        if now > end {
            return None;
        }

        if now >= start {
            return Some(TimeRemaining::InSession {
                minutes: (end - now).num_minutes(),
            });
        }

        let total_minutes = (start - now).num_minutes();
        Some(TimeRemaining::UntilStart {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        })
    }

    /// 按是否结束拆分日程（保持原顺序）
    ///
    /// # 返回
    /// (未结束, 已结束)
    pub fn partition<'a>(
        &self,
        schedule: &'a [ExamEntry],
        now: NaiveDateTime,
    ) -> (Vec<&'a ExamEntry>, Vec<&'a ExamEntry>) {
        schedule
            .iter()
            .partition(|entry| !self.is_finished(entry, now))
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(SessionWindows::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Session;
    use chrono::NaiveDate;

    fn entry(date: Option<&str>, session: Session) -> ExamEntry {
        ExamEntry {
            student_name: "Asha Rao".into(),
            register_number: "2021001".into(),
            date: date.map(|d| d.to_string()),
            original_date: date.unwrap_or_default().to_string(),
            session,
            category: "Theory".into(),
            subject_code: "CS101".into(),
            subject_name: "Programming".into(),
            location: "Hall A".into(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // ==========================================
    // 状态判定
    // ==========================================

    #[test]
    fn test_forenoon_today_before_noon_not_finished() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Forenoon);

        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 7, 30)), ExamStatus::Today);
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 10, 0)), ExamStatus::Ongoing);
        // 结束时刻本身仍未结束
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 12, 0)), ExamStatus::Ongoing);
    }

    #[test]
    fn test_forenoon_after_noon_is_finished() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Forenoon);

        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 12, 1)), ExamStatus::Finished);
        assert_eq!(classifier.classify(&exam, at(2025, 12, 6, 0, 0)), ExamStatus::Finished);
    }

    #[test]
    fn test_afternoon_same_day_after_noon_still_today() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Afternoon);

        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 12, 30)), ExamStatus::Today);
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 16, 1)), ExamStatus::Finished);
    }

    #[test]
    fn test_future_date_is_upcoming() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-08"), Session::Forenoon);

        // 前一天深夜
        assert_eq!(classifier.classify(&exam, at(2025, 12, 7, 23, 59)), ExamStatus::Upcoming);
    }

    #[test]
    fn test_unrecognized_session_uses_afternoon_window() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Other("XX".into()));

        // FN 已结束的时刻，按 AN 时间窗仍未开始
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 12, 30)), ExamStatus::Today);
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 14, 0)), ExamStatus::Ongoing);
        assert_eq!(classifier.classify(&exam, at(2025, 12, 5, 16, 1)), ExamStatus::Finished);
    }

    #[test]
    fn test_missing_date_is_upcoming() {
        let classifier = StatusClassifier::default();
        let exam = entry(None, Session::Forenoon);

        assert_eq!(classifier.classify(&exam, at(2030, 1, 1, 0, 0)), ExamStatus::Upcoming);
        assert!(!classifier.is_finished(&exam, at(2030, 1, 1, 0, 0)));
        assert_eq!(classifier.time_remaining(&exam, at(2030, 1, 1, 0, 0)), None);
    }

    // ==========================================
    // 剩余时间
    // ==========================================

    #[test]
    fn test_time_remaining_in_session() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Forenoon);

        let remaining = classifier.time_remaining(&exam, at(2025, 12, 5, 10, 15)).unwrap();
        assert_eq!(remaining, TimeRemaining::InSession { minutes: 105 });
        assert_eq!(remaining.to_string(), "1h 45m left");

        let remaining = classifier.time_remaining(&exam, at(2025, 12, 5, 11, 20)).unwrap();
        assert_eq!(remaining.to_string(), "40m left");
    }

    #[test]
    fn test_time_remaining_before_start() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-08"), Session::Afternoon);

        let remaining = classifier.time_remaining(&exam, at(2025, 12, 5, 10, 0)).unwrap();
        assert_eq!(
            remaining,
            TimeRemaining::UntilStart {
                days: 3,
                hours: 3,
                minutes: 0
            }
        );
        assert_eq!(remaining.to_string(), "3d 3h left");

        let remaining = classifier.time_remaining(&exam, at(2025, 12, 8, 10, 30)).unwrap();
        assert_eq!(remaining.to_string(), "2h left");

        let remaining = classifier.time_remaining(&exam, at(2025, 12, 8, 12, 35)).unwrap();
        assert_eq!(remaining.to_string(), "25m left");
    }

    #[test]
    fn test_time_remaining_after_end() {
        let classifier = StatusClassifier::default();
        let exam = entry(Some("2025-12-05"), Session::Forenoon);

        assert_eq!(classifier.time_remaining(&exam, at(2025, 12, 5, 12, 1)), None);
    }

    #[test]
    fn test_partition_preserves_order() {
        let classifier = StatusClassifier::default();
        let schedule = vec![
            entry(Some("2025-12-01"), Session::Forenoon),
            entry(Some("2025-12-05"), Session::Forenoon),
            entry(Some("2025-12-05"), Session::Afternoon),
            entry(None, Session::Forenoon),
        ];

        let (pending, finished) = classifier.partition(&schedule, at(2025, 12, 5, 13, 0));
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].session, Session::Afternoon);
        assert_eq!(pending[1].date, None);
        assert_eq!(finished.len(), 2);
        assert_eq!(finished[0].date.as_deref(), Some("2025-12-01"));
    }
}
