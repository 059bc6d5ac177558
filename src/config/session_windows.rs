// ==========================================
// 考试日程查询工具 - 场次时间窗配置
// ==========================================
// 默认: FN 09:00-12:00 / AN 13:00-16:00（本地时间）
// 无法识别的场次按 AN 时间窗处理
// ==========================================

use crate::domain::types::Session;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// 单个场次时间窗（整点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl SessionWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 23
    }

    pub fn start_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.start_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn end_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.end_hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// 某日的开考时刻
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start_time())
    }

    /// 某日的结束时刻
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.end_time())
    }

    /// 展示文案，例如 "9:00 AM - 12:00 PM"
    pub fn label(&self) -> String {
        format!("{} - {}", format_hour(self.start_hour), format_hour(self.end_hour))
    }
}

fn format_hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display, suffix)
}

/// FN / AN 时间窗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindows {
    pub forenoon: SessionWindow,
    pub afternoon: SessionWindow,
}

impl Default for SessionWindows {
    fn default() -> Self {
        Self {
            forenoon: SessionWindow::new(9, 12),
            afternoon: SessionWindow::new(13, 16),
        }
    }
}

impl SessionWindows {
    /// 场次对应时间窗
    ///
    /// Other 场次按 AN 时间窗处理（兜底约定）
    pub fn window_for(&self, session: &Session) -> SessionWindow {
        match session {
            Session::Forenoon => self.forenoon,
            Session::Afternoon => self.afternoon,
            Session::Other(_) => self.afternoon,
        }
    }

    /// 场次时间文案；无法识别的场次不展示
    pub fn label_for(&self, session: &Session) -> Option<String> {
        match session {
            Session::Forenoon => Some(self.forenoon.label()),
            Session::Afternoon => Some(self.afternoon.label()),
            Session::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let windows = SessionWindows::default();
        assert_eq!(windows.forenoon, SessionWindow::new(9, 12));
        assert_eq!(windows.afternoon, SessionWindow::new(13, 16));
    }

    #[test]
    fn test_other_session_uses_afternoon_window() {
        let windows = SessionWindows::default();
        assert_eq!(
            windows.window_for(&Session::Other("XX".into())),
            windows.afternoon
        );
    }

    #[test]
    fn test_labels() {
        let windows = SessionWindows::default();
        assert_eq!(
            windows.label_for(&Session::Forenoon),
            Some("9:00 AM - 12:00 PM".to_string())
        );
        assert_eq!(
            windows.label_for(&Session::Afternoon),
            Some("1:00 PM - 4:00 PM".to_string())
        );
        assert_eq!(windows.label_for(&Session::Other("XX".into())), None);
    }

    #[test]
    fn test_window_validity() {
        assert!(SessionWindow::new(9, 12).is_valid());
        assert!(!SessionWindow::new(12, 9).is_valid());
        assert!(!SessionWindow::new(9, 24).is_valid());
    }
}
