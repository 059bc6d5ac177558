// ==========================================
// 考试日程查询工具 - 导出层
// ==========================================
// 职责: 日历文件 (.ics)、Google 日历链接与时间表 (CSV)
// 时间: 场次时间按配置时区解释，统一换算为 UTC 输出
// ==========================================

pub mod error;
pub mod google_calendar;
pub mod ics;
pub mod timetable;

pub use error::{ExportError, ExportResult};
pub use google_calendar::google_calendar_url;
pub use ics::IcsExporter;
pub use timetable::{format_display_date, TimetableExporter, TimetableRow, TIMETABLE_HEADERS};

use crate::domain::exam::StudentIdentity;
use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// UTC 时间戳格式（iCalendar / Google 日历通用）
pub(crate) const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// 导出前校验身份信息完整
pub(crate) fn require_identity(identity: &StudentIdentity) -> ExportResult<()> {
    if identity.name.trim().is_empty() {
        return Err(ExportError::MissingIdentity("name".to_string()));
    }
    if identity.register_number.trim().is_empty() {
        return Err(ExportError::MissingIdentity("register_number".to_string()));
    }
    Ok(())
}

/// 解析 IANA 时区名（如 Asia/Kolkata）
pub fn parse_timezone(value: &str) -> ExportResult<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|e| ExportError::InvalidTimezone(format!("{}: {}", value, e)))
}

/// 本地时间 → UTC
///
/// 夏令时重叠取较早时刻；落在跳过区间时返回 None
pub(crate) fn local_to_utc(local: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            tracing::warn!(%local, zone = %zone.name(), "本地时间在该时区不存在");
            None
        }
    }
}
