// ==========================================
// 考试日程查询工具 - Google 日历链接
// ==========================================
// 职责: 单个考试条目 → Google 日历事件模板 URL
// 参数: text / dates（UTC，start/end）/ details / location
// ==========================================

use crate::config::session_windows::SessionWindows;
use crate::domain::exam::ExamEntry;
use crate::export::error::{ExportError, ExportResult};
use crate::export::{local_to_utc, UTC_FORMAT};
use chrono_tz::Tz;
use url::Url;

pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// 生成 Google 日历模板链接
///
/// # 参数
/// - entry: 规范条目（必须有可解析日期）
/// - windows: 场次时间窗
/// - zone: 时间窗所在时区
///
/// # 返回
/// - 百分号编码后的完整 URL
pub fn google_calendar_url(
    entry: &ExamEntry,
    windows: &SessionWindows,
    zone: Tz,
) -> ExportResult<String> {
    let date = entry
        .calendar_date()
        .ok_or_else(|| ExportError::MissingDate(entry.subject_name.clone()))?;

    let window = windows.window_for(&entry.session);
    let start = local_to_utc(window.start_on(date), zone)
        .ok_or_else(|| ExportError::MissingDate(entry.subject_name.clone()))?;
    let end = local_to_utc(window.end_on(date), zone)
        .ok_or_else(|| ExportError::MissingDate(entry.subject_name.clone()))?;

    let text = format!("{} ({})", entry.subject_name, entry.category);
    let dates = format!("{}/{}", start.format(UTC_FORMAT), end.format(UTC_FORMAT));
    let details = format!(
        "Subject Code: {}\nSession: {}",
        entry.subject_code, entry.session
    );

    let url = Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", text.as_str()),
            ("dates", dates.as_str()),
            ("details", details.as_str()),
            ("location", entry.location.as_str()),
        ],
    )?;

    Ok(url.into())
}
