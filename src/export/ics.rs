// ==========================================
// 考试日程查询工具 - iCalendar 导出
// ==========================================
// 职责: 规范日程 → .ics 文本（RFC 5545）
// 规则:
// - 每个有日期的条目一个 VEVENT，时间取场次时间窗
// - 时间窗按配置时区解释，DTSTART/DTEND 写 UTC（...Z），不依赖 VTIMEZONE
// - 无日期条目跳过（warn 日志）
// - 文本值转义；行尾 CRLF；超过 75 字节折行
// ==========================================

use crate::config::session_windows::SessionWindows;
use crate::domain::exam::{ExamEntry, StudentIdentity};
use crate::export::error::{ExportError, ExportResult};
use crate::export::{local_to_utc, require_identity, UTC_FORMAT};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::Path;
use uuid::Uuid;

pub const PRODUCT_ID: &str = "-//ExamTrack Pro//EN";
const UID_DOMAIN: &str = "examtrackpro.com";
const MAX_LINE_OCTETS: usize = 75;

pub struct IcsExporter {
    windows: SessionWindows,
    zone: Tz,
}

impl IcsExporter {
    pub fn new(windows: SessionWindows, zone: Tz) -> Self {
        Self { windows, zone }
    }

    /// 建议文件名: {学号}_exam_calendar.ics
    pub fn file_name(identity: &StudentIdentity) -> String {
        format!("{}_exam_calendar.ics", identity.register_number)
    }

    /// 生成 .ics 文本
    ///
    /// # 参数
    /// - schedule: 已排序的规范日程
    /// - identity: 展示身份（日历名）
    /// - stamp: DTSTAMP（UTC）
    pub fn render(
        &self,
        schedule: &[ExamEntry],
        identity: &StudentIdentity,
        stamp: DateTime<Utc>,
    ) -> ExportResult<String> {
        if schedule.is_empty() {
            return Err(ExportError::EmptySchedule);
        }
        require_identity(identity)?;

        let mut lines: Vec<String> = vec![
            "BEGIN:VCALENDAR".into(),
            "VERSION:2.0".into(),
            format!("PRODID:{}", PRODUCT_ID),
            "CALSCALE:GREGORIAN".into(),
            "METHOD:PUBLISH".into(),
            format!("X-WR-CALNAME:{} - Exam Schedule", escape_text(&identity.name)),
            format!("X-WR-TIMEZONE:{}", self.zone.name()),
        ];

        let dtstamp = stamp.format(UTC_FORMAT).to_string();
        let mut written = 0usize;

        for (index, entry) in schedule.iter().enumerate() {
            let date = match entry.calendar_date() {
                Some(d) => d,
                None => {
                    tracing::warn!(
                        subject = %entry.subject_name,
                        original_date = %entry.original_date,
                        "考试日期无法解析，跳过日历事件"
                    );
                    continue;
                }
            };

            let window = self.windows.window_for(&entry.session);
            let (start, end) = match (
                local_to_utc(window.start_on(date), self.zone),
                local_to_utc(window.end_on(date), self.zone),
            ) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    tracing::warn!(subject = %entry.subject_name, "场次时间无法换算为 UTC，跳过日历事件");
                    continue;
                }
            };
            lines.extend(self.event_lines(index, entry, start, end, &dtstamp));
            written += 1;
        }

        lines.push("END:VCALENDAR".into());

        tracing::info!(
            register_number = %identity.register_number,
            events = written,
            skipped = schedule.len() - written,
            "日历导出完成"
        );

        let mut out = String::new();
        for line in lines {
            out.push_str(&fold_line(&line));
            out.push_str("\r\n");
        }
        Ok(out)
    }

    /// 写入文件
    pub fn write_to<P: AsRef<Path>>(
        &self,
        path: P,
        schedule: &[ExamEntry],
        identity: &StudentIdentity,
        stamp: DateTime<Utc>,
    ) -> ExportResult<()> {
        let content = self.render(schedule, identity, stamp)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn event_lines(
        &self,
        index: usize,
        entry: &ExamEntry,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        dtstamp: &str,
    ) -> Vec<String> {
        let description = [
            format!("Subject Code: {}", entry.subject_code),
            format!("Session: {}", entry.session),
            format!("Category: {}", entry.category),
        ]
        .iter()
        .map(|part| escape_text(part))
        .collect::<Vec<_>>()
        .join("\\n");

        vec![
            "BEGIN:VEVENT".into(),
            format!("UID:exam-{}-{}@{}", index, Uuid::new_v4(), UID_DOMAIN),
            format!("DTSTAMP:{}", dtstamp),
            format!("DTSTART:{}", start.format(UTC_FORMAT)),
            format!("DTEND:{}", end.format(UTC_FORMAT)),
            format!(
                "SUMMARY:{}",
                escape_text(&format!("{} ({})", entry.subject_name, entry.category))
            ),
            format!("DESCRIPTION:{}", description),
            format!("LOCATION:{}", escape_text(&entry.location)),
            "STATUS:CONFIRMED".into(),
            "SEQUENCE:0".into(),
            "BEGIN:VALARM".into(),
            "TRIGGER:-PT1H".into(),
            "ACTION:DISPLAY".into(),
            "DESCRIPTION:Exam in 1 hour".into(),
            "END:VALARM".into(),
            "END:VEVENT".into(),
        ]
    }
}

/// TEXT 值转义: \ ; , 换行
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// 折行: 每行不超过 75 字节，续行以一个空格开头，不拆分 UTF-8 字符
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut current = 0usize;
    // 续行的前导空格占 1 字节
    let mut limit = MAX_LINE_OCTETS;

    for c in line.chars() {
        let width = c.len_utf8();
        if current + width > limit {
            out.push_str("\r\n ");
            current = 0;
            limit = MAX_LINE_OCTETS - 1;
        }
        out.push(c);
        current += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Session;
    use chrono::TimeZone;

    fn entry(subject: &str, date: Option<&str>, session: Session) -> ExamEntry {
        ExamEntry {
            student_name: "Asha Rao".into(),
            register_number: "2021001".into(),
            date: date.map(|d| d.to_string()),
            original_date: date.unwrap_or_default().to_string(),
            session,
            category: "Theory".into(),
            subject_code: "CS101".into(),
            subject_name: subject.into(),
            location: "Hall A, Block 2".into(),
        }
    }

    fn identity() -> StudentIdentity {
        StudentIdentity {
            name: "Asha Rao".into(),
            register_number: "2021001".into(),
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_render_event_times_follow_session() {
        let exporter = IcsExporter::new(SessionWindows::default(), chrono_tz::Asia::Kolkata);
        let schedule = vec![
            entry("Maths", Some("2025-12-05"), Session::Forenoon),
            entry("Physics", Some("2025-12-05"), Session::Afternoon),
        ];

        let ics = exporter.render(&schedule, &identity(), stamp()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("X-WR-CALNAME:Asha Rao - Exam Schedule\r\n"));
        // IST = UTC+05:30
        assert!(ics.contains("DTSTART:20251205T033000Z\r\n"));
        assert!(ics.contains("DTEND:20251205T063000Z\r\n"));
        assert!(ics.contains("DTSTART:20251205T073000Z\r\n"));
        assert!(ics.contains("X-WR-TIMEZONE:Asia/Kolkata\r\n"));
        assert!(!ics.contains("TZID="));
        assert!(ics.contains("DTSTAMP:20251120T080000Z\r\n"));
        assert!(ics.contains("LOCATION:Hall A\\, Block 2\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn test_render_skips_undated_entries() {
        let exporter = IcsExporter::new(SessionWindows::default(), chrono_tz::Asia::Kolkata);
        let schedule = vec![
            entry("TBA", None, Session::Forenoon),
            entry("Maths", Some("2025-12-05"), Session::Other("XX".into())),
        ];

        let ics = exporter.render(&schedule, &identity(), stamp()).unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        // 无法识别的场次按 AN 时间窗
        assert!(ics.contains("DTSTART:20251205T073000Z\r\n"));
    }

    #[test]
    fn test_render_rejects_empty_and_missing_identity() {
        let exporter = IcsExporter::new(SessionWindows::default(), chrono_tz::Asia::Kolkata);
        assert!(matches!(
            exporter.render(&[], &identity(), stamp()),
            Err(ExportError::EmptySchedule)
        ));

        let schedule = vec![entry("Maths", Some("2025-12-05"), Session::Forenoon)];
        let nameless = StudentIdentity {
            name: " ".into(),
            register_number: "2021001".into(),
        };
        assert!(matches!(
            exporter.render(&schedule, &nameless, stamp()),
            Err(ExportError::MissingIdentity(_))
        ));
    }

    #[test]
    fn test_render_converts_configured_zone_to_utc() {
        let exporter = IcsExporter::new(SessionWindows::default(), chrono_tz::Europe::London);
        let schedule = vec![
            entry("Winter", Some("2025-12-05"), Session::Forenoon),
            entry("Summer", Some("2025-06-05"), Session::Forenoon),
        ];

        let ics = exporter.render(&schedule, &identity(), stamp()).unwrap();
        assert!(ics.contains("DTSTART:20251205T090000Z\r\n"));
        // BST = UTC+1
        assert!(ics.contains("DTSTART:20250605T080000Z\r\n"));
        assert!(!ics.contains("VTIMEZONE"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }

    #[test]
    fn test_fold_long_lines() {
        let line = format!("SUMMARY:{}", "x".repeat(200));
        let folded = fold_line(&line);

        for (i, part) in folded.split("\r\n").enumerate() {
            assert!(part.len() <= MAX_LINE_OCTETS);
            if i > 0 {
                assert!(part.starts_with(' '));
            }
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn test_fold_keeps_multibyte_chars_intact() {
        let line = format!("LOCATION:{}", "考场".repeat(40));
        let folded = fold_line(&line);
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(IcsExporter::file_name(&identity()), "2021001_exam_calendar.ics");
    }
}
