// ==========================================
// 考试日程查询工具 - 时间表导出
// ==========================================
// 职责: 规范日程 → 时间表行 → CSV
// 列: DAY / DATE, SESSION, MODE, SUBJECT, HALL
// ==========================================

use crate::domain::exam::{ExamEntry, StudentIdentity};
use crate::export::error::{ExportError, ExportResult};
use crate::export::require_identity;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const TIMETABLE_HEADERS: [&str; 5] = ["DAY / DATE", "SESSION", "MODE", "SUBJECT", "HALL"];

const DISPLAY_DATE_FORMAT: &str = "%a, %d %b %Y";
const FALLBACK_DATE_CHARS: usize = 20;
const NOT_AVAILABLE: &str = "N/A";

/// 时间表一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableRow {
    #[serde(rename = "DAY / DATE")]
    pub day_date: String,
    #[serde(rename = "SESSION")]
    pub session: String,
    #[serde(rename = "MODE")]
    pub mode: String,
    #[serde(rename = "SUBJECT")]
    pub subject: String,
    #[serde(rename = "HALL")]
    pub hall: String,
}

impl TimetableRow {
    pub fn from_entry(entry: &ExamEntry) -> Self {
        Self {
            day_date: format_display_date(entry),
            session: entry.session.to_string(),
            mode: entry.category.clone(),
            subject: subject_cell(entry),
            hall: entry.location.clone(),
        }
    }
}

/// 科目列: "代码 - 名称"，只连接非空部分
fn subject_cell(entry: &ExamEntry) -> String {
    [entry.subject_code.trim(), entry.subject_name.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" - ")
}

/// 展示日期: "Fri, 05 Dec 2025"
///
/// 无法解析时回落到源值（最多 20 字符），源值为空时为 "N/A"
pub fn format_display_date(entry: &ExamEntry) -> String {
    if let Some(date) = entry.calendar_date() {
        return date.format(DISPLAY_DATE_FORMAT).to_string();
    }

    let raw = entry
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(entry.original_date.as_str())
        .trim();

    if raw.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        raw.chars().take(FALLBACK_DATE_CHARS).collect()
    }
}

pub fn build_rows(schedule: &[ExamEntry]) -> Vec<TimetableRow> {
    schedule.iter().map(TimetableRow::from_entry).collect()
}

// ==========================================
// TimetableExporter - CSV 时间表
// ==========================================
#[derive(Debug, Default)]
pub struct TimetableExporter;

impl TimetableExporter {
    pub fn new() -> Self {
        Self
    }

    /// 建议文件名: {学号}_exam_schedule.csv
    pub fn file_name(identity: &StudentIdentity) -> String {
        format!("{}_exam_schedule.csv", identity.register_number)
    }

    /// 写出 CSV（首行为表头）
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
        schedule: &[ExamEntry],
        identity: &StudentIdentity,
    ) -> ExportResult<usize> {
        if schedule.is_empty() {
            return Err(ExportError::EmptySchedule);
        }
        require_identity(identity)?;

        let mut wtr = csv::Writer::from_writer(writer);
        let rows = build_rows(schedule);
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        tracing::info!(
            register_number = %identity.register_number,
            rows = rows.len(),
            "时间表导出完成"
        );
        Ok(rows.len())
    }

    pub fn to_csv_string(
        &self,
        schedule: &[ExamEntry],
        identity: &StudentIdentity,
    ) -> ExportResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf, schedule, identity)?;
        String::from_utf8(buf).map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }

    pub fn write_to<P: AsRef<Path>>(
        &self,
        path: P,
        schedule: &[ExamEntry],
        identity: &StudentIdentity,
    ) -> ExportResult<usize> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file, schedule, identity)
    }
}
