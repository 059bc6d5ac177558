// ==========================================
// 考试日程查询工具 - 月历视图
// ==========================================
// 职责: 按日期分组考试、生成月历网格、月份前后翻页
// 说明: 无日期条目不落入任何格子
// ==========================================

use crate::domain::exam::ExamEntry;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// 按日历日期分组（保持组内原顺序）
pub fn group_by_date(schedule: &[ExamEntry]) -> BTreeMap<NaiveDate, Vec<&ExamEntry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&ExamEntry>> = BTreeMap::new();
    for entry in schedule {
        if let Some(date) = entry.calendar_date() {
            grouped.entry(date).or_default().push(entry);
        }
    }
    grouped
}

// ==========================================
// YearMonth - 月份游标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32, // 1-12
}

impl YearMonth {
    /// 年份限定在 NaiveDate 可表示范围内
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if (1..=12).contains(&month) && years.contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 解析 "YYYY-MM"
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        match (self.first_day(), self.next().first_day()) {
            (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
            // 最大年份的 12 月没有下一个月
            (Some(_), None) if self.month == 12 => 31,
            _ => 0,
        }
    }
}

// ==========================================
// MonthGrid - 月历网格
// ==========================================
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub month: YearMonth,
    pub days_in_month: u32,
    /// 1 号是星期几（周日 = 0）
    pub start_weekday: u32,
    /// 日 → 当天考试
    pub exams_by_day: BTreeMap<u32, Vec<&'a ExamEntry>>,
}

impl<'a> MonthGrid<'a> {
    pub fn build(schedule: &'a [ExamEntry], month: YearMonth) -> Self {
        let start_weekday = month
            .first_day()
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0);

        let exams_by_day = group_by_date(schedule)
            .into_iter()
            .filter(|(date, _)| YearMonth::of(*date) == month)
            .map(|(date, exams)| (date.day(), exams))
            .collect();

        Self {
            month,
            days_in_month: month.days_in_month(),
            start_weekday,
            exams_by_day,
        }
    }

    pub fn exams_on(&self, day: u32) -> &[&'a ExamEntry] {
        self.exams_by_day
            .get(&day)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        YearMonth::of(today) == self.month && today.day() == day
    }

    /// 网格行: 前导空格 + 日期，按周切分（None 为空格子）
    pub fn weeks(&self) -> Vec<Vec<Option<u32>>> {
        let mut cells: Vec<Option<u32>> = vec![None; self.start_weekday as usize];
        cells.extend((1..=self.days_in_month).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Session;

    fn entry(subject: &str, date: Option<&str>) -> ExamEntry {
        ExamEntry {
            student_name: String::new(),
            register_number: "2021001".into(),
            date: date.map(|d| d.to_string()),
            original_date: String::new(),
            session: Session::Forenoon,
            category: "Theory".into(),
            subject_code: String::new(),
            subject_name: subject.into(),
            location: String::new(),
        }
    }

    #[test]
    fn test_group_by_date_skips_undated() {
        let schedule = vec![
            entry("a", Some("2025-12-05")),
            entry("b", None),
            entry("c", Some("2025-12-05")),
        ];

        let grouped = group_by_date(&schedule);
        assert_eq!(grouped.len(), 1);
        let day = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert_eq!(grouped[&day].len(), 2);
        assert_eq!(grouped[&day][1].subject_name, "c");
    }

    #[test]
    fn test_year_month_navigation() {
        let dec = YearMonth::new(2025, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(YearMonth::new(2026, 1).unwrap().previous(), dec);
        assert_eq!(YearMonth::new(2025, 13), None);
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!(YearMonth::parse("2025-12"), YearMonth::new(2025, 12));
        assert_eq!(YearMonth::parse("2025-00"), None);
        assert_eq!(YearMonth::parse("december"), None);
    }

    #[test]
    fn test_year_month_rejects_out_of_range_years() {
        assert_eq!(YearMonth::parse("2147483647-12"), None);
        assert_eq!(YearMonth::new(i32::MIN, 1), None);

        let last = YearMonth::new(NaiveDate::MAX.year(), 12).unwrap();
        assert_eq!(last.days_in_month(), 31);
        assert_eq!(last.next().first_day(), None);

        let first = YearMonth::new(NaiveDate::MIN.year(), 1).unwrap();
        assert_eq!(first.days_in_month(), 31);
        assert_eq!(first.previous().first_day(), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2025, 12).unwrap().days_in_month(), 31);
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2025, 2).unwrap().days_in_month(), 28);
    }

    #[test]
    fn test_month_grid() {
        let schedule = vec![
            entry("a", Some("2025-12-05")),
            entry("b", Some("2025-11-28")),
            entry("c", Some("2025-12-31")),
        ];

        let grid = MonthGrid::build(&schedule, YearMonth::new(2025, 12).unwrap());
        // 2025-12-01 是周一
        assert_eq!(grid.start_weekday, 1);
        assert_eq!(grid.days_in_month, 31);
        assert_eq!(grid.exams_on(5).len(), 1);
        assert_eq!(grid.exams_on(28).len(), 0);
        assert_eq!(grid.exams_on(31)[0].subject_name, "c");

        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], None);
        assert_eq!(weeks[0][1], Some(1));
        assert_eq!(weeks[4][3], Some(31));
    }

    #[test]
    fn test_is_today() {
        let grid = MonthGrid::build(&[], YearMonth::new(2025, 12).unwrap());
        let today = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert!(grid.is_today(5, today));
        assert!(!grid.is_today(6, today));

        let other_month = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(!grid.is_today(5, other_month));
    }
}
