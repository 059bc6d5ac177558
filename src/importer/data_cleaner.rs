// ==========================================
// 考试日程查询工具 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 姓名折叠 / 日期转换 / 场次规范化
// ==========================================

use crate::domain::types::Session;
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_name(&self, value: &str) -> String {
        value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    fn convert_date(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        match self.split_dotted_date(trimmed) {
            Some((day, month, year)) => Some(format!("{}-{:0>2}-{:0>2}", year, month, day)),
            // 非 DD.MM.YYYY 视为已是规范格式，不做校验
            None => Some(trimmed.to_string()),
        }
    }

    fn normalize_session(&self, value: &str) -> Session {
        Session::normalize(value)
    }
}

impl DataCleaner {
    /// 拆分 DD.MM.YYYY（三段、全数字）
    fn split_dotted_date<'a>(&self, value: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        let all_numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if !all_numeric {
            return None;
        }

        Some((parts[0], parts[1], parts[2]))
    }
}
