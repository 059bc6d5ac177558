// ==========================================
// 考试日程查询工具 - 记录匹配器
// ==========================================
// 职责: 从完整数据集中选出某学号的原始记录
// 规则:
// - 学号: TRIM + 字符串化后精确匹配（不做大小写折叠）
// - 姓名（可选）: TRIM + 小写 + 空白折叠后相等
// - 无匹配返回空列表，不报错
// ==========================================

use crate::domain::exam::{RawRecord, SearchQuery};
use crate::domain::types::CanonicalField;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct RecordMatcher {
    mapper: FieldMapper,
    cleaner: DataCleaner,
}

impl RecordMatcher {
    pub fn new() -> Self {
        Self {
            mapper: FieldMapper::new(),
            cleaner: DataCleaner,
        }
    }

    /// 选出匹配查询条件的记录（保持数据集原有顺序）
    pub fn match_records<'a>(
        &self,
        records: &'a [RawRecord],
        query: &SearchQuery,
    ) -> Vec<&'a RawRecord> {
        let identifier = query.identifier.trim();
        if identifier.is_empty() {
            return Vec::new();
        }

        let name_key = query
            .name
            .as_deref()
            .map(|n| self.cleaner.normalize_name(n))
            .filter(|n| !n.is_empty());

        let matched: Vec<&RawRecord> = records
            .iter()
            .filter(|record| self.identifier_matches(record, identifier))
            .filter(|record| match &name_key {
                Some(expected) => self.name_matches(record, expected),
                None => true,
            })
            .collect();

        tracing::debug!(
            identifier = identifier,
            name_filter = name_key.is_some(),
            matched = matched.len(),
            total = records.len(),
            "记录匹配完成"
        );

        matched
    }

    fn identifier_matches(&self, record: &RawRecord, identifier: &str) -> bool {
        self.mapper
            .resolve(record, CanonicalField::RegisterNumber)
            .map(|v| v.trim() == identifier)
            .unwrap_or(false)
    }

    fn name_matches(&self, record: &RawRecord, expected: &str) -> bool {
        let actual = self
            .mapper
            .resolve(record, CanonicalField::StudentName)
            .unwrap_or_default();
        self.cleaner.normalize_name(&actual) == expected
    }
}

impl Default for RecordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Vec<RawRecord> {
        vec![
            RawRecord::new()
                .with("Student Name", "Asha Rao")
                .with("Register Number", json!(2021001))
                .with("Subject Name", "Maths"),
            RawRecord::new()
                .with("Student Name", "Ravi K")
                .with("Register Number", "2021002")
                .with("Subject Name", "Physics"),
            RawRecord::new()
                .with("studentName", "  asha   rao ")
                .with("registerNumber", " 2021001 ")
                .with("subjectName", "Chemistry"),
            RawRecord::new()
                .with("Student Name", "Asha Rao")
                .with("Register Number", "RA2021001"),
        ]
    }

    #[test]
    fn test_match_by_identifier() {
        let matcher = RecordMatcher::new();
        let records = dataset();

        let matched = matcher.match_records(&records, &SearchQuery::by_identifier(" 2021001 "));
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].get_text("Subject Name"), Some("Maths".into()));
        assert_eq!(matched[1].get_text("subjectName"), Some("Chemistry".into()));
    }

    #[test]
    fn test_identifier_is_case_sensitive() {
        let matcher = RecordMatcher::new();
        let records = dataset();

        let matched = matcher.match_records(&records, &SearchQuery::by_identifier("ra2021001"));
        assert!(matched.is_empty());

        let matched = matcher.match_records(&records, &SearchQuery::by_identifier("RA2021001"));
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_unknown_identifier_returns_empty() {
        let matcher = RecordMatcher::new();
        let records = dataset();

        for id in ["9999", "", "   ", "20210"] {
            assert!(matcher
                .match_records(&records, &SearchQuery::by_identifier(id))
                .is_empty());
        }
    }

    #[test]
    fn test_name_filter_normalizes_whitespace_and_case() {
        let matcher = RecordMatcher::new();
        let records = dataset();

        let query = SearchQuery::by_identifier("2021001").with_name("ASHA  RAO");
        assert_eq!(matcher.match_records(&records, &query).len(), 2);

        let query = SearchQuery::by_identifier("2021001").with_name("Ravi K");
        assert!(matcher.match_records(&records, &query).is_empty());
    }

    #[test]
    fn test_blank_name_filter_is_ignored() {
        let matcher = RecordMatcher::new();
        let records = dataset();

        let query = SearchQuery::by_identifier("2021002").with_name("   ");
        assert_eq!(matcher.match_records(&records, &query).len(), 1);
    }
}
