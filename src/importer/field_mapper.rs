// ==========================================
// 考试日程查询工具 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 规范字段映射 + 日期/场次规范化
// 别名表: CanonicalField::source_keys（按优先级排列）
// ==========================================

use crate::domain::exam::{ExamEntry, RawRecord};
use crate::domain::types::CanonicalField;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 按候选源字段顺序取第一个存在的值（null 视为缺失）
    ///
    /// 返回原始值（未 TRIM）
    pub fn resolve(&self, record: &RawRecord, field: CanonicalField) -> Option<String> {
        field
            .source_keys()
            .iter()
            .find_map(|key| record.get_text(key))
    }

    /// 取字段并 TRIM，缺失 → 空字符串
    fn get_string(&self, record: &RawRecord, field: CanonicalField) -> String {
        self.resolve(record, field)
            .map(|v| self.cleaner.clean_text(&v))
            .unwrap_or_default()
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_entry(&self, record: &RawRecord) -> ExamEntry {
        let original_date = self
            .resolve(record, CanonicalField::Date)
            .unwrap_or_default();
        let raw_session = self
            .resolve(record, CanonicalField::Session)
            .unwrap_or_default();

        let entry = ExamEntry {
            // 身份
            student_name: self.get_string(record, CanonicalField::StudentName),
            register_number: self.get_string(record, CanonicalField::RegisterNumber),

            // 时间
            date: self.cleaner.convert_date(&original_date),
            original_date,
            session: self.cleaner.normalize_session(&raw_session),

            // 科目
            category: self.get_string(record, CanonicalField::Category),
            subject_code: self.get_string(record, CanonicalField::SubjectCode),
            subject_name: self.get_string(record, CanonicalField::SubjectName),
            location: self.get_string(record, CanonicalField::Location),
        };

        if !entry.session.is_recognized() && !entry.session.code().is_empty() {
            tracing::debug!(
                register_number = %entry.register_number,
                session = %entry.session,
                "无法识别的场次，原样透传"
            );
        }

        entry
    }
}
