// ==========================================
// 考试日程查询工具 - 导入层 Trait
// ==========================================
// 职责: 定义数据集读取 / 字段映射 / 数据清洗接口（不包含实现）
// ==========================================

use crate::domain::exam::{ExamEntry, RawRecord};
use crate::domain::types::Session;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 数据集读取（静态数据集的外部协作者）
// 实现者: JsonParser, CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始记录列表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 原始记录（已跳过完全空白的行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始记录 → 规范考试条目
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 映射一条原始记录
    ///
    /// 不会失败: 缺失字段 → 空字符串，日期/场次降级为兜底值
    fn map_to_entry(&self, record: &RawRecord) -> ExamEntry;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单值清洗规则
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// TRIM
    fn clean_text(&self, value: &str) -> String;

    /// 姓名比较键: TRIM + 小写 + 连续空白折叠为一个空格
    fn normalize_name(&self, value: &str) -> String;

    /// 日期转换: DD.MM.YYYY → YYYY-MM-DD，其他格式透传，空值 → None
    fn convert_date(&self, value: &str) -> Option<String>;

    /// 场次规范化
    fn normalize_session(&self, value: &str) -> Session;
}
