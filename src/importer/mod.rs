// ==========================================
// 考试日程查询工具 - 导入层
// ==========================================
// 职责: 数据集读取 → 记录匹配 → 字段规范化
// 支持: JSON, CSV, Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod record_matcher;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use record_matcher::RecordMatcher;

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FieldMapper, FileParser};
