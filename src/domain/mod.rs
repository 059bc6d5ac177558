// ==========================================
// 考试日程查询工具 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod exam;
pub mod types;

// 重导出核心类型
pub use exam::{ExamEntry, RawRecord, SearchQuery, StudentIdentity, CANONICAL_DATE_FORMAT};
pub use types::{CanonicalField, ExamStatus, Session};
