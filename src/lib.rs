// ==========================================
// 考试日程查询工具 - 核心库
// ==========================================
// 管线: 记录匹配 → 字段规范化 → 日程排序 → 状态判定
// 技术栈: Rust + SQLite（配置） + JSON/CSV/Excel 数据集
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排序 / 状态 / 间隔 / 月历
pub mod engine;

// 导入层 - 数据集读取与规范化
pub mod importer;

// 导出层 - 日历与时间表
pub mod export;

// 配置层 - 系统配置与界面偏好
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 进程级状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CanonicalField, ExamStatus, Session};

// 领域实体
pub use domain::{ExamEntry, RawRecord, SearchQuery, StudentIdentity};

// 引擎
pub use engine::{MonthGrid, ScheduleSorter, StatusClassifier, TimeRemaining, YearMonth};

// 导入
pub use importer::{FieldMapperImpl, RecordMatcher};

// API
pub use api::{ApiError, ScheduleApi, ScheduleView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ExamTrack Pro";
