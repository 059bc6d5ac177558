// ==========================================
// 考试日程查询工具 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行调用
// ==========================================

pub mod error;
pub mod schedule_api;
pub mod settings_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use schedule_api::{ScheduleApi, ScheduleRow, ScheduleView};
pub use settings_api::SettingsApi;
