// ==========================================
// 考试日程查询工具 - 应用层
// ==========================================
// 职责: 进程级状态,连接命令行与 API
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
