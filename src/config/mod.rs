// ==========================================
// 考试日程查询工具 - 配置层
// ==========================================
// 职责: 系统配置与界面偏好管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod session_windows;
pub mod settings_store;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_CALENDAR_TIMEZONE};
pub use session_windows::{SessionWindow, SessionWindows};
pub use settings_store::{SettingsStore, UiSettings};
