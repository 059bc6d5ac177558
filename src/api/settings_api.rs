// ==========================================
// 考试日程查询工具 - 设置 API
// ==========================================
// 职责: 界面偏好与配置查询/更新
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::{ConfigManager, SessionWindows, SettingsStore, UiSettings};

pub struct SettingsApi {
    config_manager: Arc<ConfigManager>,
    settings: Arc<SettingsStore>,
}

impl SettingsApi {
    pub fn new(config_manager: Arc<ConfigManager>, settings: Arc<SettingsStore>) -> Self {
        Self {
            config_manager,
            settings,
        }
    }

    pub fn get_ui_settings(&self) -> UiSettings {
        self.settings.current()
    }

    pub fn set_dark_mode(&self, enabled: bool) -> ApiResult<UiSettings> {
        Ok(self.settings.set_dark_mode(enabled)?)
    }

    /// 切换深色模式，返回切换后的值
    pub fn toggle_dark_mode(&self) -> ApiResult<bool> {
        Ok(self.settings.toggle_dark_mode()?)
    }

    pub fn get_session_windows(&self) -> ApiResult<SessionWindows> {
        Ok(self.config_manager.get_session_windows()?)
    }

    pub fn update_session_windows(&self, windows: &SessionWindows) -> ApiResult<()> {
        self.config_manager.set_session_windows(windows)?;
        tracing::info!(
            forenoon = %windows.forenoon.label(),
            afternoon = %windows.afternoon.label(),
            "场次时间窗已更新"
        );
        Ok(())
    }

    pub fn get_calendar_timezone(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_calendar_timezone()?)
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }
}
