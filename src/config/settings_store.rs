// ==========================================
// 考试日程查询工具 - 界面偏好存储
// ==========================================
// 职责: 进程级界面偏好（深色模式）
// 生命周期: 启动时 load() 一次；每次修改立即写回 config_kv
// ==========================================

use crate::config::config_manager::{config_keys, ConfigManager};
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// 界面偏好快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiSettings {
    pub dark_mode: bool,
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

// ==========================================
// SettingsStore - 界面偏好存储
// ==========================================
pub struct SettingsStore {
    config: Arc<ConfigManager>,
    current: RwLock<UiSettings>,
}

impl SettingsStore {
    /// 启动时加载偏好；未保存过则使用默认值（浅色）
    pub fn load(config: Arc<ConfigManager>) -> ImportResult<Self> {
        let dark_mode = config
            .get_global_config_value(config_keys::UI_DARK_MODE)?
            .map(|v| is_true(&v))
            .unwrap_or(false);

        tracing::info!(dark_mode = dark_mode, "界面偏好已加载");

        Ok(Self {
            config,
            current: RwLock::new(UiSettings { dark_mode }),
        })
    }

    /// 当前偏好
    pub fn current(&self) -> UiSettings {
        self.current.read().map(|s| *s).unwrap_or_default()
    }

    pub fn dark_mode(&self) -> bool {
        self.current().dark_mode
    }

    /// 设置深色模式并立即保存
    pub fn set_dark_mode(&self, enabled: bool) -> ImportResult<UiSettings> {
        self.config.set_global_config_value(
            config_keys::UI_DARK_MODE,
            if enabled { "true" } else { "false" },
        )?;

        let mut guard = self
            .current
            .write()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))?;
        guard.dark_mode = enabled;

        tracing::info!(dark_mode = enabled, "界面偏好已保存");
        Ok(*guard)
    }

    /// 切换深色模式并保存，返回切换后的值
    pub fn toggle_dark_mode(&self) -> ImportResult<bool> {
        let next = !self.dark_mode();
        self.set_dark_mode(next)?;
        Ok(next)
    }
}
