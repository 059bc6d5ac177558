// ==========================================
// 考试日程查询工具 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::session_windows::{SessionWindow, SessionWindows};
use crate::db::open_sqlite_connection;
use crate::importer::error::{ImportError, ImportResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 默认日历时区（导出 .ics 使用）
pub const DEFAULT_CALENDAR_TIMEZONE: &str = "Asia/Kolkata";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在则创建）
    pub fn new(db_path: &str) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ImportError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ImportResult<Self> {
        {
            let guard = lock(&conn)?;
            crate::db::configure_sqlite_connection(&guard)?;
            crate::db::ensure_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let conn = lock(&self.conn)?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ImportError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ImportResult<()> {
        let conn = lock(&self.conn)?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::debug!(key = key, value = value, "配置已写入");
        Ok(())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有 global 配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        let conn = lock(&self.conn)?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    // ===== 场次时间窗 =====

    /// 获取 FN / AN 时间窗
    ///
    /// 配置缺失、格式错误或区间非法时回落到默认值（warn 日志，不报错）
    pub fn get_session_windows(&self) -> ImportResult<SessionWindows> {
        let defaults = SessionWindows::default();

        let forenoon = self.read_window(
            config_keys::SESSION_FN_START_HOUR,
            config_keys::SESSION_FN_END_HOUR,
            defaults.forenoon,
        )?;
        let afternoon = self.read_window(
            config_keys::SESSION_AN_START_HOUR,
            config_keys::SESSION_AN_END_HOUR,
            defaults.afternoon,
        )?;

        Ok(SessionWindows {
            forenoon,
            afternoon,
        })
    }

    fn read_window(
        &self,
        start_key: &str,
        end_key: &str,
        default: SessionWindow,
    ) -> ImportResult<SessionWindow> {
        let start = self.read_hour(start_key, default.start_hour)?;
        let end = self.read_hour(end_key, default.end_hour)?;
        let window = SessionWindow::new(start, end);

        if window.is_valid() {
            Ok(window)
        } else {
            tracing::warn!(
                start_key = start_key,
                end_key = end_key,
                start = start,
                end = end,
                "场次时间窗非法，使用默认值"
            );
            Ok(default)
        }
    }

    fn read_hour(&self, key: &str, default: u32) -> ImportResult<u32> {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<u32>() {
            Ok(hour) => Ok(hour),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    "小时配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 保存 FN / AN 时间窗
    pub fn set_session_windows(&self, windows: &SessionWindows) -> ImportResult<()> {
        for window in [windows.forenoon, windows.afternoon] {
            if !window.is_valid() {
                return Err(ImportError::ConfigValueError {
                    key: "session".to_string(),
                    value: format!("{}-{}", window.start_hour, window.end_hour),
                    message: "开始时间必须早于结束时间".to_string(),
                });
            }
        }

        let pairs = [
            (config_keys::SESSION_FN_START_HOUR, windows.forenoon.start_hour),
            (config_keys::SESSION_FN_END_HOUR, windows.forenoon.end_hour),
            (config_keys::SESSION_AN_START_HOUR, windows.afternoon.start_hour),
            (config_keys::SESSION_AN_END_HOUR, windows.afternoon.end_hour),
        ];
        for (key, hour) in pairs {
            self.set_global_config_value(key, &hour.to_string())?;
        }
        Ok(())
    }

    // ===== 日历导出 =====

    /// 获取日历时区（默认 Asia/Kolkata）
    pub fn get_calendar_timezone(&self) -> ImportResult<String> {
        let value =
            self.get_config_or_default(config_keys::CALENDAR_TIMEZONE, DEFAULT_CALENDAR_TIMEZONE)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(DEFAULT_CALENDAR_TIMEZONE.to_string());
        }
        Ok(trimmed.to_string())
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> ImportResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 场次时间窗（整点）
    pub const SESSION_FN_START_HOUR: &str = "session.fn.start_hour";
    pub const SESSION_FN_END_HOUR: &str = "session.fn.end_hour";
    pub const SESSION_AN_START_HOUR: &str = "session.an.start_hour";
    pub const SESSION_AN_END_HOUR: &str = "session.an.end_hour";

    // 日历导出
    pub const CALENDAR_TIMEZONE: &str = "calendar.timezone";

    // 界面偏好
    pub const UI_DARK_MODE: &str = "ui.dark_mode";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = in_memory();
        assert_eq!(config.get_session_windows().unwrap(), SessionWindows::default());
        assert_eq!(config.get_calendar_timezone().unwrap(), "Asia/Kolkata");
    }

    #[test]
    fn test_set_and_get_value() {
        let config = in_memory();
        config.set_global_config_value("calendar.timezone", "UTC").unwrap();
        assert_eq!(config.get_calendar_timezone().unwrap(), "UTC");

        // UPSERT 覆盖
        config.set_global_config_value("calendar.timezone", "Asia/Dubai").unwrap();
        assert_eq!(config.get_calendar_timezone().unwrap(), "Asia/Dubai");
    }

    #[test]
    fn test_session_windows_roundtrip() {
        let config = in_memory();
        let windows = SessionWindows {
            forenoon: SessionWindow::new(10, 13),
            afternoon: SessionWindow::new(14, 17),
        };
        config.set_session_windows(&windows).unwrap();
        assert_eq!(config.get_session_windows().unwrap(), windows);
    }

    #[test]
    fn test_malformed_hour_falls_back() {
        let config = in_memory();
        config
            .set_global_config_value(config_keys::SESSION_FN_START_HOUR, "nine")
            .unwrap();
        config
            .set_global_config_value(config_keys::SESSION_AN_START_HOUR, "18")
            .unwrap();

        let windows = config.get_session_windows().unwrap();
        assert_eq!(windows.forenoon, SessionWindow::new(9, 12));
        // 18 > 16 非法区间，整体回落
        assert_eq!(windows.afternoon, SessionWindow::new(13, 16));
    }

    #[test]
    fn test_reject_invalid_window_on_save() {
        let config = in_memory();
        let windows = SessionWindows {
            forenoon: SessionWindow::new(12, 9),
            afternoon: SessionWindow::new(13, 16),
        };
        assert!(matches!(
            config.set_session_windows(&windows),
            Err(ImportError::ConfigValueError { .. })
        ));
    }

    #[test]
    fn test_config_snapshot() {
        let config = in_memory();
        config.set_global_config_value("b", "2").unwrap();
        config.set_global_config_value("a", "1").unwrap();

        let snapshot = config.get_config_snapshot().unwrap();
        assert_eq!(snapshot, r#"{"a":"1","b":"2"}"#);
    }
}
