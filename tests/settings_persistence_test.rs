// ==========================================
// 配置与界面偏好持久化集成测试
// ==========================================
// 测试目标: 重新打开数据库后配置与深色模式仍然有效
// ==========================================


use exam_track::app::AppState;
use exam_track::config::{config_keys, ConfigManager, SessionWindow, SessionWindows};
use exam_track::db::{open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use test_helpers::create_test_db;

#[test]
fn test_dark_mode_survives_restart() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    {
        let state = AppState::new(db_path.clone()).expect("Failed to create AppState");
        assert!(!state.settings.dark_mode());
        assert!(state.settings_api.toggle_dark_mode().unwrap());
    }

    let state = AppState::new(db_path).expect("Failed to reopen AppState");
    assert!(state.settings.dark_mode());
}

#[test]
fn test_session_windows_survive_restart() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let windows = SessionWindows {
        forenoon: SessionWindow::new(8, 11),
        afternoon: SessionWindow::new(12, 15),
    };

    {
        let config = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
        config.set_session_windows(&windows).unwrap();
        config
            .set_global_config_value(config_keys::CALENDAR_TIMEZONE, "Asia/Dubai")
            .unwrap();
    }

    let config = ConfigManager::new(&db_path).expect("Failed to reopen ConfigManager");
    assert_eq!(config.get_session_windows().unwrap(), windows);
    assert_eq!(config.get_calendar_timezone().unwrap(), "Asia/Dubai");

    let snapshot: serde_json::Value =
        serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot["session.fn.start_hour"], "8");
    assert_eq!(snapshot["calendar.timezone"], "Asia/Dubai");
}

#[test]
fn test_schema_created_on_open() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_sqlite_connection(&db_path).unwrap();
    assert_eq!(
        read_schema_version(&conn).unwrap(),
        Some(CURRENT_SCHEMA_VERSION)
    );
}
