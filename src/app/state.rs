// ==========================================
// 考试日程查询工具 - 应用状态
// ==========================================
// 职责: 管理进程级共享状态（数据集、配置、界面偏好）和API实例
// ==========================================

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::api::{ApiError, ApiResult, ScheduleApi, ScheduleView, SettingsApi};
use crate::config::{ConfigManager, SettingsStore};
use crate::domain::exam::{ExamEntry, RawRecord, SearchQuery};
use crate::engine::StatusClassifier;
use crate::export::{google_calendar_url, parse_timezone, IcsExporter};
use crate::importer::UniversalFileParser;

/// 应用状态
///
/// 数据集加载后只读；查询不修改数据集
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 当前数据集
    dataset: RwLock<Vec<RawRecord>>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 界面偏好
    pub settings: Arc<SettingsStore>,

    /// 日程查询API
    pub schedule_api: Arc<ScheduleApi>,

    /// 设置API
    pub settings_api: Arc<SettingsApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 启动时加载界面偏好；数据集通过 load_dataset 单独加载
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let config_manager = Arc::new(
            ConfigManager::new(&db_path).map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let settings = Arc::new(
            SettingsStore::load(Arc::clone(&config_manager))
                .map_err(|e| format!("无法加载界面偏好: {}", e))?,
        );

        let schedule_api = Arc::new(ScheduleApi::new());
        let settings_api = Arc::new(SettingsApi::new(
            Arc::clone(&config_manager),
            Arc::clone(&settings),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            dataset: RwLock::new(Vec::new()),
            config_manager,
            settings,
            schedule_api,
            settings_api,
        })
    }

    /// 从文件加载数据集（替换当前数据集）
    pub fn load_dataset<P: AsRef<Path>>(&self, path: P) -> ApiResult<usize> {
        let records = UniversalFileParser.parse(path)?;
        let count = records.len();

        let mut guard = self
            .dataset
            .write()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))?;
        *guard = records;

        Ok(count)
    }

    pub fn dataset_len(&self) -> usize {
        self.dataset.read().map(|d| d.len()).unwrap_or(0)
    }

    /// 在当前数据集上查询
    pub fn lookup(&self, query: &SearchQuery) -> ApiResult<ScheduleView> {
        let guard = self
            .dataset
            .read()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))?;
        self.schedule_api.lookup(&guard, query)
    }

    /// 按当前配置构造状态判定引擎
    pub fn status_classifier(&self) -> ApiResult<StatusClassifier> {
        Ok(StatusClassifier::new(
            self.config_manager.get_session_windows()?,
        ))
    }

    /// 按当前配置构造日历导出器
    pub fn ics_exporter(&self) -> ApiResult<IcsExporter> {
        let zone = parse_timezone(&self.config_manager.get_calendar_timezone()?)?;
        Ok(IcsExporter::new(self.config_manager.get_session_windows()?, zone))
    }

    /// 日程中第一个有日期考试的 Google 日历链接
    ///
    /// # 返回
    /// - Some(url): 第一个有日期的条目
    /// - None: 所有条目都没有可解析日期
    pub fn google_calendar_link(&self, schedule: &[ExamEntry]) -> ApiResult<Option<String>> {
        let entry = match schedule.iter().find(|e| e.calendar_date().is_some()) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let zone = parse_timezone(&self.config_manager.get_calendar_timezone()?)?;
        let windows = self.config_manager.get_session_windows()?;
        Ok(Some(google_calendar_url(entry, &windows, zone)?))
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "EXAM_TRACK_DB";

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 EXAM_TRACK_DB（非空时）
/// - 否则: 用户数据目录/exam-track/exam_track.db
/// - 拿不到用户数据目录时: ./exam_track.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./exam_track.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("exam-track");
        // 目录创建失败时后续打开数据库会给出明确错误
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("exam_track.db");
    }

    path.to_string_lossy().to_string()
}
