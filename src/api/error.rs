// ==========================================
// 考试日程查询工具 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/配置/导出错误转换为用户可读消息
// ==========================================

use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 查询错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 没有匹配记录（消息为展示给用户的提示）
    #[error("{0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据集读取失败: {0}")]
    DatasetError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_)
            | ImportError::JsonParseError(_)
            | ImportError::DatasetShapeError { .. } => ApiError::DatasetError(err.to_string()),

            ImportError::ConfigReadError { .. } | ImportError::ConfigValueError { .. } => {
                ApiError::ConfigError(err.to_string())
            }

            ImportError::DatabaseConnectionError(msg) | ImportError::DatabaseQueryError(msg) => {
                ApiError::DatabaseError(msg)
            }

            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
