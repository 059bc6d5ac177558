// ==========================================
// 考试日程查询工具 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("没有可导出的考试日程")]
    EmptySchedule,

    #[error("学生信息缺失: {0}")]
    MissingIdentity(String),

    #[error("文件写入失败: {0}")]
    WriteError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("无效的日历时区: {0}")]
    InvalidTimezone(String),

    #[error("考试日期缺失或无法解析: {0}")]
    MissingDate(String),

    #[error("链接生成失败: {0}")]
    LinkError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

impl From<url::ParseError> for ExportError {
    fn from(err: url::ParseError) -> Self {
        ExportError::LinkError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
