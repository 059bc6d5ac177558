// ==========================================
// 考试日程查询工具 - 日程查询 API
// ==========================================
// 职责: 查询管线 匹配 → 规范化 → 排序 → 展示身份
// 说明: 核心组件对“无匹配”返回空结果；NotFound 只在此处产生
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::exam::{ExamEntry, RawRecord, SearchQuery, StudentIdentity};
use crate::domain::types::ExamStatus;
use crate::engine::{day_gaps, ScheduleSorter, StatusClassifier};
use crate::i18n;
use crate::importer::{FieldMapper, FieldMapperImpl, RecordMatcher};

/// 查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub identity: StudentIdentity,
    pub entries: Vec<ExamEntry>,
}

/// 带状态的展示行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub entry: ExamEntry,
    pub status: ExamStatus,
    pub session_label: Option<String>,
    pub time_remaining: Option<String>,
    /// 与下一场之间的空闲天数（最后一场或日期缺失时为 None）
    pub gap_days: Option<i64>,
}

// ==========================================
// ScheduleApi - 日程查询 API
// ==========================================
pub struct ScheduleApi {
    matcher: RecordMatcher,
    mapper: FieldMapperImpl,
    sorter: ScheduleSorter,
}

impl ScheduleApi {
    pub fn new() -> Self {
        Self {
            matcher: RecordMatcher::new(),
            mapper: FieldMapperImpl::new(),
            sorter: ScheduleSorter::new(),
        }
    }

    /// 查询某学生的日程
    ///
    /// # 参数
    /// - dataset: 整个数据集（只读）
    /// - query: 学号（必填）+ 姓名（可选）
    ///
    /// # 返回
    /// - Ok(ScheduleView): 已排序日程与展示身份
    /// - Err(ApiError::InvalidInput): 学号为空，或给了姓名过滤但姓名为空
    /// - Err(ApiError::NotFound): 没有匹配记录
    #[instrument(skip(self, dataset, query), fields(identifier = %query.identifier, records = dataset.len()))]
    pub fn lookup(&self, dataset: &[RawRecord], query: &SearchQuery) -> ApiResult<ScheduleView> {
        validate_query(query)?;

        let matched = self.matcher.match_records(dataset, query);
        if matched.is_empty() {
            tracing::info!("未找到匹配记录");
            return Err(ApiError::NotFound(i18n::t("search.not_found")));
        }

        let entries: Vec<ExamEntry> = matched
            .into_iter()
            .map(|record| self.mapper.map_to_entry(record))
            .collect();
        let entries = self.sorter.sort(&entries);

        let identity = StudentIdentity::from_schedule(&entries)
            .ok_or_else(|| ApiError::InternalError("排序后日程为空".to_string()))?;

        tracing::info!(
            register_number = %identity.register_number,
            exams = entries.len(),
            "日程查询完成"
        );

        Ok(ScheduleView { identity, entries })
    }

    /// 按给定时刻为每条日程附加状态、剩余时间和间隔天数
    pub fn annotate(
        &self,
        view: &ScheduleView,
        classifier: &StatusClassifier,
        now: NaiveDateTime,
    ) -> Vec<ScheduleRow> {
        let gaps = day_gaps(&view.entries);

        view.entries
            .iter()
            .zip(gaps)
            .map(|(entry, gap_days)| ScheduleRow {
                entry: entry.clone(),
                status: classifier.classify(entry, now),
                session_label: classifier.windows().label_for(&entry.session),
                time_remaining: classifier
                    .time_remaining(entry, now)
                    .map(|remaining| remaining.to_string()),
                gap_days,
            })
            .collect()
    }
}

impl Default for ScheduleApi {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_query(query: &SearchQuery) -> ApiResult<()> {
    if query.identifier.trim().is_empty() {
        return Err(ApiError::InvalidInput(i18n::t("search.missing_identifier")));
    }
    if let Some(name) = &query.name {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput(i18n::t("search.missing_name")));
        }
    }
    Ok(())
}
