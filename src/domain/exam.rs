// ==========================================
// 考试日程查询工具 - 考试领域模型
// ==========================================
// 职责: 原始记录 / 规范考试条目 / 学生身份 / 查询条件
// ==========================================

use crate::domain::types::Session;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 规范日期格式
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// RawRecord - 原始记录
// ==========================================
// 无约束的键值映射，字段名不统一，字段可能缺失
// 值保留 JSON 原始类型（学号可能是数字）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构造辅助（测试 / 夹具用）
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 读取字段的字符串形式
    ///
    /// - 缺失 / null → None
    /// - 字符串 → 原样（不 TRIM）
    /// - 数字 / 布尔 → 字符串化（2021001 → "2021001"）
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(value_to_text)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

// CSV / Excel 解析结果均为字符串
impl From<HashMap<String, String>> for RawRecord {
    fn from(row: HashMap<String, String>) -> Self {
        let fields = row
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Self { fields }
    }
}

/// JSON 值 → 文本，数字统一为最短十进制表示
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                // 2021001.0 → "2021001"
                n.as_f64().map(|f| f.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}

// ==========================================
// ExamEntry - 规范考试条目
// ==========================================
// 由 FieldMapper 生成后不可变；排序产生新序列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEntry {
    // ===== 身份 =====
    pub student_name: String,    // 学生姓名（TRIM）
    pub register_number: String, // 学号（TRIM，字符串化，精确匹配键）

    // ===== 时间 =====
    pub date: Option<String>,  // YYYY-MM-DD；源值为空时为 None
    pub original_date: String, // 源日期值（兜底展示）
    pub session: Session,      // 场次

    // ===== 科目 =====
    pub category: String,     // 考试类别（Theory / Practical / Project ...）
    pub subject_code: String, // 科目代码
    pub subject_name: String, // 科目名称
    pub location: String,     // 考场
}

impl ExamEntry {
    /// 解析后的日历日期
    ///
    /// 日期字段是尽力转换的结果，不保证合法；无法解析时返回 None
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, CANONICAL_DATE_FORMAT).ok())
    }
}

// ==========================================
// StudentIdentity - 展示身份
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub name: String,
    pub register_number: String,
}

impl StudentIdentity {
    /// 取排序后第一条记录的姓名/学号
    pub fn from_schedule(schedule: &[ExamEntry]) -> Option<Self> {
        schedule.first().map(|entry| Self {
            name: entry.student_name.clone(),
            register_number: entry.register_number.clone(),
        })
    }
}

// ==========================================
// SearchQuery - 查询条件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub identifier: String,   // 学号（必填）
    pub name: Option<String>, // 姓名（可选二次过滤）
}

impl SearchQuery {
    pub fn by_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
