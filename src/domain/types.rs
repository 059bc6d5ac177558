// ==========================================
// 考试日程查询工具 - 领域类型定义
// ==========================================
// 职责: 场次 / 考试状态 / 规范字段 三类基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 场次 (Session)
// ==========================================
// 两值枚举 + 透传兜底: FN(上午) / AN(下午) / 其他
// 下游（排序、状态判定）必须显式处理 Other
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Session {
    Forenoon,      // FN
    Afternoon,     // AN
    Other(String), // 无法识别的场次（已清洗、大写）
}

impl Session {
    /// 从源字段值规范化场次
    ///
    /// 规则:
    /// 1) 大写 + 去掉所有 '.' + TRIM
    /// 2) "FN" / "F N" → FN
    /// 3) "AN" / "A N" → AN
    /// 4) 其他 → Other(清洗后的值)
    ///
    /// 不做通用的字母间空格折叠，只认上述字面变体
    pub fn normalize(raw: &str) -> Self {
        let cleaned = raw.to_uppercase().replace('.', "");
        let cleaned = cleaned.trim();

        match cleaned {
            "FN" | "F N" => Session::Forenoon,
            "AN" | "A N" => Session::Afternoon,
            other => Session::Other(other.to_string()),
        }
    }

    /// 规范代码
    pub fn code(&self) -> &str {
        match self {
            Session::Forenoon => "FN",
            Session::Afternoon => "AN",
            Session::Other(raw) => raw.as_str(),
        }
    }

    /// 同日排序键: FN=0, AN=1, 其他无固定顺序
    pub fn rank(&self) -> Option<u8> {
        match self {
            Session::Forenoon => Some(0),
            Session::Afternoon => Some(1),
            Session::Other(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Session::Other(_))
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::Other(String::new())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<Session> for String {
    fn from(session: Session) -> Self {
        session.code().to_string()
    }
}

// 反序列化时重新规范化（幂等: "FN" → FN）
impl From<String> for Session {
    fn from(raw: String) -> Self {
        Session::normalize(&raw)
    }
}

// ==========================================
// 考试状态 (Exam Status)
// ==========================================
// 四态互斥，判定优先级: Finished > Ongoing > Today > Upcoming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamStatus {
    Upcoming, // 未开始（日期在未来，或无法解析日期）
    Ongoing,  // 场次进行中
    Today,    // 当天，场次尚未开始
    Finished, // 场次已结束
}

impl ExamStatus {
    /// 国际化文案 key
    pub fn label_key(&self) -> &'static str {
        match self {
            ExamStatus::Upcoming => "status.upcoming",
            ExamStatus::Ongoing => "status.ongoing",
            ExamStatus::Today => "status.today",
            ExamStatus::Finished => "status.finished",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamStatus::Upcoming => write!(f, "UPCOMING"),
            ExamStatus::Ongoing => write!(f, "ONGOING"),
            ExamStatus::Today => write!(f, "TODAY"),
            ExamStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

// ==========================================
// 规范字段 (Canonical Field)
// ==========================================
// 每个规范字段对应一组有序的候选源字段名，按优先级依次尝试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    StudentName,
    RegisterNumber,
    Date,
    Session,
    Category,
    SubjectCode,
    SubjectName,
    Location,
}

impl CanonicalField {
    /// 候选源字段名（规范名 → camelCase 别名 → 其他已知别名）
    pub fn source_keys(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::StudentName => &["Student Name", "studentName"],
            CanonicalField::RegisterNumber => &["Register Number", "registerNumber"],
            CanonicalField::Date => &["Date", "date"],
            CanonicalField::Session => &["Slot", "session", "Session"],
            CanonicalField::Category => &["Category", "category"],
            CanonicalField::SubjectCode => &["Subject Code", "subjectCode"],
            CanonicalField::SubjectName => &["Subject Name", "subjectName"],
            CanonicalField::Location => &["Location", "roomHall", "Room / Hall"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 规范名即第一个候选源字段
        write!(f, "{}", self.source_keys()[0])
    }
}
