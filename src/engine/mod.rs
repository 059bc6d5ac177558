// ==========================================
// 考试日程查询工具 - 引擎层
// ==========================================
// 职责: 排序 / 状态判定 / 间隔计算 / 月历
// 红线: 纯同步计算,不读文件,不访问数据库
// ==========================================

pub mod calendar;
pub mod schedule_sorter;
pub mod status;
pub mod timeline;

// 重导出核心引擎
pub use calendar::{group_by_date, MonthGrid, YearMonth};
pub use schedule_sorter::ScheduleSorter;
pub use status::{StatusClassifier, TimeRemaining};
pub use timeline::{day_gap, day_gaps};
