// ==========================================
// 考试日程查询工具 - 考试间隔计算
// ==========================================
// 职责: 计算相邻考试之间空闲的整天数（"距下一场考试还有 N 天"）
// 规则:
// - 同日多场: 间隔为 0
// - 12-05 → 12-08: 中间空闲 2 天
// - 任一方无日期 / 最后一条: None
// ==========================================

use crate::domain::exam::ExamEntry;

/// 两条相邻考试之间空闲的整天数
pub fn day_gap(current: &ExamEntry, next: &ExamEntry) -> Option<i64> {
    let current = current.calendar_date()?;
    let next = next.calendar_date()?;

    let diff = (next - current).num_days();
    // 不计考试当天本身
    Some((diff - 1).max(0))
}

/// 已排序日程中每条考试与下一条考试的间隔
///
/// 返回值与输入等长；最后一条为 None
pub fn day_gaps(schedule: &[ExamEntry]) -> Vec<Option<i64>> {
    schedule
        .iter()
        .enumerate()
        .map(|(idx, entry)| schedule.get(idx + 1).and_then(|next| day_gap(entry, next)))
        .collect()
}
