// ==========================================
// 考试日程查询工具 - 日程排序引擎
// ==========================================
// 职责: 规范考试条目按 (日期, 场次) 排序
// 输入: 规范化后的考试条目（只读）
// 输出: 新的有序序列（不原地修改输入）
// ==========================================

use crate::domain::exam::ExamEntry;

// ==========================================
// ScheduleSorter - 日程排序引擎
// ==========================================
pub struct ScheduleSorter {
    // 无状态引擎,不需要注入依赖
}

impl ScheduleSorter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 排序考试条目
    ///
    /// 排序键:
    /// 1) 日历日期升序；无日期（或无法解析）视为最早，排在最前
    /// 2) 同日内 FN 严格先于 AN
    /// 3) 其他场次与 FN/AN 均视为相等，保持原位置
    ///
    /// 第 3 条不构成全序，因此不能直接交给 sort_by:
    /// 同日分组内只在 FN/AN 条目占据的位置之间重排，Other 条目位置不动
    pub fn sort(&self, entries: &[ExamEntry]) -> Vec<ExamEntry> {
        let mut sorted = entries.to_vec();

        // 稳定排序: None < Some(date)
        sorted.sort_by_key(|e| e.calendar_date());

        let mut start = 0;
        while start < sorted.len() {
            let day = sorted[start].calendar_date();
            let run_len = sorted[start..]
                .iter()
                .take_while(|e| e.calendar_date() == day)
                .count();
            let end = start + run_len;

            self.order_sessions(&mut sorted[start..end]);
            start = end;
        }

        sorted
    }

    /// 同日分组内按场次重排（稳定）
    fn order_sessions(&self, run: &mut [ExamEntry]) {
        let slots: Vec<usize> = run
            .iter()
            .enumerate()
            .filter(|(_, e)| e.session.rank().is_some())
            .map(|(idx, _)| idx)
            .collect();

        if slots.len() < 2 {
            return;
        }

        let mut recognized: Vec<ExamEntry> = slots.iter().map(|&idx| run[idx].clone()).collect();
        recognized.sort_by_key(|e| e.session.rank());

        for (slot, entry) in slots.into_iter().zip(recognized) {
            run[slot] = entry;
        }
    }
}

impl Default for ScheduleSorter {
    fn default() -> Self {
        Self::new()
    }
}
