/// 一次进度采样：百分比、已传输字节数、总字节数（未知时为 `None`）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// 进度百分比；重新计算时上限为 100，原始采样按传输层给出的值保留
    pub percent: u8,
    /// 已传输的字节数
    pub current_size: u64,
    /// 总字节数，未知时为 `None`
    pub total_size: Option<u64>,
}

impl Progress {
    pub fn new(percent: u8, current_size: u64, total_size: Option<u64>) -> Self {
        Self {
            percent,
            current_size,
            total_size,
        }
    }

    pub fn add_current_size(&mut self, size: u64) {
        self.current_size = self.current_size.saturating_add(size);
    }

    /// 总大小未知时保持未知。
    pub fn add_total_size(&mut self, size: u64) {
        self.total_size = self.total_size.map(|t| t.saturating_add(size));
    }

    /// 总大小是否可用于计算百分比（已知且大于 0）
    pub fn has_known_total(&self) -> bool {
        matches!(self.total_size, Some(t) if t > 0)
    }

    /// 按当前字节数重新计算百分比（向下取整）；总大小不可用时不做任何修改。
    pub fn update_progress(&mut self) {
        if let Some(total) = self.total_size.filter(|&t| t > 0) {
            self.percent = percent_of(self.current_size, total);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.percent >= 100
    }
}

/// `floor(current * 100 / total)`，上限 100。调用方保证 `total > 0`。
pub(crate) fn percent_of(current: u64, total: u64) -> u8 {
    let pct = (current as u128 * 100) / total as u128;
    pct.min(100) as u8
}
