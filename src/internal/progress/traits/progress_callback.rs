/// 传输层的进度回调：由底层操作在读取响应体时以任意频率调用。
pub trait ProgressCallback: Send {
    /// `percent` 为传输层算出的原始百分比；`total_size` 未知时为 `None`。
    fn on_progress(&mut self, percent: u8, current_size: u64, total_size: Option<u64>);
}

/// 闭包形式的进度回调
impl<F> ProgressCallback for F
where
    F: FnMut(u8, u64, Option<u64>) + Send,
{
    fn on_progress(&mut self, percent: u8, current_size: u64, total_size: Option<u64>) {
        self(percent, current_size, total_size);
    }
}
