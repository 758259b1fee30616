/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 挂起点：把回调式 / 订阅式的单结果操作转换成一次 `.await`
pub mod call {
    use crate::internal;
    pub use internal::call::functions::*;
    pub use internal::call::structs::*;
    pub use internal::call::traits::*;
}

/// 操作源契约与适配器
pub mod source {
    use crate::internal;
    pub use internal::source::structs::*;
    pub use internal::source::traits::*;
}

/// 结果转换策略
pub mod parser {
    use crate::internal;
    pub use internal::parser::structs::*;
    pub use internal::parser::traits::*;
}

/// 进度采样、节流与调度
pub mod progress {
    use crate::internal;
    pub use internal::progress::structs::*;
    pub use internal::progress::traits::*;
}

/// 下载等待
pub mod download {
    use crate::internal;
    pub use internal::download::structs::*;
}

/// 基于 reqwest 的内置操作源，不能限制死在等待方法中，以防有人自己要用
pub mod http {
    use crate::internal;
    pub use internal::http::structs::*;
}

pub mod states {
    use crate::internal;
    pub use internal::states::watch_state::*;
}
