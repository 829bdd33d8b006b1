//! 消息记录
//!
//! 每个端点在 bootstrap 时装载一次，之后不可变。唯一的例外是
//! 故障标志在首次被赦免时永久清零。

use crate::channel::FaultFlags;

/// 待传输的一条消息。
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub flags: FaultFlags,
    pub payload: String,
}
