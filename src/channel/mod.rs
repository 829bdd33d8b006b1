//! 信道模块
//!
//! 故障标志、可复现随机源与损伤注入。损伤是被建模的结果而不是错误，
//! 这里不会返回 `Err`。

mod fault;
mod impair;
mod random;

pub use fault::FaultFlags;
pub use impair::{AppliedFaults, Channel};
pub use random::RandomSource;
