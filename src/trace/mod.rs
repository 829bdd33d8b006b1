//! 轨迹输出模块
//!
//! 协议事件的人类可读轨迹：四种行格式 + 全局按名义时间排序。
//! 这份轨迹与 `tracing` 诊断日志无关，前者是被仿真系统的产物，
//! 后者只服务于调试。

mod event;
mod log;

pub use event::{ControlKind, FrameDir, TraceRecord, TraceRecordKind};
pub use log::TraceLog;
