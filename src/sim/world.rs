//! 世界 trait
//!
//! 定义仿真世界接口。`on_tick` 在每个事件执行完后调用一次，
//! ARQ 世界用它把名义时间已到的轨迹记录增量写出。

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：由业务层实现（这里是两个 ARQ 端点 + 信道 + 轨迹日志）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
