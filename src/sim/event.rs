//! 事件 trait
//!
//! 定义仿真事件接口。端点的全部协议逻辑都在事件回调里执行：
//! 帧交付、定时器到期、bootstrap 都是一次 `execute`。

use super::simulator::Simulator;
use super::world::World;

/// 事件：可被调度执行。使用 `self: Box<Self>` 以支持 move/所有权转移。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}
