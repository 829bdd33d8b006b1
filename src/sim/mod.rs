//! 仿真核心模块
//!
//! 离散事件调度基座：虚拟时间、事件、世界与仿真器。端点逻辑全部
//! 以协作式回调的方式运行在这套基座之上，没有线程、没有阻塞等待。

mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::{SimTime, TICKS_PER_UNIT};
pub use world::World;
