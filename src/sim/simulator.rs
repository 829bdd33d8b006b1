//! 仿真器
//!
//! 虚拟时钟 + 事件队列。协议里没有真正的定时器取消：过期定时器
//! 仍然留在队列里，触发时由端点的账本判定是否无效，因此队列只会
//! 向前消费，从不删改。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动仿真器。
#[derive(Default)]
pub struct Simulator {
    clock: SimTime,
    issued: u64,
    queue: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 当前虚拟时间。
    pub fn now(&self) -> SimTime {
        self.clock
    }

    /// 把事件排入 `due` 时刻。
    #[tracing::instrument(skip(self, ev), fields(ev = std::any::type_name::<E>(), due = ?due))]
    pub fn schedule<E: Event>(&mut self, due: SimTime, ev: E) {
        let order = self.issued;
        self.issued = self.issued.wrapping_add(1);
        trace!(now = ?self.clock, order, "事件入队");
        self.queue.push(ScheduledEvent {
            due,
            order,
            ev: Box::new(ev),
        });
    }

    /// 取出并执行一个事件：推进时钟，回调世界。
    fn dispatch(&mut self, item: ScheduledEvent, world: &mut dyn World) {
        self.clock = item.due;
        debug!(now = ?self.clock, order = item.order, pending = self.queue.len(), "执行事件");
        item.ev.execute(self, world);
        world.on_tick(self);
    }

    /// 运行到事件耗尽。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        let mut dispatched = 0u64;
        while let Some(item) = self.queue.pop() {
            dispatched += 1;
            self.dispatch(item, world);
        }
        info!(dispatched, final_time = ?self.clock, "事件耗尽，运行结束");
    }

    /// 运行到 `until` 为止（含恰好在 `until` 到期的事件），之后把
    /// 时钟推到 `until`。用于不收敛的场景（例如控制帧全丢）。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(top) = self.queue.peek() {
            if top.due > until {
                break;
            }
            let item = self.queue.pop().expect("peek then pop");
            self.dispatch(item, world);
        }
        self.clock = self.clock.max(until);
    }
}
