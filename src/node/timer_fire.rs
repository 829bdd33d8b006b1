//! 重传定时器到期事件
//!
//! 每发出一帧武装一个，按该帧的窗口相对序号标识。到期本身不携带
//! 有效性信息：是否真超时由端点的账本判定。

use super::arq_world::ArqWorld;
use super::id::NodeId;
use crate::sim::{Event, Simulator, World};

/// 事件：序号 `seq_num` 的重传定时器到期。
#[derive(Debug)]
pub struct TimerFire {
    pub node: NodeId,
    pub seq_num: usize,
}

impl Event for TimerFire {
    #[tracing::instrument(skip(self, sim, world), fields(node = self.node.0, seq = self.seq_num))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TimerFire { node, seq_num } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.handle_timer(node, seq_num, sim);
    }
}
