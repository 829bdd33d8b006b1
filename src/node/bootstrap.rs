//! bootstrap 事件
//!
//! 运行开始时向每个端点各交付一条：载荷决定角色（接收端标记或
//! 携带起始时间的发送端载荷）。

use super::arq_world::ArqWorld;
use super::id::NodeId;
use crate::sim::{Event, Simulator, World};
use tracing::debug;

/// 事件：把 bootstrap 载荷交给某个端点。
#[derive(Debug)]
pub struct Bootstrap {
    pub to: NodeId,
    pub payload: String,
}

impl Event for Bootstrap {
    #[tracing::instrument(skip(self, sim, world), fields(to = self.to.0))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Bootstrap { to, payload } = *self;
        debug!(now = ?sim.now(), payload = %payload, "bootstrap 到达");
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.handle_bootstrap(to, &payload, sim);
    }
}
