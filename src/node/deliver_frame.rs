//! 帧交付事件
//!
//! 端点间传输：帧在它的到达时刻被交给目的端点处理。

use super::arq_world::ArqWorld;
use super::frame::Frame;
use super::id::NodeId;
use crate::sim::{Event, Simulator, World};
use tracing::debug;

/// 事件：把一个帧交给目的端点。
#[derive(Debug)]
pub struct DeliverFrame {
    pub to: NodeId,
    pub frame: Frame,
}

impl Event for DeliverFrame {
    #[tracing::instrument(skip(self, sim, world), fields(to = self.to.0, kind = ?self.frame.kind, seq = self.frame.seq_num))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverFrame { to, frame } = *self;
        debug!(now = ?sim.now(), "帧到达端点");
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.handle_frame(to, frame, sim);
    }
}
