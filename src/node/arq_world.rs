//! ARQ 仿真世界
//!
//! 持有两个端点、损伤信道、运行参数和轨迹日志。轨迹日志是唯一被
//! 共享的可变资源；单一逻辑控制流下不需要加锁，`on_tick` 在每个
//! 事件之后把名义时间已到的记录增量排出。

use super::endpoint::Endpoint;
use super::frame::Frame;
use super::id::NodeId;
use crate::channel::Channel;
use crate::scenario::RunParams;
use crate::sim::{Simulator, World};
use crate::trace::TraceLog;
use std::any::Any;

/// 两端点 ARQ 世界。
pub struct ArqWorld {
    pub nodes: Vec<Endpoint>,
    pub channel: Channel,
    pub trace: TraceLog,
    pub params: RunParams,
}

impl ArqWorld {
    pub fn new(params: RunParams, channel: Channel, nodes: Vec<Endpoint>) -> ArqWorld {
        assert_eq!(nodes.len(), 2, "exactly two endpoints per run");
        ArqWorld {
            nodes,
            channel,
            trace: TraceLog::default(),
            params,
        }
    }

    pub fn handle_bootstrap(&mut self, to: NodeId, payload: &str, sim: &mut Simulator) {
        let ArqWorld {
            nodes,
            channel,
            trace,
            params,
        } = self;
        nodes[to.0].on_bootstrap(payload, sim, channel, trace, params);
    }

    pub fn handle_frame(&mut self, to: NodeId, frame: Frame, sim: &mut Simulator) {
        let ArqWorld {
            nodes,
            channel,
            trace,
            params,
        } = self;
        nodes[to.0].on_frame(frame, sim, channel, trace, params);
    }

    pub fn handle_timer(&mut self, node: NodeId, seq_num: usize, sim: &mut Simulator) {
        let ArqWorld {
            nodes,
            channel,
            trace,
            params,
        } = self;
        nodes[node.0].on_timer(seq_num, sim, channel, trace, params);
    }
}

impl World for ArqWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, sim: &mut Simulator) {
        self.trace.drain_ready(sim.now());
    }
}
