//! 队列中的事件
//!
//! 事件按 (到期时刻, 入队序号) 排序：时间早者先出，同一时刻按入队
//! 顺序交付。协议对平局不敏感，多余的超时触发由窗口账本的信用机制
//! 吸收，而不是靠精确的平局规则。

use super::event::Event;
use super::time::SimTime;
use std::cmp::{Ordering, Reverse};

/// 一个已入队的事件及其排序键。
pub struct ScheduledEvent {
    pub(crate) due: SimTime,
    pub(crate) order: u64,
    pub(crate) ev: Box<dyn Event>,
}

impl ScheduledEvent {
    // BinaryHeap 是 max-heap，键取反得到最早到期优先。
    fn key(&self) -> Reverse<(SimTime, u64)> {
        Reverse((self.due, self.order))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}
