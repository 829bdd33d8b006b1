//! 按时序排列的轨迹日志
//!
//! 一次状态机步骤会产生名义时间各不相同的记录（损伤引入时刻、
//! 上线时刻、超时时刻、控制帧时刻），而且常常乱序产生。原实现靠
//! 给未来时刻自调度空事件来推迟写出；这里改为显式的按时间排序的
//! 输出缓冲：名义时间不晚于“现在”的记录随仿真推进增量落盘，其余
//! 在运行结束时一次排空。同一名义时间的记录按产生顺序输出。

use super::event::{TraceRecord, TraceRecordKind};
use crate::sim::SimTime;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// 缓冲中的一条记录，按 (名义时间, 插入序号) 排序。
struct Buffered {
    at: SimTime,
    seq: u64,
    line: String,
}

// BinaryHeap 是 max-heap，反向比较得到最早记录优先。
impl Ord for Buffered {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.cmp(&other.at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for Buffered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Buffered {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Buffered {}

/// 追加式轨迹日志：缓冲乱序产生的记录，产出时间有序的文本行。
#[derive(Default)]
pub struct TraceLog {
    buf: BinaryHeap<Buffered>,
    next_seq: u64,
    lines: Vec<String>,
}

impl TraceLog {
    /// 缓冲一条记录。记录的名义时间必须不早于它产生时的虚拟时间，
    /// 已经排空的时刻不会再被插入。
    pub fn push(&mut self, at: SimTime, kind: TraceRecordKind) {
        let rec = TraceRecord { at, kind };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.buf.push(Buffered {
            at,
            seq,
            line: rec.to_string(),
        });
    }

    /// 把名义时间不晚于 `now` 的记录移入有序行列表。
    pub fn drain_ready(&mut self, now: SimTime) {
        while let Some(top) = self.buf.peek() {
            if top.at > now {
                break;
            }
            let item = self.buf.pop().expect("peek then pop");
            self.lines.push(item.line);
        }
    }

    /// 运行结束：排空全部剩余记录。
    pub fn finish(&mut self) {
        while let Some(item) = self.buf.pop() {
            self.lines.push(item.line);
        }
    }

    /// 目前已排定顺序的输出行。
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
