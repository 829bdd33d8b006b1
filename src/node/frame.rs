//! 线上帧
//!
//! 帧是瞬态的：每次发送/应答各构造一个。数据帧携带填充后的载荷和
//! 异或校验尾字节；控制帧只携带应答号。`applied` 记录信道对这次
//! 发送尝试实际做了什么，仅供接收侧的轨迹输出使用。

use crate::channel::AppliedFaults;
use crate::codec;

/// 帧种类。定时器到期与日志写出在本实现里是调度器事件而不是帧。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Data,
    Ack,
    Nack,
}

/// 一个线上单元。
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    pub seq_num: usize,
    pub ack_num: usize,
    /// 填充后的载荷（含 FLAG/ESCAPE，可能已被信道破坏）。
    pub payload: Vec<u8>,
    /// 发送端在破坏**之前**算出的校验。
    pub trailer: u8,
    pub applied: AppliedFaults,
}

impl Frame {
    /// 用明文载荷构造数据帧：填充 + 计算尾字节。
    pub fn data(seq_num: usize, payload_text: &str) -> Frame {
        let stuffed = codec::stuff(payload_text.as_bytes());
        let trailer = codec::parity(&stuffed);
        Frame {
            kind: FrameKind::Data,
            seq_num,
            ack_num: 0,
            payload: stuffed,
            trailer,
            applied: AppliedFaults::default(),
        }
    }

    pub fn ack(ack_num: usize) -> Frame {
        Frame {
            kind: FrameKind::Ack,
            seq_num: 0,
            ack_num,
            payload: Vec::new(),
            trailer: 0,
            applied: AppliedFaults::default(),
        }
    }

    pub fn nack(ack_num: usize) -> Frame {
        Frame {
            kind: FrameKind::Nack,
            seq_num: 0,
            ack_num,
            payload: Vec::new(),
            trailer: 0,
            applied: AppliedFaults::default(),
        }
    }

    /// 接收端对收到的填充载荷重算校验并与尾字节比较。
    pub fn parity_ok(&self) -> bool {
        codec::parity(&self.payload) == self.trailer
    }
}
