//! 轨迹记录
//!
//! 四种记录对应输出文件的四种行格式，文本逐字节保持原始写法，
//! 包括方括号和不规则的空格。时间按「整数部分 + 仅非零时的小数
//! 第一位」渲染（见 `SimTime` 的 `Display`）。

use crate::sim::SimTime;
use std::fmt;

/// 数据帧记录的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDir {
    Sent,
    Received,
}

impl FrameDir {
    fn as_str(&self) -> &'static str {
        match self {
            FrameDir::Sent => "sent",
            FrameDir::Received => "received",
        }
    }
}

/// 控制帧种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Ack,
    Nack,
}

impl ControlKind {
    fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Ack => "ACK",
            ControlKind::Nack => "NACK",
        }
    }
}

/// 一条轨迹记录的内容。
#[derive(Debug, Clone, PartialEq)]
pub enum TraceRecordKind {
    /// 发送端开始处理一条消息，报告其故障码。
    ChannelError { node: usize, code: String },
    /// 数据帧被发出/收下（载荷为线上的填充形式）。
    FrameActivity {
        node: usize,
        dir: FrameDir,
        seq_num: usize,
        payload: String,
        trailer: u8,
        /// `byteIndex*8 + bitIndex`，未篡改为 -1。
        modified: i64,
        lost: bool,
        /// 0 = 未重复，1/2 = 重复帧的第几份。
        duplicate: u8,
        delay: SimTime,
    },
    /// 真超时。
    Timeout { node: usize, seq_num: usize },
    /// 接收端发出（或抽中丢失的）控制帧。
    Control {
        node: usize,
        kind: ControlKind,
        number: usize,
        lost: bool,
    },
}

/// 带名义时间的轨迹记录。
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub at: SimTime,
    pub kind: TraceRecordKind,
}

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.at;
        match &self.kind {
            TraceRecordKind::ChannelError { node, code } => {
                write!(
                    f,
                    "At time [{t}], Node[{node}] , Introducing channel error with code =[{code}]"
                )
            }
            TraceRecordKind::FrameActivity {
                node,
                dir,
                seq_num,
                payload,
                trailer,
                modified,
                lost,
                duplicate,
                delay,
            } => {
                write!(
                    f,
                    "At time [{t}], Node[{node}] [{dir}] frame with seq_num=[{seq_num}] \
                     and payload=[{payload}] and trailer=[{trailer:08b}] , Modified [{modified}] \
                     ,Lost [{lost}], Duplicate [{duplicate}], Delay [{delay}]",
                    dir = dir.as_str(),
                    lost = yes_no(*lost),
                )
            }
            TraceRecordKind::Timeout { node, seq_num } => {
                write!(
                    f,
                    "Time out event at time [{t}], at Node[{node}] for frame with seq_num=[{seq_num}]"
                )
            }
            TraceRecordKind::Control {
                node,
                kind,
                number,
                lost,
            } => {
                write!(
                    f,
                    "At time [{t}], Node[{node}] Sending [{kind}] with number [{number}] , loss [{lost}]",
                    kind = kind.as_str(),
                    lost = yes_no(*lost),
                )
            }
        }
    }
}
