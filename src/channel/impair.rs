//! 信道损伤模型
//!
//! 对每个数据帧的发送尝试应用存储的故障标志：
//! - 丢失：整帧丢弃，什么都不发（等发送端超时）；
//! - 篡改：在填充后的载荷里均匀选一个字节、再均匀选一个比特翻转；
//! - 延迟：名义发送时刻整体推后 ED；
//! - 重复：在首份之后 DD 再发一份完全相同（含篡改后内容）的拷贝。
//! 控制帧（ACK/NACK）独立以概率 LP 抽签丢失。

use crate::channel::fault::FaultFlags;
use crate::channel::random::RandomSource;
use crate::sim::SimTime;
use tracing::debug;

/// 一次发送尝试实际发生的损伤，随帧携带，供轨迹输出使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedFaults {
    /// 被翻转的位置 `byteIndex*8 + bitIndex`，未篡改为 -1。
    pub modified: i64,
    pub lost: bool,
    /// 0 = 未重复，1 = 重复帧的第一份，2 = 第二份。
    pub duplicate_copy: u8,
    /// 实际附加的额外延迟（未延迟为 0）。
    pub extra_delay: SimTime,
}

impl Default for AppliedFaults {
    fn default() -> Self {
        AppliedFaults {
            modified: -1,
            lost: false,
            duplicate_copy: 0,
            extra_delay: SimTime::ZERO,
        }
    }
}

/// 损伤信道：运行参数 + 随机源。
pub struct Channel {
    /// 额外错误延迟 ED。
    pub error_delay: SimTime,
    /// 重复帧间隔 DD。
    pub duplicate_delay: SimTime,
    /// 控制帧丢失概率 LP。
    pub loss_probability: f64,
    rng: RandomSource,
}

impl Channel {
    pub fn new(
        error_delay: SimTime,
        duplicate_delay: SimTime,
        loss_probability: f64,
        seed: u64,
    ) -> Channel {
        Channel {
            error_delay,
            duplicate_delay,
            loss_probability,
            rng: RandomSource::new(seed),
        }
    }

    /// 对一个数据帧的发送尝试应用故障标志，原地破坏填充帧。
    pub fn impair_data(&mut self, flags: FaultFlags, stuffed: &mut [u8]) -> AppliedFaults {
        if flags.lose {
            // 丢失优先于其余故障：帧根本没有上线
            return AppliedFaults {
                lost: true,
                ..AppliedFaults::default()
            };
        }

        let mut applied = AppliedFaults::default();
        if flags.modify && !stuffed.is_empty() {
            let byte = self.rng.uniform(0, stuffed.len() as u64 - 1) as usize;
            let bit = self.rng.uniform(0, 7) as u32;
            stuffed[byte] ^= 1 << bit;
            applied.modified = (byte as i64) * 8 + bit as i64;
            debug!(byte, bit, "篡改填充帧的一个比特");
        }
        if flags.delay {
            applied.extra_delay = self.error_delay;
        }
        if flags.duplicate {
            applied.duplicate_copy = 1;
        }
        applied
    }

    /// 控制帧是否被抽中丢失。
    pub fn control_lost(&mut self) -> bool {
        self.rng.happens(self.loss_probability)
    }
}
