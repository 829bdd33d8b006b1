//! 奇偶校验尾字节
//!
//! 对**填充后的**整帧（含 FLAG/ESCAPE）做 8 位滚动异或。接收端对
//! 收到的填充帧重算并与携带的尾字节比较，不一致即判定为损坏。
//! 任意单个比特翻转必然改变校验值。

/// 计算填充帧的 8 位异或校验。
pub fn parity(stuffed: &[u8]) -> u8 {
    stuffed.iter().fold(0u8, |acc, &b| acc ^ b)
}
