//! 可复现的随机源
//!
//! 信道需要的全部随机性都从这里取：损坏比特的选位、控制帧丢失的
//! 抽签。固定种子下整次运行完全可复现。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 均匀随机源，固定种子。
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: u64) -> RandomSource {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `[min, max]` 上的均匀整数。
    pub fn uniform(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// 以概率 `p` 返回 true（p<=0 恒假，p>=1 恒真）。
    pub fn happens(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.random::<f64>() < p
    }
}
