//! 仿真时间类型
//!
//! 定义虚拟时间及其单位转换。协议里的所有时延参数（PT/TD/ED/DD/TO）
//! 都以“时间单位”给出，内部用 tick 存储：1000 tick = 1 个时间单位，
//! 足以表达轨迹输出里的一位小数。

use std::fmt;

pub const TICKS_PER_UNIT: u64 = 1_000;

/// 仿真时间（tick，1000 tick = 1 时间单位）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_units(u: u64) -> SimTime {
        SimTime(u.saturating_mul(TICKS_PER_UNIT))
    }

    pub fn from_tenths(t: u64) -> SimTime {
        SimTime(t.saturating_mul(TICKS_PER_UNIT / 10))
    }

    /// 从浮点的时间单位换算（配置文件里的时延是小数）。
    pub fn from_units_f64(u: f64) -> SimTime {
        if u <= 0.0 {
            return SimTime::ZERO;
        }
        SimTime((u * TICKS_PER_UNIT as f64).round() as u64)
    }

    pub fn saturating_add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

/// 轨迹输出的时间写法：整数部分，小数第一位仅在非零时出现。
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / TICKS_PER_UNIT;
        let tenth = (self.0 % TICKS_PER_UNIT) / (TICKS_PER_UNIT / 10);
        if tenth == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{tenth}")
        }
    }
}
