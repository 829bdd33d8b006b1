//! 定时器 / 窗口账本
//!
//! 每发出一帧就武装一个定时器（不是一窗一个），因此同一时刻可能有
//! 多个定时器在队列里。没有真正的取消：账本用信用把已被应答满足的
//! 到期变成无害的空操作。
//!
//! - 每接受一次使窗口前移的累计应答 +1 信用；
//! - 到期时有信用则消耗一个并忽略；
//! - 没有信用才是真超时：整个未应答窗口视为丢失。真超时把被清空
//!   窗口中**其余**仍然武装着的定时器折算成信用（in_flight − 1 个），
//!   这样账恰好平：每个武装过的定时器到期一次，每次非真到期恰好
//!   消耗一个信用。

use tracing::trace;

/// 发送端的窗口簿记。`seq_beg`/`next_to_send` 是绝对消息下标，
/// 线上序号取模 `window_size`。
#[derive(Debug)]
pub struct WindowState {
    seq_beg: usize,
    next_to_send: usize,
    window_size: usize,
    in_flight: usize,
    credits: usize,
}

impl WindowState {
    pub fn new(window_size: usize) -> WindowState {
        assert!(window_size > 0, "window size must be positive");
        WindowState {
            seq_beg: 0,
            next_to_send: 0,
            window_size,
            in_flight: 0,
            credits: 0,
        }
    }

    /// 消息下标对应的线上序号。
    pub fn seq_of(&self, index: usize) -> usize {
        index % self.window_size
    }

    pub fn seq_beg(&self) -> usize {
        self.seq_beg
    }

    pub fn next_to_send(&self) -> usize {
        self.next_to_send
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn credits(&self) -> usize {
        self.credits
    }

    /// 空闲窗位。
    pub fn free_slots(&self) -> usize {
        self.window_size - self.in_flight
    }

    /// 记一帧已发出（无论是否被信道丢弃都占一个窗位并武装定时器）。
    pub fn mark_sent(&mut self) {
        debug_assert!(self.in_flight < self.window_size, "window overrun");
        self.in_flight += 1;
        self.next_to_send += 1;
    }

    /// 应答号恰为 `(seqBeg+1) mod windowSize` 时窗口前移一格并
    /// 记一个抑制信用；其余应答号一律拒绝。
    pub fn accept_ack(&mut self, ack_num: usize) -> bool {
        if self.in_flight == 0 || ack_num != self.seq_of(self.seq_beg + 1) {
            return false;
        }
        self.in_flight -= 1;
        self.seq_beg += 1;
        self.credits += 1;
        trace!(
            seq_beg = self.seq_beg,
            in_flight = self.in_flight,
            credits = self.credits,
            "窗口前移"
        );
        true
    }

    /// 定时器到期：有信用则吸收（返回 true），否则是真超时。
    pub fn absorb_timer(&mut self) -> bool {
        if self.credits > 0 {
            self.credits -= 1;
            return true;
        }
        false
    }

    /// 真超时：其余未到期定时器折算成信用，清空在途计数，
    /// 发送游标回卷到窗口底。
    pub fn genuine_reset(&mut self) {
        self.credits = self.in_flight.saturating_sub(1);
        self.in_flight = 0;
        self.next_to_send = self.seq_beg;
    }
}
