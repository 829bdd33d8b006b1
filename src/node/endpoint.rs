//! ARQ 端点状态机
//!
//! 一个端点就是一个普通的自有状态对象，唯一的入口是宿主调度器
//! 调用的事件处理方法（bootstrap / 帧到达 / 定时器到期）。角色在
//! 第一条 bootstrap 消息上确定：载荷是接收端标记则为 Receiver，
//! 否则为 Sender（载荷携带场景起始时间）。
//!
//! 发送端：接受累计应答推动账本前移，然后按空闲窗位成批发送；
//! 一个突发里的各帧在虚拟时间上串行化，相邻帧的名义发送时刻相差
//! PT+TD。真超时把整个未应答窗口视为丢失并从窗口底重发，重发
//! 首帧被一次性赦免（强制无故障且标志永久清零）。
//!
//! 接收端：严格按序的单帧接受窗口。序号不符的帧静默忽略；按序帧
//! 校验通过发 ACK 并前移期望序号，不通过发 NACK。控制帧自身可能
//! 被抽中丢失：丢失的 ACK 会把期望序号回卷一格，让发送端超时后的
//! 重传被当作新帧接受而不是误判为重复。

use crate::channel::Channel;
use crate::node::deliver_frame::DeliverFrame;
use crate::node::frame::{Frame, FrameKind};
use crate::node::id::NodeId;
use crate::node::message::MessageRecord;
use crate::node::role::EndpointRole;
use crate::node::timer_fire::TimerFire;
use crate::node::window::WindowState;
use crate::scenario::RunParams;
use crate::sim::{SimTime, Simulator};
use crate::trace::{ControlKind, FrameDir, TraceLog, TraceRecordKind};
use tracing::{debug, trace};

/// bootstrap 消息里的接收端标记载荷。
pub const RECEIVER_MARKER: &str = "No";

/// 一个 ARQ 端点。
pub struct Endpoint {
    pub id: NodeId,
    role: EndpointRole,
    window: WindowState,
    /// 接收端期望的下一个线上序号。
    expected_seq: usize,
    messages: Vec<MessageRecord>,
    /// 已写出损伤引入记录的消息下标水位（单调递增，保证每个下标
    /// 至多写一条，即便重传回访同一下标）。
    introduced_upto: usize,
}

impl Endpoint {
    pub fn new(id: NodeId, window_size: usize, messages: Vec<MessageRecord>) -> Endpoint {
        Endpoint {
            id,
            role: EndpointRole::Undetermined,
            window: WindowState::new(window_size),
            expected_seq: 0,
            messages,
            introduced_upto: 0,
        }
    }

    pub fn role(&self) -> EndpointRole {
        self.role
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn expected_seq(&self) -> usize {
        self.expected_seq
    }

    /// 发送端空闲判定：全部消息已发出且无在途帧。
    pub fn is_idle(&self) -> bool {
        self.window.next_to_send() >= self.messages.len() && self.window.in_flight() == 0
    }

    /// 第一条入站 bootstrap 消息固定角色；发送端随即开始第一个突发。
    pub fn on_bootstrap(
        &mut self,
        payload: &str,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        if self.role != EndpointRole::Undetermined {
            debug!(node = self.id.0, "重复的 bootstrap，忽略");
            return;
        }
        if payload == RECEIVER_MARKER {
            self.role = EndpointRole::Receiver;
            debug!(node = self.id.0, "角色固定为接收端");
            return;
        }
        self.role = EndpointRole::Sender;
        debug!(node = self.id.0, start = payload, "角色固定为发送端");
        self.send_burst(false, sim, channel, trace_log, params);
    }

    /// 入站帧分派。
    #[tracing::instrument(skip_all, fields(node = self.id.0, kind = ?frame.kind))]
    pub fn on_frame(
        &mut self,
        frame: Frame,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        match (self.role, frame.kind) {
            (EndpointRole::Sender, FrameKind::Ack) => {
                if self.window.accept_ack(frame.ack_num) {
                    self.send_burst(false, sim, channel, trace_log, params);
                } else {
                    debug!(ack = frame.ack_num, "应答号不匹配窗口底，忽略");
                }
            }
            (EndpointRole::Sender, FrameKind::Nack) => {
                // 恢复交给超时，NACK 不触发发送端动作
                debug!(nack = frame.ack_num, "收到 NACK，等待超时重传");
            }
            (EndpointRole::Receiver, FrameKind::Data) => {
                self.on_data(frame, sim, channel, trace_log, params);
            }
            _ => {
                debug!("角色与帧种类不匹配，忽略");
            }
        }
    }

    /// 定时器到期。只有发送端武装定时器。
    pub fn on_timer(
        &mut self,
        seq_num: usize,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        if self.role != EndpointRole::Sender {
            return;
        }
        if self.window.absorb_timer() {
            trace!(seq_num, credits = self.window.credits(), "到期被信用吸收");
            return;
        }
        if self.window.in_flight() == 0 {
            // 空窗时的残留定时器，无事可做
            return;
        }
        debug!(seq_num, now = ?sim.now(), "真超时，重发整个窗口");
        trace_log.push(
            sim.now(),
            TraceRecordKind::Timeout {
                node: self.id.0,
                seq_num,
            },
        );
        self.window.genuine_reset();
        self.send_burst(true, sim, channel, trace_log, params);
    }

    /// 按空闲窗位发送一批帧。`forgive_first` 表示这是超时触发的
    /// 重传轮，首帧强制无故障。
    fn send_burst(
        &mut self,
        forgive_first: bool,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        let step = params
            .processing_delay
            .saturating_add(params.transmission_delay);
        let mut t_proc = sim.now();
        let mut first = true;

        for _ in 0..self.window.free_slots() {
            let index = self.window.next_to_send();
            if index >= self.messages.len() {
                break;
            }
            self.send_one(
                index,
                t_proc,
                forgive_first && first,
                sim,
                channel,
                trace_log,
                params,
            );
            t_proc = t_proc.saturating_add(step);
            first = false;
        }
    }

    /// 处理并发出下标 `index` 的消息：引入记录、编码、损伤、上线、
    /// 武装定时器。
    fn send_one(
        &mut self,
        index: usize,
        t_proc: SimTime,
        forgive: bool,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        if forgive {
            self.messages[index].flags.clear();
        }
        let flags = self.messages[index].flags;

        if index >= self.introduced_upto {
            trace_log.push(
                t_proc,
                TraceRecordKind::ChannelError {
                    node: self.id.0,
                    code: flags.code(),
                },
            );
            self.introduced_upto = index + 1;
        }

        let seq_num = self.window.seq_of(index);
        let mut frame = Frame::data(seq_num, &self.messages[index].payload);
        let applied = channel.impair_data(flags, &mut frame.payload);
        frame.applied = applied;

        // 名义发送时刻：处理 PT 之后，delay 故障再整体推后 ED
        let t_send = t_proc
            .saturating_add(params.processing_delay)
            .saturating_add(applied.extra_delay);

        trace_log.push(
            t_send,
            TraceRecordKind::FrameActivity {
                node: self.id.0,
                dir: FrameDir::Sent,
                seq_num,
                payload: String::from_utf8_lossy(&frame.payload).into_owned(),
                trailer: frame.trailer,
                modified: applied.modified,
                lost: applied.lost,
                duplicate: applied.duplicate_copy,
                delay: applied.extra_delay,
            },
        );

        if !applied.lost {
            sim.schedule(
                t_send.saturating_add(params.transmission_delay),
                DeliverFrame {
                    to: self.id.peer(),
                    frame: frame.clone(),
                },
            );

            if applied.duplicate_copy == 1 {
                let mut dup = frame.clone();
                dup.applied.duplicate_copy = 2;
                let t_dup = t_send.saturating_add(channel.duplicate_delay);
                trace_log.push(
                    t_dup,
                    TraceRecordKind::FrameActivity {
                        node: self.id.0,
                        dir: FrameDir::Sent,
                        seq_num,
                        payload: String::from_utf8_lossy(&dup.payload).into_owned(),
                        trailer: dup.trailer,
                        modified: applied.modified,
                        lost: false,
                        duplicate: 2,
                        delay: applied.extra_delay,
                    },
                );
                sim.schedule(
                    t_dup.saturating_add(params.transmission_delay),
                    DeliverFrame {
                        to: self.id.peer(),
                        frame: dup,
                    },
                );
            }
        }

        sim.schedule(
            t_send.saturating_add(params.timeout),
            TimerFire {
                node: self.id,
                seq_num,
            },
        );
        self.window.mark_sent();
    }

    /// 接收端处理入站数据帧。
    fn on_data(
        &mut self,
        frame: Frame,
        sim: &mut Simulator,
        channel: &mut Channel,
        trace_log: &mut TraceLog,
        params: &RunParams,
    ) {
        if frame.seq_num != self.expected_seq {
            // 单帧接受窗口：乱序/重复一律静默丢弃，不发任何应答
            debug!(
                got = frame.seq_num,
                expected = self.expected_seq,
                "序号不符，静默丢弃"
            );
            return;
        }

        let now = sim.now();
        trace_log.push(
            now,
            TraceRecordKind::FrameActivity {
                node: self.id.0,
                dir: FrameDir::Received,
                seq_num: frame.seq_num,
                payload: String::from_utf8_lossy(&frame.payload).into_owned(),
                trailer: frame.trailer,
                modified: frame.applied.modified,
                lost: false,
                duplicate: frame.applied.duplicate_copy,
                delay: frame.applied.extra_delay,
            },
        );

        let ack_num = (frame.seq_num + 1) % params.window_size;
        let parity_ok = frame.parity_ok();
        if parity_ok {
            self.expected_seq = ack_num;
        }

        let lost = channel.control_lost();
        let t_ctrl = now.saturating_add(params.processing_delay);
        trace_log.push(
            t_ctrl,
            TraceRecordKind::Control {
                node: self.id.0,
                kind: if parity_ok {
                    ControlKind::Ack
                } else {
                    ControlKind::Nack
                },
                number: ack_num,
                lost,
            },
        );

        if lost {
            if parity_ok {
                // 丢失的是 ACK：期望序号回卷，让超时重传被重新接受
                self.expected_seq =
                    (self.expected_seq + params.window_size - 1) % params.window_size;
                debug!(expected = self.expected_seq, "ACK 丢失，期望序号回卷");
            }
            return;
        }

        let ctrl = if parity_ok {
            Frame::ack(ack_num)
        } else {
            Frame::nack(ack_num)
        };
        sim.schedule(
            t_ctrl.saturating_add(params.transmission_delay),
            DeliverFrame {
                to: self.id.peer(),
                frame: ctrl,
            },
        );
    }
}
