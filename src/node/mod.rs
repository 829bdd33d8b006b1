//! ARQ 端点模块
//!
//! Go-Back-N 的发送端/接收端状态机、窗口账本、线上帧以及把它们
//! 接到调度基座上的事件类型。

mod arq_world;
mod bootstrap;
mod deliver_frame;
mod endpoint;
mod frame;
mod id;
mod message;
mod role;
mod timer_fire;
mod window;

pub use arq_world::ArqWorld;
pub use bootstrap::Bootstrap;
pub use deliver_frame::DeliverFrame;
pub use endpoint::{Endpoint, RECEIVER_MARKER};
pub use frame::{Frame, FrameKind};
pub use id::NodeId;
pub use message::MessageRecord;
pub use role::EndpointRole;
pub use timer_fire::TimerFire;
pub use window::WindowState;
