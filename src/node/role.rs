//! 端点角色

/// 一次运行内固定的角色：在收到第一条 bootstrap 消息时确定，
/// 之后不再改变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointRole {
    #[default]
    Undetermined,
    Sender,
    Receiver,
}
