//! 端点标识符

/// 端点标识符。一次运行恰好有两个端点：0 和 1。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// 对端的标识符。
    pub fn peer(&self) -> NodeId {
        NodeId(1 - self.0)
    }
}
