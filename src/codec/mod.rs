//! 编解码模块
//!
//! 纯函数：字节填充帧定界与异或校验。

mod parity;
mod stuff;

pub use parity::parity;
pub use stuff::{stuff, unstuff, ESCAPE, FLAG};
