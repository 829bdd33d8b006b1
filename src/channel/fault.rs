//! 每条消息的故障标志
//!
//! 输入文件里每行前四个字符是故障码，字符位置即比特位：
//! 0 = 篡改，1 = 丢失，2 = 重复，3 = 延迟。

/// 一条消息的四个故障标志。超时重传的首帧被“赦免”后永久清零。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultFlags {
    pub modify: bool,
    pub lose: bool,
    pub duplicate: bool,
    pub delay: bool,
}

impl FaultFlags {
    /// 解析四位故障码（仅 '0'/'1'，恰好四个字符）。
    pub fn from_code(code: &str) -> Option<FaultFlags> {
        let bytes = code.as_bytes();
        if bytes.len() != 4 || bytes.iter().any(|b| *b != b'0' && *b != b'1') {
            return None;
        }
        Some(FaultFlags {
            modify: bytes[0] == b'1',
            lose: bytes[1] == b'1',
            duplicate: bytes[2] == b'1',
            delay: bytes[3] == b'1',
        })
    }

    /// 按输入文件的写法重新渲染故障码。
    pub fn code(&self) -> String {
        let bit = |b: bool| if b { '1' } else { '0' };
        [
            bit(self.modify),
            bit(self.lose),
            bit(self.duplicate),
            bit(self.delay),
        ]
        .iter()
        .collect()
    }

    /// 一次性赦免：永久清除全部标志。
    pub fn clear(&mut self) {
        *self = FaultFlags::default();
    }
}
