//! 字节填充
//!
//! 帧定界：载荷包在两个 FLAG 字节之间，载荷里出现 FLAG 或 ESCAPE
//! 时在前面插入 ESCAPE。`unstuff` 是精确逆操作，满足
//! `unstuff(stuff(x)) == x`。

/// 帧定界字节。
pub const FLAG: u8 = b'$';
/// 转义字节。
pub const ESCAPE: u8 = b'/';

/// 对载荷做字节填充，返回线上形式（含首尾 FLAG）。
pub fn stuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 2);
    out.push(FLAG);
    for &b in payload {
        if b == FLAG || b == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(b);
    }
    out.push(FLAG);
    out
}

/// 去填充：丢弃 ESCAPE 并原样收下后一个字节；帧在下一个未转义的
/// FLAG 处结束。输入允许是被信道破坏过的帧，超出结构的部分按上述
/// 规则尽力解析。
pub fn unstuff(frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.len());
    let mut it = frame.iter().copied();

    // 开头的 FLAG 不属于载荷
    let mut pending = it.next();
    if pending == Some(FLAG) {
        pending = it.next();
    }

    while let Some(b) = pending {
        if b == ESCAPE {
            if let Some(next) = it.next() {
                out.push(next);
            }
        } else if b == FLAG {
            break;
        } else {
            out.push(b);
        }
        pending = it.next();
    }
    out
}
