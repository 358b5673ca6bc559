//! # Completion 模块
//!
//! 完成通知的一次性保证。
//!
//! 每个实例持一枚令牌：完成通知只能从令牌上取走一次，
//! 取消后令牌作废，之后永远取不走。

/// 一次性完成令牌
///
/// 保证一个实例在整个生命周期里最多发出一次完成通知。
#[derive(Debug, Default)]
pub struct CompletionToken {
    fired: bool,
    voided: bool,
}

impl CompletionToken {
    /// 创建未触发的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试取走完成通知
    ///
    /// 第一次调用返回 `true`，之后永远返回 `false`。
    pub fn consume(&mut self) -> bool {
        if self.fired || self.voided {
            return false;
        }
        self.fired = true;
        true
    }

    /// 作废令牌（取消时调用）
    ///
    /// 作废后 [`consume`](Self::consume) 永远返回 `false`。
    pub fn void(&mut self) {
        self.voided = true;
    }

    /// 是否已触发
    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_exactly_once() {
        let mut token = CompletionToken::new();
        assert!(token.consume());
        assert!(!token.consume());
        assert!(!token.consume());
        assert!(token.is_fired());
    }

    #[test]
    fn test_voided_never_consumes() {
        let mut token = CompletionToken::new();
        token.void();
        assert!(!token.consume());
        assert!(!token.is_fired());
    }

    #[test]
    fn test_void_after_fire_keeps_fired_flag() {
        let mut token = CompletionToken::new();
        assert!(token.consume());
        token.void();
        assert!(token.is_fired());
        assert!(!token.consume());
    }
}
