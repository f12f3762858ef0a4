//! 测试桩集合，供集成测试与宿主的契约测试复用。
//!
//! # 设计定位（Why）
//! - 解析器必须对每一行恰好调用一次转换器，且参数与行内取值完全一致；验证这一点需要记录型转换器；
//! - 集中维护桩对象，避免各测试文件重复定义，在 [`AddressTranslator`] 演进时获得单点编译错误。
//!
//! # 契约说明（What）
//! - 桩对象仅用于测试或示例环境，不做任何网络交互。

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

use crate::translator::{AddressTranslator, IdentityTranslator};

/// 一次转换调用的参数快照。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslateCall {
    pub address: IpAddr,
    pub port: Option<u16>,
}

/// 记录所有调用、并把实际转换委托给内部转换器的桩实现。
///
/// # 行为描述（How）
/// - 每次 `translate` 先追加一条 [`TranslateCall`]，再委托给 `inner`；
/// - 克隆体共享同一调用记录，便于把一份注入解析器、另一份留在测试中断言。
#[derive(Clone, Debug)]
pub struct RecordingTranslator {
    inner: Arc<dyn AddressTranslator>,
    calls: Arc<Mutex<Vec<TranslateCall>>>,
}

impl RecordingTranslator {
    pub fn new(inner: Arc<dyn AddressTranslator>) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 以默认端口恒等转换为委托对象。
    pub fn identity() -> Self {
        Self::new(Arc::new(IdentityTranslator::default()))
    }

    pub fn calls(&self) -> Vec<TranslateCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl AddressTranslator for RecordingTranslator {
    fn translate(&self, address: IpAddr, port: Option<u16>) -> SocketAddr {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(TranslateCall { address, port });
        self.inner.translate(address, port)
    }
}
