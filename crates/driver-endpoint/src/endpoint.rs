use std::fmt;
use std::net::SocketAddr;

/// `EndPoint` 表示一个经过地址转换、可直接拨号的数据库节点地址。
///
/// # 设计初衷（Why）
/// - 连接池与协议层只需要一个“拨号目标”，不应关心该地址来自现代 schema 还是旧版 `peer` 列；
/// - 仅能由 [`crate::resolver`] 在调用地址转换器之后构造，避免原始广播地址绕过转换直接流入连接层。
///
/// # 契约定义（What）
/// - 构造后不可变；
/// - 相等性与哈希完全由解析后的 `SocketAddr` 决定；
/// - `Display` 输出与 `SocketAddr` 一致，可直接用于日志字段。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndPoint {
    resolved: SocketAddr,
}

impl EndPoint {
    pub(crate) const fn translated(resolved: SocketAddr) -> Self {
        Self { resolved }
    }

    /// 返回可拨号的 Socket 地址。
    pub const fn resolve(&self) -> SocketAddr {
        self.resolved
    }
}

impl fmt::Display for EndPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.resolved, f)
    }
}

impl From<EndPoint> for SocketAddr {
    fn from(endpoint: EndPoint) -> Self {
        endpoint.resolved
    }
}
