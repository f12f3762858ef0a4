//! 地址转换契约。
//!
//! # 模块定位（Why）
//! - 节点在元数据表中广播的地址往往是集群内网地址；跨 NAT、VPC 对等或多区域部署时，客户端必须把它改写为可达地址；
//! - 该改写是部署相关的策略，因此以 [`AddressTranslator`] trait 注入，解析算法本身保持不变。
//!
//! # 结构概览（What）
//! - [`IdentityTranslator`]：原样返回地址，端口缺省时补齐配置的默认端口；
//! - [`StaticMappingTranslator`]：按固定映射表改写（典型 NAT 场景），未命中时退化为恒等转换。
//!
//! # 实现约束（How）
//! - `translate` 必须是廉价、本地、非阻塞的查找，禁止执行网络 I/O（例如反向 DNS）；
//! - 实现需满足 `Send + Sync`，解析器会在多个拓扑刷新线程上并发调用。

use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// 客户端默认的原生协议端口。
pub const DEFAULT_NATIVE_PORT: u16 = 9042;

/// 把节点广播的 `(address, port)` 改写为客户端实际拨号的地址。
///
/// # 契约说明（What）
/// - `port` 为 `None` 表示行本身未携带端口（旧版 schema），实现应补齐由外部配置给出的默认端口，
///   而不是从行内推断；
/// - 对同一输入必须返回相同结果；
/// - 即使 `address` 是回环或全接口哨兵地址，解析器也会调用本方法，由实现决定是否改写。
pub trait AddressTranslator: Send + Sync + fmt::Debug {
    fn translate(&self, address: IpAddr, port: Option<u16>) -> SocketAddr;
}

/// 恒等转换：地址不变，仅在端口缺省时补齐默认端口。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityTranslator {
    default_port: u16,
}

impl IdentityTranslator {
    pub const fn new(default_port: u16) -> Self {
        Self { default_port }
    }

    pub const fn default_port(&self) -> u16 {
        self.default_port
    }
}

impl Default for IdentityTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_NATIVE_PORT)
    }
}

impl AddressTranslator for IdentityTranslator {
    fn translate(&self, address: IpAddr, port: Option<u16>) -> SocketAddr {
        SocketAddr::new(address, port.unwrap_or(self.default_port))
    }
}

/// 固定映射表转换器，适用于 NAT/端口映射已知且稳定的部署。
///
/// # 教案式说明
/// - **意图 (Why)**：内网地址与公网映射通常由运维静态维护，客户端只需查表即可，无需任何网络交互；
/// - **契约 (What)**：
///   - 映射以广播 IP 为键，值为完整的可达 `SocketAddr`，命中时忽略行内端口；
///   - 未命中时行为与 [`IdentityTranslator`] 一致；
/// - **风险 (Trade-offs)**：映射表在构造后只读，节点扩容需要重建转换器并重新 `init` 解析器。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticMappingTranslator {
    mappings: HashMap<IpAddr, SocketAddr>,
    fallback: IdentityTranslator,
}

impl StaticMappingTranslator {
    pub fn new(default_port: u16) -> Self {
        Self {
            mappings: HashMap::new(),
            fallback: IdentityTranslator::new(default_port),
        }
    }

    /// 追加一条映射；同一广播地址重复登记时后者覆盖前者。
    pub fn with_mapping(mut self, advertised: IpAddr, reachable: SocketAddr) -> Self {
        self.mappings.insert(advertised, reachable);
        self
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromIterator<(IpAddr, SocketAddr)> for StaticMappingTranslator {
    fn from_iter<I: IntoIterator<Item = (IpAddr, SocketAddr)>>(iter: I) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
            fallback: IdentityTranslator::default(),
        }
    }
}

impl AddressTranslator for StaticMappingTranslator {
    fn translate(&self, address: IpAddr, port: Option<u16>) -> SocketAddr {
        match self.mappings.get(&address) {
            Some(reachable) => *reachable,
            None => self.fallback.translate(address, port),
        }
    }
}
