use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::translator::AddressTranslator;

/// 解析器所需的集群上下文。
///
/// # 教案式说明
/// - **意图 (Why)**：真实的集群管理器持有连接池、会话等大量状态；端点解析只依赖其中的地址转换器，
///   因此以窄接口的 `ClusterContext` 承载，避免解析器与管理器双向耦合；
/// - **契约 (What)**：上下文由外部集群层创建并拥有，通过 `Arc` 注入解析器；构造后不可变，可在线程间共享；
/// - **风险 (Trade-offs)**：转换器以 trait object 持有，每次转换多一次虚调用，相比拓扑刷新频率可以忽略。
#[derive(Clone, Debug)]
pub struct ClusterContext {
    translator: Arc<dyn AddressTranslator>,
}

impl ClusterContext {
    pub fn new(translator: Arc<dyn AddressTranslator>) -> Self {
        Self { translator }
    }

    /// 通过已注入的转换器改写地址。
    pub fn translate(&self, address: IpAddr, port: Option<u16>) -> SocketAddr {
        self.translator.translate(address, port)
    }
}
