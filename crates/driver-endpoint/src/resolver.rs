//! 拓扑行到可连接端点的解析。
//!
//! # 模块定位（Why）
//! - 不同版本的服务端以不同 schema 广播节点地址：新版本（`peers_v2`）提供独立的 `native_address`/`native_port`，
//!   旧版本只有不带端口的 `peer` 列；解析器负责屏蔽这一差异；
//! - 拓扑刷新流程会为每一行调用 [`EndpointResolver::create`]，结果直接交给连接池，因此解析必须同步、无 I/O、可重入。
//!
//! # 算法（How）
//! 1. 行包含 `native_address` 时按现代 schema 读取地址与端口，交由转换器改写；
//! 2. 否则按旧版 schema 读取 `peer`；列缺失或为 null 时返回 `Ok(None)`，调用方应静默跳过该节点；
//! 3. 两个分支都必须经过 [`ClusterContext::translate`]，解析器从不直接用行内原始值构造 [`EndPoint`]。
//!
//! # 契约说明（What）
//! - 端口非法、必填列为 null 或缺失属于单行硬失败，以 [`ResolveError`] 返回；
//! - 在 [`EndpointResolver::init`] 之前调用 `create` 属于编程错误，会直接 panic。

use std::net::IpAddr;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, trace, warn};

use crate::cluster::ClusterContext;
use crate::endpoint::EndPoint;
use crate::error::ResolveError;
use crate::row::{TopologyRow, columns};

/// 一行拓扑数据在解析前被归类出的 schema 形态。
///
/// 通过一次列存在性检查得到，之后按变体确定性分派，避免把存在性判断散落在各处。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowShape {
    /// 新版本服务端：地址与端口独立广播。
    Modern { address: IpAddr, port: u16 },
    /// 旧版本服务端：仅有广播地址；`None` 表示节点尚未进入拓扑。
    Legacy { address: Option<IpAddr> },
}

impl RowShape {
    /// 从行中读取并归类。
    ///
    /// # 契约说明（What）
    /// - 以 `native_address` 列是否存在作为 schema 判定依据；
    /// - 现代分支下 `native_address` 为 null、`native_port` 缺失/为 null/越界均返回错误；
    /// - 旧版分支下 `peer` 缺失与为 null 等价，均得到 `Legacy { address: None }`。
    pub fn read<R>(row: &R) -> Result<Self, ResolveError>
    where
        R: TopologyRow + ?Sized,
    {
        if row.contains(columns::NATIVE_ADDRESS) {
            let address = row
                .get_inet(columns::NATIVE_ADDRESS)?
                .ok_or_else(|| ResolveError::NullValue {
                    column: columns::NATIVE_ADDRESS.to_owned(),
                })?;
            let raw_port = row
                .get_int(columns::NATIVE_PORT)?
                .ok_or_else(|| ResolveError::NullValue {
                    column: columns::NATIVE_PORT.to_owned(),
                })?;
            let port = u16::try_from(raw_port).map_err(|_| ResolveError::PortOutOfRange {
                column: columns::NATIVE_PORT.to_owned(),
                value: raw_port,
            })?;
            Ok(RowShape::Modern { address, port })
        } else {
            let address = if row.contains(columns::PEER) {
                row.get_inet(columns::PEER)?
            } else {
                None
            };
            Ok(RowShape::Legacy { address })
        }
    }

    fn schema(&self) -> &'static str {
        match self {
            RowShape::Modern { .. } => "modern",
            RowShape::Legacy { .. } => "legacy",
        }
    }
}

/// 端点解析契约。
///
/// # 契约说明（What）
/// - `init`：注入集群上下文；允许外部集群层在重新初始化时再次调用以重绑定，写入是原子的；
/// - `create`：把一行拓扑数据解析为零或一个端点；必须在 `init` 之后调用；
/// - 实现需满足 `Send + Sync`，可被多个拓扑刷新线程并发调用而无需额外加锁。
pub trait EndpointResolver: Send + Sync {
    fn init(&self, context: Arc<ClusterContext>);

    fn create(&self, row: &dyn TopologyRow) -> Result<Option<EndPoint>, ResolveError>;
}

/// 默认解析器。
///
/// # 教案式说明
/// - **意图 (Why)**：集群上下文往往只有在集群引导完成后才可用，因此保留“先构造、后注入”的两阶段初始化；
///   若构造时上下文已就绪，可直接使用 [`DefaultEndpointResolver::with_context`] 跳过第二阶段。
/// - **实现 (How)**：上下文存放在 [`ArcSwapOption`] 中，`init` 为一次原子发布，任意线程随后的读取
///   都能观测到完整初始化的上下文；`create` 只做一次无锁加载。
/// - **风险 (Trade-offs)**：未初始化即调用 `create` 会 panic，而不是返回可恢复错误，这是刻意把编程错误
///   暴露在测试期。
#[derive(Debug, Default)]
pub struct DefaultEndpointResolver {
    context: ArcSwapOption<ClusterContext>,
}

impl DefaultEndpointResolver {
    /// 构造尚未注入上下文的解析器。
    pub fn new() -> Self {
        Self::default()
    }

    /// 构造时直接注入上下文。
    pub fn with_context(context: Arc<ClusterContext>) -> Self {
        Self {
            context: ArcSwapOption::new(Some(context)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.context.load().is_some()
    }

    fn context(&self) -> Arc<ClusterContext> {
        match self.context.load_full() {
            Some(context) => context,
            None => panic!("DefaultEndpointResolver::create called before init"),
        }
    }
}

impl EndpointResolver for DefaultEndpointResolver {
    fn init(&self, context: Arc<ClusterContext>) {
        self.context.store(Some(context));
    }

    fn create(&self, row: &dyn TopologyRow) -> Result<Option<EndPoint>, ResolveError> {
        let context = self.context();
        let shape = RowShape::read(row)?;

        let (address, port) = match shape {
            RowShape::Modern { address, port } => {
                if address.is_unspecified() {
                    warn!(
                        %address,
                        port,
                        "node advertises the bind-all address as native_address; this is most likely a server misconfiguration"
                    );
                }
                (address, Some(port))
            }
            RowShape::Legacy {
                address: Some(address),
            } => (address, None),
            RowShape::Legacy { address: None } => {
                debug!("skipping topology row without a broadcast address");
                return Ok(None);
            }
        };

        let endpoint = EndPoint::translated(context.translate(address, port));
        trace!(
            schema = shape.schema(),
            %address,
            port = ?port,
            endpoint = %endpoint,
            "resolved topology row"
        );
        Ok(Some(endpoint))
    }
}

/// 逐行解析一批拓扑数据。
///
/// 每一行独立解析，单行失败只体现在该行对应的结果中，不影响其它行；结果顺序与输入一致。
pub fn resolve_all<'a, R, I>(
    resolver: &(impl EndpointResolver + ?Sized),
    rows: I,
) -> Vec<Result<Option<EndPoint>, ResolveError>>
where
    R: TopologyRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    rows.into_iter().map(|row| resolver.create(row)).collect()
}
