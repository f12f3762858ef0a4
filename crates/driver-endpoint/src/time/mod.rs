//! 时间源抽象模块，为超时、推测执行等延迟敏感决策提供“微秒标注”的当前时间。
//!
//! # 模块定位（Why）
//! - 客户端多处需要自纪元起的微秒时间戳；将时间源收敛为 [`TimeSource`] trait，生产与测试可以平滑切换；
//! - 选择哪种实现是启动期的一次性配置决策，由 [`new_time_source`] 工厂完成，不存在进程级可变全局单例。
//!
//! # 结构概览（What）
//! - [`SystemClock`]：毫秒系统时钟乘以 1000，微秒标注、毫秒精度；
//! - [`PreciseClock`]：直接读取操作系统墙钟的原生分辨率；
//! - [`ManualTimeSource`]：手动推进的确定性时间源，供测试使用；
//! - [`new_time_source`]：按 [`crate::config::ClockSettings`] 选择实现。
//!
//! # 使用指引（How）
//! - 客户端启动时调用一次工厂，把返回的 `Arc<dyn TimeSource>` 传给需要时间能力的组件；
//! - 需要判断实际精度时读取 [`TimeSource::resolution`]，不要假设一定具备亚毫秒分辨率。

mod factory;
mod source;

pub use factory::new_time_source;
pub use source::{ClockResolution, ManualTimeSource, PreciseClock, SystemClock, TimeSource};
