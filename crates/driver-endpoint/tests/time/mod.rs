//! 时间源集成测试入口。
//!
//! # 模块目的（Why）
//! - 验证默认毫秒时钟的单调非递减性以及与参考毫秒时钟的一致性；
//! - 验证工厂按配置选择实现，回退只体现在 `resolution()` 上。
//!
//! # 维护提示（How）
//! - 墙钟测试依赖宿主时间，断言只使用前后采样夹逼，不假设具体数值。

mod system_clock;
