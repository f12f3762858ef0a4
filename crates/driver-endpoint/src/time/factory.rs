use std::sync::Arc;

use tracing::{debug, info};

use super::source::{PreciseClock, SystemClock, TimeSource, wall_clock_since_epoch};
use crate::config::ClockSettings;
use crate::error::ClockError;

/// 按配置构造时间源。
///
/// # 教案式说明
/// - **意图 (Why)**：时间源实现的选择只在客户端启动时做一次，以显式工厂取代进程级全局单例，
///   调用方拿到实例后按所有权或引用传给各消费者；
/// - **契约 (What)**：
///   - `use_native_clock` 为真且 [`PreciseClock::probe`] 成功时返回高精度实现；
///   - 其余情况返回 [`SystemClock`]，回退只体现在返回实例的 [`TimeSource::resolution`] 上，不是错误；
///   - 宿主墙钟早于 Unix 纪元时两种实现都无意义，返回 [`ClockError::WallClockBeforeEpoch`]，属于启动期致命错误；
/// - **执行逻辑 (How)**：先校验墙钟，再按开关探测高精度能力，最后记录一次选择结果。
pub fn new_time_source(settings: &ClockSettings) -> Result<Arc<dyn TimeSource>, ClockError> {
    if let Err(behind) = wall_clock_since_epoch() {
        return Err(ClockError::WallClockBeforeEpoch {
            behind_millis: behind.as_millis(),
        });
    }

    if settings.use_native_clock {
        if let Some(precise) = PreciseClock::probe() {
            info!(resolution = ?precise.resolution(), "selected precise wall clock");
            return Ok(Arc::new(precise));
        }
        debug!("precise wall clock unavailable on this host; falling back to millisecond clock");
    }

    info!(resolution = ?SystemClock.resolution(), "selected millisecond system clock");
    Ok(Arc::new(SystemClock))
}
