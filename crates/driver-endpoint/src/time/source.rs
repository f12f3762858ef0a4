use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 提供自 Unix 纪元（1970-01-01T00:00:00Z）起的微秒时间。
///
/// # 接口约束（What）
/// - `now_micros` 不阻塞、不失败，可被任意数量线程并发调用；
/// - 返回值以微秒为单位，但精度取决于实现，见 [`TimeSource::resolution`]。
pub trait TimeSource: Send + Sync + fmt::Debug + 'static {
    fn now_micros(&self) -> i64;

    /// 实现的真实精度。
    fn resolution(&self) -> ClockResolution;
}

/// 时间源的真实精度标签。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockResolution {
    /// 毫秒精度，低三位恒为 0。
    Millisecond,
    /// 操作系统墙钟原生分辨率，主流平台可达亚微秒。
    Microsecond,
    /// 由测试手动驱动。
    Manual,
}

/// 墙钟相对纪元的偏移；墙钟早于纪元时返回 `Err`，携带落后的时长。
pub(crate) fn wall_clock_since_epoch() -> Result<Duration, Duration> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| err.duration())
}

fn saturating_i64(value: u128) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// 默认时间源：毫秒系统时钟 × 1000。
///
/// # 教案式说明
/// - **意图 (Why)**：在无法确认高精度时钟可用时提供稳定的兜底实现；
/// - **契约 (What)**：返回值总是 1000 的整数倍，调用方不得假设亚毫秒分辨率；
///   构造之后若墙钟被回拨到纪元之前，结果饱和为 0 而不是报错。
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_micros(&self) -> i64 {
        match wall_clock_since_epoch() {
            Ok(elapsed) => saturating_i64(elapsed.as_millis()).saturating_mul(1000),
            Err(_) => 0,
        }
    }

    fn resolution(&self) -> ClockResolution {
        ClockResolution::Millisecond
    }
}

/// 高精度时间源：直接读取墙钟的原生分辨率。
///
/// 只能通过 [`PreciseClock::probe`] 获得，探测确认宿主墙钟确实比毫秒更细之后才会返回实例。
#[derive(Clone, Copy, Debug)]
pub struct PreciseClock {
    _probed: (),
}

impl PreciseClock {
    const PROBE_SAMPLES: usize = 8;

    /// 探测宿主墙钟是否具备亚毫秒分辨率。
    ///
    /// # 执行步骤（How）
    /// 1. 连续采样墙钟至多 8 次；
    /// 2. 任一样本的亚毫秒部分非零，即认定墙钟具备更细分辨率；
    /// 3. 全部样本都按毫秒对齐、或墙钟早于纪元时返回 `None`。
    pub fn probe() -> Option<Self> {
        Self::probe_with(|| wall_clock_since_epoch().ok())
    }

    pub(crate) fn probe_with<F>(mut sample: F) -> Option<Self>
    where
        F: FnMut() -> Option<Duration>,
    {
        for _ in 0..Self::PROBE_SAMPLES {
            let elapsed = sample()?;
            if elapsed.subsec_nanos() % 1_000_000 != 0 {
                return Some(Self { _probed: () });
            }
        }
        None
    }
}

impl TimeSource for PreciseClock {
    fn now_micros(&self) -> i64 {
        match wall_clock_since_epoch() {
            Ok(elapsed) => saturating_i64(elapsed.as_micros()),
            Err(_) => 0,
        }
    }

    fn resolution(&self) -> ClockResolution {
        ClockResolution::Microsecond
    }
}

/// 手动推进的时间源。
///
/// # 行为概览（How）
/// - 内部以 `AtomicI64` 保存当前微秒值，克隆体共享同一计数器；
/// - `advance` 只增不减，`set` 可任意改写，便于构造回拨等边界场景。
#[derive(Clone, Debug, Default)]
pub struct ManualTimeSource {
    micros: Arc<AtomicI64>,
}

impl ManualTimeSource {
    pub fn new(start_micros: i64) -> Self {
        Self {
            micros: Arc::new(AtomicI64::new(start_micros)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let delta = saturating_i64(by.as_micros());
        // 闭包恒返回 `Some`，更新不会失败
        let _ = self
            .micros
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(delta))
            });
    }

    pub fn set(&self, micros: i64) {
        self.micros.store(micros, Ordering::Release);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_micros(&self) -> i64 {
        self.micros.load(Ordering::Acquire)
    }

    fn resolution(&self) -> ClockResolution {
        ClockResolution::Manual
    }
}
