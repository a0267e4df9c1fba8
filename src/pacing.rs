use rand::Rng;
use std::fmt::Debug;
use tokio::{
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::debug;

/// Decides how long to wait between two outbound requests.
pub trait Pacing: Debug + Send + Sync {
    fn interval(&self) -> Duration;
}

/// Uniformly random interval within `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl RandomDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            RandomDelay { min, max }
        } else {
            RandomDelay { min: max, max: min }
        }
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        RandomDelay::new(Duration::from_secs(1), Duration::from_secs(3))
    }
}

impl Pacing for RandomDelay {
    fn interval(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacing for NoDelay {
    fn interval(&self) -> Duration {
        Duration::ZERO
    }
}

/// Minimum interval between consecutive requests, shared by every source.
#[derive(Debug)]
pub struct Throttle {
    pacing: Box<dyn Pacing>,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new<P: Pacing + 'static>(pacing: P) -> Self {
        Throttle {
            pacing: Box::new(pacing),
            last_request: Mutex::new(None),
        }
    }

    /// Sleeps until the policy allows the next request, then stamps it.
    pub async fn wait(&self) {
        let mut last_request = self.last_request.lock().await;
        if let Some(last) = *last_request {
            let interval = self.pacing.interval();
            let elapsed = last.elapsed();
            if elapsed < interval {
                debug!("Pacing for {:?}", interval - elapsed);
                tokio::time::sleep(interval - elapsed).await;
            }
        }
        last_request.replace(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Throttle::new(RandomDelay::default())
    }
}
