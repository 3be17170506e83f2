//! Compute devices: each one owns a private `rayon` thread pool, so that
//! workers bound to different devices never compete for the same threads.

pub struct Device {
    index: usize,
    pool: rayon::ThreadPool,
}

impl Device {

    /// Bring up device `index` with `threads` threads (0: one per core).
    pub fn init(index: usize, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |n| format!("device-{index}-{n}"))
            .build()
            .map_err(|source| Error::Device { index, source })?;
        log::debug!("Device {index} initialized with {} threads", pool.current_num_threads());
        Ok(Self { index, pool })
    }

    pub fn index(&self) -> usize { self.index }

    pub fn threads(&self) -> usize { self.pool.current_num_threads() }

    /// Run `op` on this device's threads
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("index", &self.index)
            .field("threads", &self.threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_runs_on_device_threads() {
        let device = Device::init(3, 2).unwrap();
        assert_eq!(device.index(), 3);
        assert_eq!(device.threads(), 2);
        let name = device.install(|| std::thread::current().name().map(String::from));
        assert!(name.unwrap().starts_with("device-3-"));
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use crate::error::{Error, Result};
