use crate::digit::PASSES;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("histogram threshold must be at least 1")]
    ZeroHistogramThreshold,
    #[error("work quantum must be at least 1")]
    ZeroWorkQuantum,
    #[error("digit passes must be between 1 and 4, got {0}")]
    DigitPasses(usize),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Tuning knobs for the sort engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    histogram_threshold: usize,
    work_quantum: usize,
    digit_passes: usize,
    threads: Option<usize>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            histogram_threshold: 64 * 1024,
            work_quantum: 8 * 1024,
            digit_passes: PASSES,
            threads: None,
        }
    }
}

impl SortConfig {
    /// Largest slice the recursive histogram builder counts without splitting.
    pub fn with_histogram_threshold(mut self, n: usize) -> Self {
        self.histogram_threshold = n;
        self
    }
    /// Keys per work partition in the partitioned engine.
    pub fn with_work_quantum(mut self, n: usize) -> Self {
        self.work_quantum = n;
        self
    }
    /// Sort on only the `n` least significant bytes. The result is a stable
    /// sort by those bytes, which is a full sort when every key fits.
    pub fn with_digit_passes(mut self, n: usize) -> Self {
        self.digit_passes = n;
        self
    }
    /// Run on a dedicated pool of `n` threads instead of the global one.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = Some(n);
        self
    }

    pub fn histogram_threshold(&self) -> usize {
        self.histogram_threshold
    }
    pub fn work_quantum(&self) -> usize {
        self.work_quantum
    }
    pub fn digit_passes(&self) -> usize {
        self.digit_passes
    }
    pub fn thread_count(&self) -> Option<usize> {
        self.threads
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_threshold == 0 {
            return Err(ConfigError::ZeroHistogramThreshold);
        }
        if self.work_quantum == 0 {
            return Err(ConfigError::ZeroWorkQuantum);
        }
        if !(1..=PASSES).contains(&self.digit_passes) {
            return Err(ConfigError::DigitPasses(self.digit_passes));
        }
        Ok(())
    }
}
