use crate::config::{ConfigError, SortConfig};
use crate::engine::{Engine, sort_partitioned, sort_recursive, sort_sequential};

/// A validated configuration, optionally with its own rayon pool.
pub struct RadixSorter {
    config: SortConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Default for RadixSorter {
    fn default() -> Self {
        Self {
            config: SortConfig::default(),
            pool: None,
        }
    }
}

impl RadixSorter {
    pub fn new(config: SortConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = match config.thread_count() {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort `keys` in place, ascending, with the chosen engine.
    pub fn sort(&self, engine: Engine, keys: &mut [u32]) {
        match &self.pool {
            Some(pool) => pool.install(|| dispatch(engine, keys, &self.config)),
            None => dispatch(engine, keys, &self.config),
        }
    }

    pub fn sort_recursive(&self, keys: &mut [u32]) {
        self.sort(Engine::Recursive, keys)
    }

    pub fn sort_partitioned(&self, keys: &mut [u32]) {
        self.sort(Engine::Partitioned, keys)
    }

    pub fn sort_sequential(&self, keys: &mut [u32]) {
        self.sort(Engine::Sequential, keys)
    }
}

fn dispatch(engine: Engine, keys: &mut [u32], config: &SortConfig) {
    match engine {
        Engine::Recursive => sort_recursive(keys, config),
        Engine::Partitioned => sort_partitioned(keys, config),
        Engine::Sequential => sort_sequential(keys, config),
    }
}
