// core/src/engine.rs
//
// Generic memoizing engine around a per-word pipeline.
// Language crates implement `WordPipeline`; the engine owns the LRU cache and
// its statistics so every transcriber gets the same cache behaviour.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::Config;

/// A deterministic word-level transformation.
///
/// `run` must be a pure function of the request: the engine returns cached
/// outputs for equal requests without calling it again.
pub trait WordPipeline {
    /// Everything that influences the output (word, stress, options).
    type Request: Clone + Eq + Hash;
    type Output: Clone;

    fn run(&self, request: &Self::Request) -> Self::Output;
}

/// Pipeline plus an LRU cache keyed by request.
///
/// The cache sits behind a mutex and the counters are atomic, so an engine can
/// be shared across threads when the pipeline itself is `Sync`.
pub struct Engine<P: WordPipeline> {
    pipeline: P,
    cache: Mutex<lru::LruCache<P::Request, P::Output>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl<P: WordPipeline> Engine<P> {
    /// Create an engine whose cache holds at most `capacity` entries
    /// (a capacity of 0 is treated as 1).
    pub fn new(pipeline: P, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            pipeline,
            cache: Mutex::new(lru::LruCache::new(cap)),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    pub fn from_config(pipeline: P, config: &Config) -> Self {
        Self::new(pipeline, config.max_cache_size)
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Run the pipeline, consulting the cache first.
    ///
    /// The lock is not held while the pipeline runs; two threads missing on
    /// the same request both compute it and the later `put` wins.
    pub fn process(&self, request: &P::Request) -> P::Output {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(request) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                return cached.clone();
            }
        }
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let out = self.pipeline.run(request);
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(request.clone(), out.clone());
        }
        out
    }

    /// Returns (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Hit rate as a percentage, None before the first access.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.lock().map(|c| c.cap().get()).unwrap_or(0)
    }

    /// Drop all cached outputs and reset the counters.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Upper {
        calls: Cell<usize>,
    }

    impl WordPipeline for Upper {
        type Request = String;
        type Output = String;

        fn run(&self, request: &String) -> String {
            self.calls.set(self.calls.get() + 1);
            request.to_uppercase()
        }
    }

    fn engine(cap: usize) -> Engine<Upper> {
        Engine::new(Upper { calls: Cell::new(0) }, cap)
    }

    #[test]
    fn repeated_requests_hit_cache() {
        let e = engine(4);
        assert_eq!(e.cache_hit_rate(), None);
        assert_eq!(e.process(&"мир".to_string()), "МИР");
        assert_eq!(e.process(&"мир".to_string()), "МИР");
        assert_eq!(e.cache_stats(), (1, 1));
        assert_eq!(e.pipeline().calls.get(), 1);
        assert_eq!(e.cache_hit_rate(), Some(50.0));
    }

    #[test]
    fn lru_evicts_oldest() {
        let e = engine(2);
        e.process(&"а".to_string());
        e.process(&"б".to_string());
        e.process(&"в".to_string());
        assert_eq!(e.cache_size(), 2);
        e.process(&"а".to_string());
        assert_eq!(e.cache_stats(), (0, 4));
    }

    #[test]
    fn clear_resets_everything() {
        let e = engine(0);
        assert_eq!(e.cache_capacity(), 1);
        e.process(&"да".to_string());
        e.process(&"да".to_string());
        e.clear_cache();
        assert_eq!(e.cache_size(), 0);
        assert_eq!(e.cache_stats(), (0, 0));
    }
}
