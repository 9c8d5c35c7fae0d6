//! Shared criterion settings for the learner benchmarks
//!

#[cfg(feature = "benchmarks")]
pub mod config {
    use std::time::Duration;

    use criterion::{measurement::WallTime, BenchmarkGroup, Criterion};
    #[cfg(not(target_os = "windows"))]
    use pprof::criterion::{Output, PProfProfiler};

    /// Samples per second taken by the profiler
    #[cfg(not(target_os = "windows"))]
    const PROFILER_FREQUENCY: i32 = 100;

    /// Criterion with a flamegraph profiler, active when run with `--profile-time`
    #[cfg(not(target_os = "windows"))]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default().with_profiler(PProfProfiler::new(
            PROFILER_FREQUENCY,
            Output::Flamegraph(None),
        ))
    }

    #[cfg(target_os = "windows")]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default()
    }

    /// Sampling of a benchmark group
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Sampling {
        pub sample_size: usize,
        pub measurement_time: Duration,
        pub warm_up_time: Duration,
    }

    impl Sampling {
        /// Tables of up to a few thousand instances, a single fit takes milliseconds
        pub fn small_tables() -> Self {
            Sampling {
                sample_size: 100,
                measurement_time: Duration::from_secs(5),
                warm_up_time: Duration::from_secs(3),
            }
        }

        /// Tables where a single fit takes a noticeable part of a second
        pub fn large_tables() -> Self {
            Sampling {
                sample_size: 20,
                measurement_time: Duration::from_secs(10),
                warm_up_time: Duration::from_secs(3),
            }
        }

        pub fn apply(&self, group: &mut BenchmarkGroup<WallTime>) {
            group
                .sample_size(self.sample_size)
                .measurement_time(self.measurement_time)
                .warm_up_time(self.warm_up_time)
                .confidence_level(0.97)
                .noise_threshold(0.05);
        }
    }

    pub fn set_default_benchmark_configs(group: &mut BenchmarkGroup<WallTime>) {
        Sampling::small_tables().apply(group);
    }
}
