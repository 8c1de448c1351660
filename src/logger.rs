use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Stage spans
/// (`mono_left`, `disparity`, `point_cloud2`, ...) report their timing on
/// close when debug output is enabled.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

pub fn init_with_default(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let span_events = if wants_span_timing(&env_filter) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    // A second init (tests, embedding apps) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

fn wants_span_timing(filter: &EnvFilter) -> bool {
    let directives = filter.to_string();
    directives.contains("debug") || directives.contains("trace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_timing_follows_level() {
        assert!(wants_span_timing(&EnvFilter::new("debug")));
        assert!(wants_span_timing(&EnvFilter::new("info,stereo_proc_rs=trace")));
        assert!(!wants_span_timing(&EnvFilter::new("info")));
    }

    #[test]
    fn test_init_twice() {
        init();
        init_with_default("warn");
    }
}
