use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Crate targets that make up the review service.
pub const SERVICE_TARGETS: &[&str] = &[
    "pr_review_bot",
    "api",
    "pr_reviewer",
    "git_context_engine",
    "ai_llm_service",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Build the formatting layer used by the binary.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with target and `file:line`
/// - Span close events (duration of instrumented handlers)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
}

/// Level directives for every service crate, e.g. `api=debug`.
pub fn service_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    SERVICE_TARGETS
        .iter()
        .filter_map(|t| format!("{t}={lvl}").parse::<Directive>().ok())
        .collect()
}

/// Create an EnvFilter from `RUST_LOG` or the fallback `default`.
///
/// When `service_level` is given, the service crates are raised to it on top
/// of the base filter (third-party crates stay at the base level).
pub fn env_filter_with_level(default: &str, service_level: Option<Level>) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match service_level {
        Some(level) => service_directives(level)
            .into_iter()
            .fold(base, |f, d| f.add_directive(d)),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_service_crate() {
        let ds = service_directives(Level::DEBUG);
        assert_eq!(ds.len(), SERVICE_TARGETS.len());
        assert!(ds.iter().any(|d| d.to_string() == "pr_reviewer=debug"));
    }
}
