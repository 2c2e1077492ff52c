use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the workspace crates whose events this layer renders.
pub const TARGET_PREFIXES: &[&str] = &[
    "ai_llm_service",
    "repo_intake",
    "review_history",
    "code_reviewer",
    "api",
    "code_critic",
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

fn is_workspace_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|p| target.starts_with(p))
}

/// Formatting layer that renders ONLY events emitted by workspace crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - Span close events (durations of instrumented functions)
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_workspace)
}

/// Level directives for every workspace crate, e.g. `repo_intake=debug`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .filter_map(|p| format!("{p}={lvl}").parse().ok())
        .collect()
}

/// `EnvFilter` from `RUST_LOG` (or `default`), with `level` applied to workspace crates.
///
/// Example: `default = "warn"`, `level = Level::INFO` shows third-party logs
/// at WARN and this service's logs at INFO.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    level_directives(level)
        .into_iter()
        .fold(base, |f, d| f.add_directive(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_workspace_targets_only() {
        assert!(is_workspace_target("repo_intake::github"));
        assert!(is_workspace_target("code_reviewer"));
        assert!(!is_workspace_target("hyper::proto"));
    }

    #[test]
    fn one_directive_per_crate() {
        assert_eq!(level_directives(Level::DEBUG).len(), TARGET_PREFIXES.len());
    }
}
