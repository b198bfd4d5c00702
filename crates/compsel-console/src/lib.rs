//! Colorful console output for component selection events.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Rejected candidates
//! - **DEBUG**: Metadata fetches and failing rules
//! - **TRACE**: Skipped rules

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Target prefix of the events this layer renders.
const ENGINE_TARGET: &str = "compsel_engine";

#[cfg(not(feature = "verbose-logging"))]
const DEFAULT_DIRECTIVE: &str = "compsel_engine=info";
#[cfg(feature = "verbose-logging")]
const DEFAULT_DIRECTIVE: &str = "compsel_engine=trace";

/// Initializes console output for selection events.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
///
/// `RUST_LOG` takes precedence; the engine's default level only applies
/// when it is unset or empty.
pub fn init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(env_filter())
            .with(SelectionConsoleLayer::new())
            .try_init();
    });
}

fn env_filter() -> EnvFilter {
    let default = DEFAULT_DIRECTIVE
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    EnvFilter::builder()
        .with_default_directive(default)
        .from_env_lossy()
}

/// A tracing layer that formats selection events with colors.
///
/// Writes to stdout unless another writer is supplied through
/// [`with_writer`](Self::with_writer).
pub struct SelectionConsoleLayer<W = fn() -> io::Stdout> {
    make_writer: W,
}

impl SelectionConsoleLayer {
    pub fn new() -> Self {
        Self {
            make_writer: io::stdout,
        }
    }
}

impl Default for SelectionConsoleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> SelectionConsoleLayer<W> {
    /// Sends rendered events to `make_writer` instead.
    pub fn with_writer<W2>(self, make_writer: W2) -> SelectionConsoleLayer<W2>
    where
        W2: for<'a> MakeWriter<'a> + 'static,
    {
        SelectionConsoleLayer { make_writer }
    }
}

impl<S, W> Layer<S> for SelectionConsoleLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(ENGINE_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(self.make_writer.make_writer(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    candidate: Option<String>,
    reason: Option<String>,
    cause: Option<String>,
    error: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "candidate" => &mut self.candidate,
            "reason" => &mut self.reason,
            "cause" => &mut self.cause,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "candidate_rejected" => format_rejected(v),
        "metadata_fetched" => format_fetched(v),
        "rule_failed" => format_failed(v),
        "rule_skipped" if level == Level::TRACE => format_skipped(v),
        _ => String::new(),
    }
}

fn candidate(v: &EventVisitor) -> &str {
    v.candidate.as_deref().unwrap_or("<unknown>")
}

fn format_rejected(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {}",
        "✗".bright_red().bold(),
        candidate(v).white().bold(),
        v.reason.as_deref().unwrap_or("no reason given").yellow()
    )
}

fn format_fetched(v: &EventVisitor) -> String {
    format!(
        "{} {} │ metadata fetched",
        "↓".bright_blue(),
        candidate(v).white()
    )
}

fn format_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} │ rule failed: {}",
        "!".bright_red().bold(),
        candidate(v).white().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red()
    )
}

fn format_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} │ rule skipped ({})",
        "·".bright_black(),
        candidate(v).bright_black(),
        v.cause.as_deref().unwrap_or("unknown").bright_black()
    )
}
