// src/telemetry.rs
//! Tracing subscriber setup.
//!
//! Every emitted line is tagged with the correlation id of the request it
//! was logged from, read from [`crate::context`] at format time.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{
        format::{FormatEvent, FormatFields, Writer},
        time::{FormatTime, SystemTime},
        FmtContext,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;
use crate::context;
use crate::error::{AppError, Result};

/// Event formatter producing
/// `<timestamp> <LEVEL> [request_id=<id>] <target>: <fields>`.
#[derive(Debug, Clone, Default)]
pub struct RequestIdFormat {
    timer: SystemTime,
}

impl<S, N> FormatEvent<S, N> for RequestIdFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        self.timer.format_time(&mut writer)?;
        context::with_current(|id| {
            write!(
                writer,
                " {:>5} [request_id={}] {}: ",
                metadata.level(),
                id,
                metadata.target()
            )
        })?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(RequestIdFormat::default()),
        )
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))
}
