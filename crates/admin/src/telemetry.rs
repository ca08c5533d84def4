//! Process-wide tracing and Sentry setup for the admin binary.

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start Sentry if a DSN is configured.
///
/// The returned guard flushes pending events on drop, so it must live for
/// the whole process. Returns `None` when no DSN is set (local development).
pub fn init_sentry(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let guard = sentry::init((
        dsn?,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));
    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Install the global tracing subscriber with a Sentry bridge.
///
/// `default_directives` applies when `RUST_LOG` is unset. Errors and
/// warnings become Sentry events; info and debug become breadcrumbs.
pub fn init_tracing(default_directives: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives.into());

    let sentry_layer = sentry_tracing::layer().event_filter(|metadata| match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_layer)
        .init();
}
