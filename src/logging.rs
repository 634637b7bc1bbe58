use tracing::subscriber::SetGlobalDefaultError;

/// Installs a compact `fmt` subscriber as the process-wide default.
///
/// Fails if another subscriber has already been installed, which is the
/// common case when several demos or tests share one process.
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt().compact().finish();
    tracing::subscriber::set_global_default(subscriber)
}
