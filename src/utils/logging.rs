use tracing::Level;

// json logs so that lines stay machine readable when shipped from a lambda or container
pub fn setup_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI color codes show up as noise in collected logs.
        .with_ansi(false)
        .json()
        .try_init();
}
