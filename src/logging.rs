use tracing::Level;

pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .try_init();
}

pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
