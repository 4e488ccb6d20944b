use spdlog::{Level, LevelFilter};

/// Sets the level filter of the default logger. Records below `Warn` go to
/// stdout and the rest to stderr (the default logger's sinks).
pub fn configure(verbose: bool) {
    spdlog::default_logger().set_level_filter(level_filter(verbose));
}

fn level_filter(verbose: bool) -> LevelFilter {
    match verbose {
        true => LevelFilter::All,
        false => LevelFilter::MoreSevereEqual(Level::Info),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert!(matches!(level_filter(true), LevelFilter::All));
        assert!(matches!(
            level_filter(false),
            LevelFilter::MoreSevereEqual(Level::Info)
        ));
    }
}
