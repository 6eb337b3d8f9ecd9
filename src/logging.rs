//! Debug tracing to stderr
//!
//! Off unless `TERMCLIP_DEBUG=1` (or `debug = true` in the config file);
//! tracing never changes what the program does.

use std::io::Write;
use std::time::SystemTime;

use log::LevelFilter;

pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    };

    // A logger installed earlier (tests) stays in place
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
