/*!
 * Console logging for RepoDump
 *
 * Progress lines go through `info!`, per-file failures through `error!`.
 * The default level is `info` so a plain run shows one line per file.
 */

use std::io::Write;

use env_logger::Builder;

/// Environment variable overriding the computed log filter
pub const LOG_ENV: &str = "REPODUMP_LOG";

/// Map the `-v` count and `--quiet` flag to a log filter
pub fn level_filter(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn setup_logger(verbosity: u8, quiet: bool) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().filter_or(LOG_ENV, level_filter(verbosity, quiet));

    Builder::from_env(env)
        .format(|buf, record| {
            // Styles are dropped when stderr is not a terminal
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{style}[{}]{style:#} {}",
                record.level(),
                record.args()
            )
        })
        .try_init()
}
