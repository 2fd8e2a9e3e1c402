mod pretty_list;

use {
    anyhow::Result,
    flexi_logger::{
        DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Record,
        WriteMode,
    },
    regex::Regex,
    std::{fmt::Write as FmtWrite, sync::OnceLock},
    textwrap::{termwidth, Options},
};

pub use self::pretty_list::PrettyList;

/// The running logger. Dropping the handle would stop the async writer, so it
/// lives for the rest of the process.
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Matches the gutter on the final line of a wrapped log entry.
static LAST_LINE_GUTTER: OnceLock<Option<Regex>> = OnceLock::new();

/// Setup pretty console and file logging.
///
/// The level is read from RUST_LOG and defaults to `info`. Calling this more
/// than once is harmless.
pub fn setup() -> Result<()> {
    if LOGGER_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory("logs"))
        .format(multiline_format)
        .duplicate_to_stdout(Duplicate::All)
        .write_mode(WriteMode::Async)
        .start()?;
    let _ = LOGGER_HANDLE.set(handle);

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(())
}

/// Flush any log lines still queued by the async writer.
pub fn flush() {
    if let Some(handle) = LOGGER_HANDLE.get() {
        handle.flush();
    }
}

/// A multiline log format for flexi_logger.
///
/// Logs are automatically wrapped at terminal width and prefixed with unicode
/// so it's easy to tell where a big log statement begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let mut full_line = String::new();
    writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .map_err(to_io_error)?;
    write!(&mut full_line, "{}", &record.args()).map_err(to_io_error)?;

    writeln!(w, "{}", wrap_with_gutter(&full_line, termwidth().min(74)))
}

/// Wrap text to the given width, marking the first, middle, and last lines
/// with a box-drawing gutter.
fn wrap_with_gutter(text: &str, width: usize) -> String {
    let wrap_options = Options::new(width)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");
    let wrapped = textwrap::fill(text, wrap_options);
    match LAST_LINE_GUTTER.get_or_init(|| Regex::new(r"(┃)(.*)$").ok()) {
        Some(last_line) => last_line.replace(&wrapped, "┗$2").into_owned(),
        None => wrapped,
    }
}

fn to_io_error(err: std::fmt::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_line_entries_only_have_the_opening_gutter() {
        let wrapped = wrap_with_gutter("INFO hello", 74);
        assert_eq!(wrapped, "┏ INFO hello");
    }

    #[test]
    fn last_line_gets_the_closing_gutter() {
        let wrapped = wrap_with_gutter("INFO [header]\nfirst\nsecond", 74);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("┏ "));
        assert!(lines[1].starts_with("┃ "));
        assert_eq!(lines[2], "┗ second");
    }
}
