use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Success,
    Info,
}

/// One line of progress output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Warnings yellow, successes bold green, info plain. `colored` decides whether the
    /// terminal gets escapes at all (tty, `NO_COLOR`, `CLICOLOR_FORCE`).
    pub fn styled(&self) -> String {
        match self.level {
            NoticeLevel::Warning => self.message.yellow().to_string(),
            NoticeLevel::Success => self.message.green().bold().to_string(),
            NoticeLevel::Info => self.message.clone(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives notices as the seeder produces them.
pub trait NoticeSink {
    fn emit(&mut self, notice: Notice);
}

/// Collects notices in memory.
impl NoticeSink for Vec<Notice> {
    fn emit(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Writes one styled line per notice. The first write failure is kept for [`Console::finish`].
pub struct Console<W: Write = io::Stdout> {
    out: W,
    error: Option<io::Error>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Surface a failed write (e.g. a closed pipe) once the run is over.
    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> NoticeSink for Console<W> {
    fn emit(&mut self, notice: Notice) {
        if let Err(e) = writeln!(self.out, "{}", notice.styled()) {
            warn!(error = %e, notice = %notice, "failed to write notice");
            self.error.get_or_insert(e);
        }
    }
}

/// Mirror a notice into the log at the matching level.
pub(crate) fn trace_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Warning => warn!("{}", notice.message),
        NoticeLevel::Success => info!("{}", notice.message),
        NoticeLevel::Info => debug!("{}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // One test owns the global colour override so parallel tests cannot flip it mid-assert.
    #[test]
    fn styling_follows_colour_control() {
        colored::control::set_override(true);
        let warning = Notice::warning("Skipping google (missing env credentials)").styled();
        let success = Notice::success("Created google SocialApp").styled();
        let info = Notice::info("No changes for google").styled();

        colored::control::set_override(false);
        let plain_warning = Notice::warning("Skipping google (missing env credentials)").styled();
        let mut console = Console::new(Vec::new());
        console.emit(Notice::success("Created google SocialApp"));
        console.emit(Notice::info("No changes for google"));
        let written = console.finish().unwrap();
        colored::control::unset_override();

        assert!(warning.starts_with("\x1b["));
        assert!(warning.contains("33"));
        assert!(warning.contains("Skipping google (missing env credentials)"));
        assert!(success.contains("32"));
        assert!(success.contains("Created google SocialApp"));
        assert_eq!(info, "No changes for google");

        assert_eq!(plain_warning, "Skipping google (missing env credentials)");
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "Created google SocialApp\nNo changes for google\n"
        );
    }

    #[test]
    fn console_reports_write_failure() {
        let mut console = Console::new(BrokenPipe);
        console.emit(Notice::info("No changes for google"));
        console.emit(Notice::info("No changes for facebook"));
        let err = console.finish().err().expect("write failure was dropped");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.emit(Notice::info("a"));
        sink.emit(Notice::success("b"));
        assert_eq!(sink, vec![Notice::info("a"), Notice::success("b")]);
        assert_eq!(sink[1].to_string(), "b");
    }
}
