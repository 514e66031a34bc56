//! Process identity and every terminal message path.
//!
//! The parser itself never prints. When a parse ends in a [`ParseError`],
//! [`Identity::exit`] renders it to the right stream and terminates the
//! process. The `write_*` methods produce the same bytes into any writer.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ParseError;

/// Names and version are capped at this many bytes.
const NAME_MAX: usize = 255;

#[derive(Debug, Clone)]
pub struct Identity {
    progname: String,
    canonical_name: Option<String>,
    version: String,
    usage: String,
    help: String,
    tagline: String,
}

impl Default for Identity {
    fn default() -> Self {
        Identity {
            progname: "(progname)".to_string(),
            canonical_name: None,
            version: "0.0.0".to_string(),
            usage: "(usage not provided)".to_string(),
            help: "(help not provided)".to_string(),
            tagline: String::new(),
        }
    }
}

impl Identity {
    /// Identity whose display name is the last path component of `argv0`.
    pub fn new(argv0: &str) -> Self {
        Self::default().with_progname(basename(argv0))
    }

    /// Like [`Identity::new`], reading argv[0] from the environment.
    pub fn from_env() -> Self {
        match std::env::args_os().next() {
            Some(argv0) => Self::new(&argv0.to_string_lossy()),
            None => Self::default(),
        }
    }

    pub fn with_progname(mut self, name: &str) -> Self {
        if !name.is_empty() {
            self.progname = capped(name);
        }
        self
    }

    /// Name used in version output instead of the program name.
    pub fn with_canonical_name(mut self, name: &str) -> Self {
        self.canonical_name = Some(capped(name)).filter(|n| !n.is_empty());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = capped(version);
        self
    }

    /// Text following the program name on `usage:` lines.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn with_tagline(mut self, tagline: &str) -> Self {
        self.tagline = tagline.to_string();
        self
    }

    pub fn progname(&self) -> &str {
        &self.progname
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn display_name(&self) -> &str {
        self.canonical_name.as_deref().unwrap_or(&self.progname)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn write_usage_line<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "usage: {} {}\n", self.progname, self.usage)
    }

    pub fn write_fail<W: Write>(
        &self,
        w: &mut W,
        append_usage: bool,
        message: impl Display,
    ) -> io::Result<()> {
        write!(w, "error: {}{}\n", self.progname, message)?;
        if append_usage {
            self.write_usage_line(w)?;
        }
        Ok(())
    }

    pub fn write_warn<W: Write>(&self, w: &mut W, message: impl Display) -> io::Result<()> {
        write!(w, "{}{}\n", self.progname, message)
    }

    pub fn write_help<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_usage_line(w)?;
        write!(w, "{}\n", self.help)?;
        if !self.tagline.is_empty() {
            write!(w, "\n{}: {}\n", self.progname, self.tagline)?;
        }
        Ok(())
    }

    pub fn write_version<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let name = self.display_name();
        write!(w, "{} version: {}\n", name, self.version)?;
        if !self.tagline.is_empty() {
            write!(w, "{} - {}\n", name, self.tagline)?;
        }
        Ok(())
    }

    /// Render the message for `err`. Help and version requests produce their
    /// normal output; everything else produces an error report.
    pub fn write_error<W: Write>(&self, w: &mut W, err: &ParseError) -> io::Result<()> {
        match err {
            ParseError::WantsHelp => self.write_help(w),
            ParseError::WantsVersion => self.write_version(w),
            ParseError::UnknownArgument(token) => {
                write!(w, "error: unknown argument [{}].\n", token)?;
                write!(w, "Try {} --help for more information.\n", self.progname)
            }
            ParseError::MissingArgument(name) => {
                write!(w, "error: missing argument for [{}].\n", name)?;
                if name.starts_with('-') {
                    write!(w, "Try {} --help for more information.\n", self.progname)
                } else {
                    self.write_usage_line(w)
                }
            }
            ParseError::InvalidValue { value, spelling, .. } => match spelling {
                Some(s) => self.write_fail(w, false, format!(": invalid value [{}] for {}.", value, s)),
                None => self.write_fail(w, false, format!(": invalid value [{}].", value)),
            },
            ParseError::NotUnicode(raw) => {
                self.write_fail(w, false, format!(": argument [{}] is not valid Unicode.", raw))
            }
        }
    }

    // ========================================================================
    // Terminal paths
    // ========================================================================

    /// Report an error on stderr and exit with status 1.
    pub fn fail(&self, append_usage: bool, message: impl Display) -> ! {
        let _ = self.write_fail(&mut io::stderr().lock(), append_usage, message);
        terminate(1)
    }

    /// Print a program-prefixed message on stderr.
    pub fn warn(&self, message: impl Display) {
        let _ = self.write_warn(&mut io::stderr().lock(), message);
    }

    pub fn show_help(&self) -> ! {
        self.exit(&ParseError::WantsHelp)
    }

    pub fn show_version(&self) -> ! {
        self.exit(&ParseError::WantsVersion)
    }

    /// Print the message for `err` and terminate with its exit status.
    pub fn exit(&self, err: &ParseError) -> ! {
        let code = err.exit_code();
        tracing::debug!(%err, code, "terminating");
        if code == 0 {
            let _ = self.write_error(&mut io::stdout().lock(), err);
        } else {
            let _ = self.write_error(&mut io::stderr().lock(), err);
        }
        terminate(code)
    }
}

fn terminate(code: i32) -> ! {
    let _ = io::stdout().flush();
    std::process::exit(code)
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

fn capped(s: &str) -> String {
    let mut end = s.len().min(NAME_MAX);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
