//! Stream-agnostic file access
//!
//! Opens either a filesystem path or one of the process's standard streams
//! behind a single handle type. File handles are closed when the handle is
//! dropped or explicitly closed; standard streams are only unlocked, never
//! closed.
//!
//! [`with_stream`] is the scoped form: it opens the target, hands the handle
//! to a closure and releases it on every exit path before returning.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, StdinLock, StdoutLock, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::StreamError;

/// Name used on the command line for "the standard stream"
pub const STD_STREAM_ARG: &str = "-";

/// Access mode for a stream target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

impl FromStr for Mode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" | "read" => Ok(Self::Read),
            "w" | "write" => Ok(Self::Write),
            other => Err(StreamError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("reading"),
            Self::Write => f.write_str("writing"),
        }
    }
}

/// Something that can be opened for reading or writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdin,
    Stdout,
    Path(PathBuf),
}

impl Target {
    /// Interpret a command-line argument as an input target (`-` is stdin)
    pub fn reader(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg == Path::new(STD_STREAM_ARG) {
            Self::Stdin
        } else {
            Self::Path(arg.to_path_buf())
        }
    }

    /// Interpret a command-line argument as an output target (`-` is stdout)
    pub fn writer(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg == Path::new(STD_STREAM_ARG) {
            Self::Stdout
        } else {
            Self::Path(arg.to_path_buf())
        }
    }

    /// Whether this target is one of the process's standard streams
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Stdin | Self::Stdout)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("standard input"),
            Self::Stdout => f.write_str("standard output"),
            Self::Path(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// An open target
///
/// Reading variants implement [`Read`] and [`BufRead`]; writing variants
/// implement [`Write`]. Using a handle against its direction yields an
/// [`io::ErrorKind::Unsupported`] error.
#[derive(Debug)]
pub enum StreamHandle {
    Stdin(StdinLock<'static>),
    Stdout(StdoutLock<'static>),
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

impl StreamHandle {
    /// Whether the handle wraps a standard stream
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Stdin(_) | Self::Stdout(_))
    }

    /// Flush pending output and release the handle
    ///
    /// Files are closed; standard streams are flushed and unlocked only.
    pub fn close(self) -> io::Result<()> {
        match self {
            Self::Stdin(_) | Self::Reader(_) => Ok(()),
            Self::Stdout(mut out) => out.flush(),
            Self::Writer(writer) => {
                let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
                drop(file);
                Ok(())
            }
        }
    }
}

fn wrong_direction(action: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("stream is not open for {action}"),
    )
}

impl Read for StreamHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(input) => input.read(buf),
            Self::Reader(reader) => reader.read(buf),
            Self::Stdout(_) | Self::Writer(_) => Err(wrong_direction("reading")),
        }
    }
}

impl BufRead for StreamHandle {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Self::Stdin(input) => input.fill_buf(),
            Self::Reader(reader) => reader.fill_buf(),
            Self::Stdout(_) | Self::Writer(_) => Err(wrong_direction("reading")),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::Stdin(input) => input.consume(amt),
            Self::Reader(reader) => reader.consume(amt),
            Self::Stdout(_) | Self::Writer(_) => {}
        }
    }
}

impl Write for StreamHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::Writer(writer) => writer.write(buf),
            Self::Stdin(_) | Self::Reader(_) => Err(wrong_direction("writing")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::Writer(writer) => writer.flush(),
            Self::Stdin(_) | Self::Reader(_) => Ok(()),
        }
    }
}

/// Open a target in the given mode
pub fn open(target: &Target, mode: Mode) -> Result<StreamHandle, StreamError> {
    match (target, mode) {
        (Target::Stdin, Mode::Read) => Ok(StreamHandle::Stdin(io::stdin().lock())),
        (Target::Stdout, Mode::Write) => Ok(StreamHandle::Stdout(io::stdout().lock())),
        (Target::Path(path), Mode::Read) => File::open(path)
            .map(|file| StreamHandle::Reader(BufReader::new(file)))
            .map_err(|source| StreamError::Open {
                path: path.clone(),
                source,
            }),
        (Target::Path(path), Mode::Write) => File::create(path)
            .map(|file| StreamHandle::Writer(BufWriter::new(file)))
            .map_err(|source| StreamError::Open {
                path: path.clone(),
                source,
            }),
        (Target::Stdin | Target::Stdout, mode) => Err(StreamError::Direction {
            target: target.to_string(),
            mode: mode.to_string(),
        }),
    }
}

/// Open a target, run `f` with the handle, and release it
///
/// The handle is released before this returns, whether `f` succeeds, fails
/// or panics. Returns `Ok(None)` when reading standard input ends in a
/// broken pipe; any other failure is returned as [`StreamError::Io`].
pub fn with_stream<T, F>(target: &Target, mode: Mode, f: F) -> Result<Option<T>, StreamError>
where
    F: FnOnce(&mut StreamHandle) -> io::Result<T>,
{
    let mut handle = open(target, mode)?;
    let result = f(&mut handle);
    let closed = handle.close();

    let io_error = |source: io::Error| StreamError::Io {
        target: target.to_string(),
        source,
    };

    match result {
        Ok(value) => {
            closed.map_err(io_error)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe && *target == Target::Stdin => {
            tracing::debug!("broken pipe on standard input, stopping read");
            Ok(None)
        }
        Err(e) => Err(io_error(e)),
    }
}
