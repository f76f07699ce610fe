use codecook::models::TextBuffer;
use std::io;
use std::path::{Path, PathBuf};

pub const USAGE: &str = "usage: codecook <file>[:line[:col]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Startup {
    pub path: PathBuf,
    /// 1-based
    pub line: Option<usize>,
    /// 1-based
    pub col: Option<usize>,
}

/// Resolves the command line argument against `cwd`.
///
/// An existing path is taken literally; otherwise trailing `:line` / `:line:col` suffixes are
/// split off. The file itself does not need to exist yet.
pub fn resolve_startup(cwd: &Path, arg: Option<&str>) -> io::Result<Startup> {
    let arg = arg
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, USAGE))?;

    let (raw, line, col) = if cwd.join(arg).exists() {
        (arg, None, None)
    } else {
        split_location(arg)
    };

    let path = cwd.join(raw);
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        ));
    }

    Ok(Startup { path, line, col })
}

fn split_location(arg: &str) -> (&str, Option<usize>, Option<usize>) {
    let number = |s: &str| s.parse::<usize>().ok().filter(|n| *n > 0);

    if let Some((rest, last)) = arg.rsplit_once(':') {
        if let Some(last) = number(last) {
            if let Some((path, line)) = rest.rsplit_once(':') {
                if let Some(line) = number(line) {
                    return (path, Some(line), Some(last));
                }
            }
            return (rest, Some(last), None);
        }
    }
    (arg, None, None)
}

/// Reads the file into a buffer; a missing file opens empty and is created on save.
pub fn read_buffer(startup: &Startup) -> io::Result<TextBuffer> {
    let mut buffer = match std::fs::read_to_string(&startup.path) {
        Ok(text) => TextBuffer::from_text(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %startup.path.display(), "new file");
            TextBuffer::new()
        }
        Err(e) => return Err(e),
    };

    if let Some(line) = startup.line {
        let col = startup.col.unwrap_or(1);
        buffer.set_cursor(line - 1, col - 1);
    }
    Ok(buffer)
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod tests;
