use crate::error::{SortContext, SortError, SortResult};
use itertools::Itertools;
use memmap2::Mmap;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Raw bytes of one input, memory-mapped when it comes from a file
pub enum Source {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Source {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Source::Mapped(map) => &map[..],
            Source::Buffered(buffer) => &buffer[..],
        }
    }

    /// Map a file into memory; empty files are not mapped
    pub fn open(name: &str) -> SortResult<Self> {
        let path = Path::new(name);
        let metadata = std::fs::metadata(path).with_file_context(name)?;
        if metadata.is_dir() {
            return Err(SortError::is_directory(name));
        }
        if metadata.len() == 0 {
            return Ok(Source::Buffered(Vec::new()));
        }

        let file = File::open(path).with_file_context(name)?;
        // SAFETY: the mapping is read-only and lives as long as this Source.
        // Lines borrowed from it cannot outlive the Source.
        let map = unsafe { Mmap::map(&file) }.with_file_context(name)?;
        Ok(Source::Mapped(map))
    }

    /// Read all of standard input
    pub fn stdin() -> SortResult<Self> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .with_context(|| "standard input".to_string())?;
        Ok(Source::Buffered(buffer))
    }
}

/// Every input of one run, kept alive while its lines are sorted
pub struct InputSet {
    sources: Vec<Source>,
}

impl InputSet {
    /// Open the named files; no names or `-` means standard input
    pub fn open(files: &[String]) -> SortResult<Self> {
        if files.is_empty() {
            return Ok(Self {
                sources: vec![Source::stdin()?],
            });
        }

        let sources = files
            .iter()
            .map(|name| {
                if name == "-" {
                    Source::stdin()
                } else {
                    Source::open(name)
                }
            })
            .collect::<SortResult<Vec<_>>>()?;
        Ok(Self { sources })
    }

    pub fn from_sources(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// All lines of all inputs in order, without their delimiters
    pub fn lines(&self, delimiter: u8) -> SortResult<Vec<&str>> {
        let delimiter = delimiter as char;
        let mut lines = Vec::new();
        for source in &self.sources {
            let text = std::str::from_utf8(source.bytes())?;
            if text.is_empty() {
                continue;
            }
            let body = text.strip_suffix(delimiter).unwrap_or(text);
            lines.extend(body.split(delimiter));
        }
        Ok(lines)
    }
}

/// Parse one signed integer per line, reporting the 1-based line on failure
pub fn parse_integers(lines: &[&str]) -> SortResult<Vec<i64>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let trimmed = line.trim();
            trimmed.parse::<i64>().map_err(|err| {
                SortError::parse_error(index + 1, &format!("invalid integer '{trimmed}': {err}"))
            })
        })
        .collect()
}

/// 1-based line number of the first item that orders before its predecessor
pub fn first_disorder<T, F>(items: &[T], mut less: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    items
        .iter()
        .tuple_windows()
        .position(|(previous, current)| less(current, previous))
        .map(|index| index + 2)
}

/// Write items separated by `delimiter` to `output` or standard output
pub fn write_output<T: Display>(items: &[T], output: Option<&str>, delimiter: u8) -> SortResult<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(name) => Box::new(BufWriter::new(File::create(name).with_file_context(name)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for item in items {
        write!(writer, "{item}")?;
        writer.write_all(&[delimiter])?;
    }

    writer.flush()?;
    Ok(())
}
