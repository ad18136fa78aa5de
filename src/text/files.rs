/// Line-oriented file input and output.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use super::TextError;

/// Open `path` for buffered reading.
pub fn open_reader(path: &Path) -> Result<BufReader<File>, TextError> {
    if !path.exists() {
        return Err(TextError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(TextError::IsDirectory(path.to_path_buf()));
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Lazily yield each line of `reader` without its terminator.
pub fn lines<R: BufRead>(reader: R) -> Lines<R> {
    reader.lines()
}

/// Write each entry of `lines` to `path` on its own line.
///
/// With `append` the file is extended, otherwise it is truncated first.
pub fn write_lines<I, S>(lines: I, path: &Path, append: bool) -> Result<(), TextError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()?;
    Ok(())
}
