use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 80;

/// Serialises records into the dump format and owns the sequence counter.
///
/// ```text
/// ================================================================================
/// FILE 1: src/app.py
/// ================================================================================
///
/// print(1)
///
/// ```
pub struct RecordWriter<W: Write> {
    out: W,
    separator: String,
    count: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            separator: "=".repeat(SEPARATOR_WIDTH),
            count: 0,
        }
    }

    /// Writes one record and returns its 1-based sequence number.
    pub fn write_record(&mut self, relative_path: &str, content: &str) -> io::Result<usize> {
        let number = self.count + 1;
        write!(
            self.out,
            "{sep}\nFILE {number}: {relative_path}\n{sep}\n\n{content}\n\n",
            sep = self.separator,
        )?;
        self.count = number;
        Ok(number)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
