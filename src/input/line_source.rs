use std::io::{self, BufRead};

/// Data lines of a fetched log.
///
/// The leading block of non-empty lines (the response header) is discarded.
/// Data lines are then yielded without their line terminator until the first
/// empty line or the end of the stream. Invalid UTF-8 is replaced rather than
/// rejected.
pub struct LineSource<R> {
    reader: R,
    header_skipped: bool,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            header_skipped: false,
            done: false,
        }
    }

    /// Next line with `\n`/`\r\n` removed, or `None` at end of stream
    fn next_raw(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
    }

    fn skip_header(&mut self) -> io::Result<()> {
        let mut skipped = 0usize;
        while let Some(line) = self.next_raw()? {
            if line.is_empty() {
                break;
            }
            skipped += 1;
        }
        log::debug!("Skipped {} header line(s)", skipped);
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.header_skipped {
            self.header_skipped = true;
            if let Err(e) = self.skip_header() {
                self.done = true;
                return Some(Err(e));
            }
        }

        match self.next_raw() {
            Ok(Some(line)) if !line.is_empty() => Some(Ok(line)),
            Ok(_) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
