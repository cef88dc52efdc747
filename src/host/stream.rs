//! A buffered read/write stream standing in for a scripting host's `Stream`
//! object (`readLine`, `writeLine`, `close`).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub struct Stream {
    reader: Option<BufReader<File>>,
    writer: Option<BufWriter<File>>,
}

impl Stream {
    pub fn open_read(path: &Path) -> io::Result<Self> {
        Ok(Self {
            reader: Some(BufReader::new(File::open(path)?)),
            writer: None,
        })
    }

    pub fn open_write(path: &Path) -> io::Result<Self> {
        Ok(Self {
            reader: None,
            writer: Some(BufWriter::new(File::create(path)?)),
        })
    }

    /// Reads the next line, without the trailing line terminator. `None` at
    /// end of stream.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let reader = self
            .reader
            .as_mut()
            .expect("read_line called on a write-only stream");
        let mut line = String::new();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// The next single byte, or `None` at end of stream.
    pub fn next(&mut self) -> io::Result<Option<u8>> {
        let reader = self
            .reader
            .as_mut()
            .expect("next called on a write-only stream");
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }
        let byte = buf[0];
        reader.consume(1);
        Ok(Some(byte))
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .expect("write_line called on a read-only stream");
        writeln!(writer, "{line}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn close(mut self) -> io::Result<()> {
        self.flush()?;
        self.reader = None;
        self.writer = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_lines_through_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut writer = Stream::open_write(&path).unwrap();
        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();
        writer.close().unwrap();

        let mut reader = Stream::open_read(&path).unwrap();
        assert_eq!(reader.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(reader.read_line().unwrap(), Some("second".to_string()));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn next_walks_byte_by_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bytes.txt");
        std::fs::write(&path, "ab").unwrap();

        let mut reader = Stream::open_read(&path).unwrap();
        assert_eq!(reader.next().unwrap(), Some(b'a'));
        assert_eq!(reader.next().unwrap(), Some(b'b'));
        assert_eq!(reader.next().unwrap(), None);
    }
}
