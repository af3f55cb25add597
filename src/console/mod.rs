//! Line-oriented prompt/response console over any async byte stream.

use embedded_io_async::{Read, Write};
use heapless::{String, Vec};

use crate::errors::adapter::embedded_io::EmbeddedIoError;

/// Capacity of the line buffer. Input beyond this is dropped with a
/// warning rather than growing without bound.
pub const LINE_MAX: usize = 64;

pub struct Console<R: Read, W: Write> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one full line, echoing every byte back as it is received.
    ///
    /// A line ends with a carriage return followed by a newline; the
    /// terminator is excluded from the returned text. A carriage return
    /// that is not followed by a newline is ordinary data. A zero-length
    /// read means the peer closed the stream, which is reported as an
    /// error instead of spinning on an exhausted reader.
    pub async fn read_line(&mut self) -> Result<String<LINE_MAX>, EmbeddedIoError> {
        let mut line = Vec::<u8, LINE_MAX>::new();
        let mut byte = [0u8; 1];
        let mut pending_cr = false;

        loop {
            let n = self.reader.read(&mut byte).await.map_err(io_err)?;
            if n == 0 {
                return Err(EmbeddedIoError::UnexpectedEof);
            }
            self.writer.write_all(&byte).await.map_err(io_err)?;

            let received = byte[0];
            if pending_cr {
                if received == b'\n' {
                    break;
                }
                push_byte(&mut line, b'\r');
                pending_cr = false;
            }
            if received == b'\r' {
                pending_cr = true;
            } else {
                push_byte(&mut line, received);
            }
        }

        String::from_utf8(line).map_err(|_| EmbeddedIoError::InvalidData)
    }

    pub async fn write_str(&mut self, text: &str) -> Result<(), EmbeddedIoError> {
        self.writer.write_all(text.as_bytes()).await.map_err(io_err)?;
        self.writer.flush().await.map_err(io_err)
    }

    pub async fn write_line(&mut self, text: &str) -> Result<(), EmbeddedIoError> {
        self.writer.write_all(text.as_bytes()).await.map_err(io_err)?;
        self.writer.write_all(b"\r\n").await.map_err(io_err)?;
        self.writer.flush().await.map_err(io_err)
    }
}

fn io_err(error: impl embedded_io::Error) -> EmbeddedIoError {
    error.kind().into()
}

fn push_byte(line: &mut Vec<u8, LINE_MAX>, byte: u8) {
    if line.push(byte).is_err() {
        warn!("console: Line buffer full, dropping input");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec as StdVec;

    #[futures_test::test]
    async fn reads_line_and_echoes() {
        let input = b"yes\r\n";
        let mut console = Console::new(&input[..], StdVec::new());

        let line = console.read_line().await.unwrap();
        assert_eq!(line.as_str(), "yes");
        assert_eq!(console.writer, b"yes\r\n");
    }

    #[futures_test::test]
    async fn terminator_splits_consecutive_lines() {
        let input = b"maybe\r\ny\r\n";
        let mut console = Console::new(&input[..], StdVec::new());

        assert_eq!(console.read_line().await.unwrap().as_str(), "maybe");
        assert_eq!(console.read_line().await.unwrap().as_str(), "y");
    }

    #[futures_test::test]
    async fn lone_carriage_return_is_data() {
        let input = b"a\rb\r\n";
        let mut console = Console::new(&input[..], StdVec::new());

        let line = console.read_line().await.unwrap();
        assert_eq!(line.as_str(), "a\rb");
    }

    #[futures_test::test]
    async fn closed_stream_is_an_error() {
        let input = b"never terminated";
        let mut console = Console::new(&input[..], StdVec::new());

        let result = console.read_line().await;
        assert_eq!(result, Err(EmbeddedIoError::UnexpectedEof));
    }

    #[futures_test::test]
    async fn write_line_appends_terminator() {
        let mut console = Console::new(&b""[..], StdVec::new());
        console.write_line("Starting compass").await.unwrap();
        assert_eq!(console.writer, b"Starting compass\r\n");
    }
}
