use std::io::BufRead;

use crate::error::InputError;

/// Reusable buffer holding the current input line.
#[derive(Debug, Default)]
pub struct InputBuffer {
    bytes: Vec<u8>,
    buffer: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the next line from `reader` without its line terminator.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// ending the session.
    pub fn read_input<R: BufRead>(&mut self, reader: &mut R) -> Result<&str, InputError> {
        self.bytes.clear();
        if reader.read_until(b'\n', &mut self.bytes)? == 0 {
            return Err(InputError::Eof);
        }

        if self.bytes.ends_with(b"\n") {
            self.bytes.pop();
            if self.bytes.ends_with(b"\r") {
                self.bytes.pop();
            }
        }
        self.buffer = String::from_utf8_lossy(&self.bytes).into_owned();
        Ok(&self.buffer)
    }
}
