//! Fixed-width row layout.
//!
//! A row is stored as `id | username | email` with no delimiters. Text
//! columns are zero-padded to their full width.

use std::fmt;

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

const _: () = assert!(EMAIL_OFFSET + EMAIL_SIZE == ROW_SIZE);

/// One record of the single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Writes this row into `dst`.
    ///
    /// Text longer than its column is truncated, and text containing a zero
    /// byte reads back cut short. Both are rejected during statement
    /// preparation.
    pub fn serialize(&self, dst: &mut [u8; ROW_SIZE]) {
        dst[ID_OFFSET..USERNAME_OFFSET].copy_from_slice(&self.id.to_le_bytes());
        write_padded(
            &mut dst[USERNAME_OFFSET..EMAIL_OFFSET],
            self.username.as_bytes(),
        );
        write_padded(&mut dst[EMAIL_OFFSET..ROW_SIZE], self.email.as_bytes());
    }

    /// Reads a row back from its serialized form.
    pub fn deserialize(src: &[u8; ROW_SIZE]) -> Self {
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..USERNAME_OFFSET]);

        Self {
            id: u32::from_le_bytes(id),
            username: read_padded(&src[USERNAME_OFFSET..EMAIL_OFFSET]),
            email: read_padded(&src[EMAIL_OFFSET..ROW_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn write_padded(window: &mut [u8], bytes: &[u8]) {
    let len = bytes.len().min(window.len());
    window[..len].copy_from_slice(&bytes[..len]);
    window[len..].fill(0);
}

// A column ends at its first zero byte, or at the end of the window when full.
fn read_padded(window: &[u8]) -> String {
    let end = window.iter().position(|&b| b == 0).unwrap_or(window.len());
    String::from_utf8_lossy(&window[..end]).into_owned()
}
