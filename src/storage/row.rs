use std::fmt;

use crate::error::{DbError, DbResult};
use crate::storage::page::{read_u32, write_u32};

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const USERNAME_SIZE: usize = 32;
pub const EMAIL_SIZE: usize = 255;
pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// One record of the table. `id` doubles as the B-tree key.
///
/// The text fields are guaranteed to fit their fixed-width slots, so a
/// `Row` can always be serialized without truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Build a row, rejecting text that would not fit its slot or that holds
    /// a NUL byte (NUL marks the end of the text on disk).
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> DbResult<Row> {
        let username = username.into();
        let email = email.into();
        if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
            return Err(DbError::StringTooLong);
        }
        if username.contains('\0') || email.contains('\0') {
            return Err(DbError::NulInString);
        }
        Ok(Row { id, username, email })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Write this row into the first `ROW_SIZE` bytes of `dst`.
    ///
    /// Layout: `[id: u32 LE][username: 32 bytes][email: 255 bytes]`, text
    /// zero-padded to the slot width.
    pub fn serialize(&self, dst: &mut [u8]) {
        write_u32(dst, ID_OFFSET, self.id);
        write_text(&mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE], &self.username);
        write_text(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Inverse of [`Row::serialize`].
    pub fn deserialize(src: &[u8]) -> Row {
        Row {
            id: read_u32(src, ID_OFFSET),
            username: read_text(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_text(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn write_text(slot: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    slot[..bytes.len()].copy_from_slice(bytes);
    slot[bytes.len()..].fill(0);
}

// A full slot carries no terminator.
fn read_text(slot: &[u8]) -> String {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..end]).into_owned()
}
