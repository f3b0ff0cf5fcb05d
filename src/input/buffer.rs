//! Edit Buffers
//!
//! Text capture for the three editable fields. One buffer per field, seeded
//! from the record when edit mode opens and handed to the controller as
//! captures when it closes. Buffer contents are wiped after capture.

use zeroize::Zeroize;

use crate::detail::Field;
use crate::store::CredentialRecord;

/// One field's text capture with cursor position
#[derive(Debug, Clone, Default)]
pub struct FieldBuffer {
    pub value: String,
    pub cursor: usize,
}

impl FieldBuffer {
    pub fn seeded(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let prev = prev_boundary(&self.value, self.cursor);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_boundary(&self.value, self.cursor);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = next_boundary(&self.value, self.cursor);
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn wipe(&mut self) {
        self.value.zeroize();
        self.value.clear();
        self.cursor = 0;
    }
}

fn prev_boundary(s: &str, from: usize) -> usize {
    let mut i = from - 1;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(s: &str, from: usize) -> usize {
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// The three field captures for one edit cycle
#[derive(Debug, Clone, Default)]
pub struct EditBuffers {
    pub username: FieldBuffer,
    pub password: FieldBuffer,
    pub website: FieldBuffer,
}

impl EditBuffers {
    /// Seed all three buffers from the record being edited
    pub fn from_record(record: &CredentialRecord) -> Self {
        Self {
            username: FieldBuffer::seeded(&record.username),
            password: FieldBuffer::seeded(&record.password),
            website: FieldBuffer::seeded(&record.hostname),
        }
    }

    pub fn get(&self, field: Field) -> &FieldBuffer {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::Website => &self.website,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut FieldBuffer {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::Website => &mut self.website,
        }
    }

    /// Read the captures out and wipe the buffers
    pub fn take_captures(&mut self) -> (Option<String>, Option<String>, Option<String>) {
        let captures = (
            Some(self.username.value.clone()),
            Some(self.password.value.clone()),
            Some(self.website.value.clone()),
        );
        self.username.wipe();
        self.password.wipe();
        self.website.wipe();
        captures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut buf = FieldBuffer::default();
        for c in "hello".chars() {
            buf.insert_char(c);
        }
        assert_eq!(buf.value, "hello");
        assert_eq!(buf.cursor, 5);

        buf.delete_char();
        assert_eq!(buf.value, "hell");
    }

    #[test]
    fn test_cursor_movement() {
        let mut buf = FieldBuffer::seeded("hello");
        assert_eq!(buf.cursor, 5);

        buf.cursor_home();
        assert_eq!(buf.cursor, 0);
        buf.cursor_right();
        assert_eq!(buf.cursor, 1);
        buf.cursor_left();
        assert_eq!(buf.cursor, 0);
        buf.cursor_end();
        assert_eq!(buf.cursor, 5);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = FieldBuffer::default();
        buf.insert_char('é');
        buf.insert_char('x');
        buf.cursor_left();
        buf.cursor_left();
        assert_eq!(buf.cursor, 0);
        buf.delete_char_forward();
        assert_eq!(buf.value, "x");
    }

    #[test]
    fn test_captures_are_taken_and_buffers_wiped() {
        let rec = CredentialRecord::new("example.com", "alice", "secret");
        let mut buffers = EditBuffers::from_record(&rec);
        buffers.get_mut(crate::detail::Field::Username).insert_char('2');

        let (user, pass, host) = buffers.take_captures();
        assert_eq!(user.as_deref(), Some("alice2"));
        assert_eq!(pass.as_deref(), Some("secret"));
        assert_eq!(host.as_deref(), Some("example.com"));

        assert!(buffers.username.value.is_empty());
        assert!(buffers.password.value.is_empty());
        assert!(buffers.website.value.is_empty());
    }
}
