/// Markdown body being edited, with a byte-offset cursor.
///
/// The cursor is always on a `char` boundary and never past the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    content: String,
    cursor: usize,
}

impl MarkdownDocument {
    /// Opens `content` with the cursor at the end.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamping to the document and backing off to a char boundary.
    pub fn set_cursor(&mut self, position: usize) {
        let mut position = position.min(self.content.len());
        while !self.content.is_char_boundary(position) {
            position -= 1;
        }
        self.cursor = position;
    }

    /// Inserts `block` at the cursor as its own paragraph and leaves the cursor after it.
    pub fn insert_block(&mut self, block: &str) {
        let (before, after) = self.content.split_at(self.cursor);

        let prefix = if before.is_empty() || before.ends_with("\n\n") {
            ""
        } else if before.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };

        let suffix = if after.is_empty() || after.starts_with("\n\n") {
            ""
        } else if after.starts_with('\n') {
            "\n"
        } else {
            "\n\n"
        };

        let inserted = format!("{prefix}{block}{suffix}");
        self.content.insert_str(self.cursor, &inserted);
        self.cursor += inserted.len();
    }
}
