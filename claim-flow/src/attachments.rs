use serde::{Deserialize, Serialize};

/// Metadata of a user-selected file. No file content is ever held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// Size in kilobytes with two decimals, e.g. `12.50 KB`
    pub fn display_size(&self) -> String {
        format!("{:.2} KB", self.size_kb())
    }
}

/// Ordered, append-only list of attached files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentList {
    files: Vec<FileDescriptor>,
}

impl AttachmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a selection batch in order. Returns how many were added;
    /// duplicates are kept.
    pub fn add_files(&mut self, batch: impl IntoIterator<Item = FileDescriptor>) -> usize {
        let before = self.files.len();
        self.files.extend(batch);
        self.files.len() - before
    }

    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
