//! Uploaded file payload

use serde::{Deserialize, Serialize};

/// An in-memory file received from a multipart upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Client-supplied file name, used for extension detection
    pub file_name: String,
    /// Declared MIME type, when the client sent one
    pub content_type: Option<String>,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Lower-cased extension of the client file name, if present
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> FileUpload {
        FileUpload { file_name: name.into(), content_type: None, bytes: vec![1, 2, 3] }
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(upload("Cover.PNG").extension(), Some("png".into()));
        assert_eq!(upload("photo.jpeg").extension(), Some("jpeg".into()));
    }

    #[test]
    fn extension_absent_when_no_dot_or_empty() {
        assert_eq!(upload("noext").extension(), None);
        assert_eq!(upload("trailing.").extension(), None);
    }
}
