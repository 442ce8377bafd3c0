//! Module dedicated to message attachments.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{Error, Result};

/// The message attachment.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attachment {
    /// The file name advertised to the recipient.
    pub filename: String,

    /// The MIME type of the contents.
    pub content_type: String,

    /// The raw contents.
    pub contents: Vec<u8>,
}

impl Attachment {
    pub fn new(
        filename: impl ToString,
        content_type: impl ToString,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            contents: contents.into(),
        }
    }

    /// Builds an attachment from a file on disk.
    ///
    /// The advertised file name is the file name component of the
    /// given path.
    pub async fn from_file(path: impl AsRef<Path>, content_type: impl ToString) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read(path)
            .await
            .map_err(|err| Error::ReadAttachmentError(err, path.to_owned()))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("noname"));

        Ok(Self {
            filename,
            content_type: content_type.to_string(),
            contents,
        })
    }
}
