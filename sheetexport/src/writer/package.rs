//! Zip assembly of rendered parts

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::Compression;
use crate::error::Result;

/// One named file inside the package
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub path: String,
    pub content: String,
}

impl Part {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Finished package bytes tagged with a MIME type
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    mime_type: String,
    bytes: Vec<u8>,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the blob to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Write every part into a zip container over `sink`
pub fn write_parts<W: Write + Seek>(sink: W, parts: &[Part], compression: Compression) -> Result<W> {
    let mut zip = ZipWriter::new(sink);
    let options = SimpleFileOptions::default().compression_method(compression.into());

    for part in parts {
        log::trace!("zip: {} ({} bytes)", part.path, part.content.len());
        zip_write_str(&mut zip, &part.path, &part.content, options)?;
    }

    Ok(zip.finish()?)
}

/// Zip parts into an in-memory blob
pub fn assemble(parts: &[Part], compression: Compression, mime_type: &str) -> Result<Blob> {
    let cursor = write_parts(Cursor::new(Vec::new()), parts, compression)?;
    Ok(Blob::new(mime_type, cursor.into_inner()))
}

fn zip_write_str<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(path, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}
