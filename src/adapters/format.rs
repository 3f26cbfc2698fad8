use crate::domain::model::{ContentItem, FileFormat, RequestContext};
use crate::domain::ports::FormatService;
use crate::utils::error::Result;
use async_trait::async_trait;

struct KnownFormat {
    short_name: &'static str,
    mime_type: &'static str,
    extensions: &'static [&'static str],
    magic: Option<&'static [u8]>,
}

const KNOWN_FORMATS: &[KnownFormat] = &[
    KnownFormat {
        short_name: "Adobe PDF",
        mime_type: "application/pdf",
        extensions: &["pdf"],
        magic: Some(b"%PDF"),
    },
    KnownFormat {
        short_name: "PNG",
        mime_type: "image/png",
        extensions: &["png"],
        magic: Some(&[0x89, b'P', b'N', b'G']),
    },
    KnownFormat {
        short_name: "JPEG",
        mime_type: "image/jpeg",
        extensions: &["jpg", "jpeg"],
        magic: Some(&[0xFF, 0xD8, 0xFF]),
    },
    KnownFormat {
        short_name: "ZIP",
        mime_type: "application/zip",
        extensions: &["zip"],
        magic: Some(&[b'P', b'K', 0x03, 0x04]),
    },
    KnownFormat {
        short_name: "Text",
        mime_type: "text/plain",
        extensions: &["txt", "text"],
        magic: None,
    },
    KnownFormat {
        short_name: "Markdown",
        mime_type: "text/markdown",
        extensions: &["md", "markdown"],
        magic: None,
    },
    KnownFormat {
        short_name: "CSV",
        mime_type: "text/csv",
        extensions: &["csv"],
        magic: None,
    },
    KnownFormat {
        short_name: "XML",
        mime_type: "application/xml",
        extensions: &["xml"],
        magic: None,
    },
];

/// Table-driven format inference: content magic bytes first, file
/// extension second, unknown otherwise.
#[derive(Default)]
pub struct ExtensionFormatService;

impl ExtensionFormatService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FormatService for ExtensionFormatService {
    async fn guess_format(
        &self,
        _ctx: &RequestContext,
        item: &ContentItem,
        data: &[u8],
    ) -> Result<FileFormat> {
        for format in KNOWN_FORMATS {
            if let Some(magic) = format.magic {
                if data.starts_with(magic) {
                    return Ok(FileFormat::new(format.short_name, format.mime_type));
                }
            }
        }

        let extension = item
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        if let Some(extension) = extension {
            for format in KNOWN_FORMATS {
                if format.extensions.contains(&extension.as_str()) {
                    return Ok(FileFormat::new(format.short_name, format.mime_type));
                }
            }
        }

        Ok(FileFormat::unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_named(name: &str) -> ContentItem {
        let mut item = ContentItem::new(0);
        item.name = name.to_string();
        item
    }

    #[tokio::test]
    async fn test_magic_bytes_win_over_extension() {
        let service = ExtensionFormatService::new();
        let ctx = RequestContext::new();

        let format = service
            .guess_format(&ctx, &item_named("report.txt"), b"%PDF-1.7 ...")
            .await
            .unwrap();
        assert_eq!(format.mime_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_extension_fallback_and_unknown() {
        let service = ExtensionFormatService::new();
        let ctx = RequestContext::new();

        let format = service
            .guess_format(&ctx, &item_named("notes.MD"), b"# heading")
            .await
            .unwrap();
        assert_eq!(format.mime_type, "text/markdown");

        let format = service
            .guess_format(&ctx, &item_named("blob.bin"), &[0u8, 1, 2])
            .await
            .unwrap();
        assert!(format.is_unknown());
    }
}
