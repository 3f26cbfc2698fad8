use crate::domain::model::ContentItem;
use crate::domain::ports::DescriptorBuilder;
use crate::utils::error::Result;
use serde_json::json;

/// Renders content items as plain JSON objects.
#[derive(Default)]
pub struct JsonDescriptorBuilder;

impl JsonDescriptorBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorBuilder for JsonDescriptorBuilder {
    fn build(&self, item: &ContentItem) -> Result<serde_json::Value> {
        Ok(json!({
            "uuid": item.id,
            "name": item.name,
            "source": item.source,
            "sizeBytes": item.size_bytes,
            "format": {
                "shortName": item.format.short_name,
                "mimeType": item.format.mime_type,
            },
            "accessConditions": item.access_conditions,
            "uploadedAt": item.uploaded_at,
        }))
    }
}
