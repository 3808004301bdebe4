//! Transactional template types.

use serde::{Deserialize, Serialize};

use super::common::int_bool;

/// Template generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateGeneration {
    /// Substitution-tag templates.
    Legacy,
    /// Handlebars templates.
    Dynamic,
}

impl TemplateGeneration {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateGeneration::Legacy => "legacy",
            TemplateGeneration::Dynamic => "dynamic",
        }
    }
}

/// Which generations a template listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationFilter {
    /// Legacy templates only (the provider's default).
    #[default]
    Legacy,
    /// Dynamic templates only.
    Dynamic,
    /// Both generations.
    Both,
}

impl GenerationFilter {
    fn as_query_value(self) -> &'static str {
        match self {
            GenerationFilter::Legacy => "legacy",
            GenerationFilter::Dynamic => "dynamic",
            GenerationFilter::Both => "legacy,dynamic",
        }
    }
}

/// Parameters for listing templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTemplatesParams {
    /// Generations to include.
    pub generations: GenerationFilter,
    /// Page size; the provider requires it for dynamic templates.
    pub page_size: Option<u32>,
    /// Opaque token for the next page.
    pub page_token: Option<String>,
}

impl ListTemplatesParams {
    /// Creates default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generation filter.
    #[must_use]
    pub fn generations(mut self, generations: GenerationFilter) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the page token.
    #[must_use]
    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![(
            "generations".to_string(),
            self.generations.as_query_value().to_string(),
        )];
        if let Some(page_size) = self.page_size {
            params.push(("page_size".to_string(), page_size.to_string()));
        }
        if let Some(token) = &self.page_token {
            params.push(("page_token".to_string(), token.clone()));
        }
        params
    }
}

/// A transactional template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template ID.
    pub id: String,
    /// Template name.
    pub name: String,
    /// Template generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<TemplateGeneration>,
    /// Last update, in the provider's `YYYY-MM-DD HH:MM:SS` format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Versions of this template.
    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}

/// Editor used to author a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    /// Code editor.
    Code,
    /// Drag-and-drop design editor.
    Design,
}

/// A version of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVersion {
    /// Version ID.
    pub id: String,
    /// Owning template ID.
    pub template_id: String,
    /// Whether this is the active version.
    #[serde(default, with = "int_bool")]
    pub active: bool,
    /// Version name.
    pub name: String,
    /// Subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Plain-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    /// Whether the plain-text body is generated from the HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_plain_content: Option<bool>,
    /// Editor used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<Editor>,
    /// Sample data for previews, as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    /// Preview image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Last update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for creating a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTemplateRequest {
    /// Template name.
    pub name: String,
    /// Template generation.
    pub generation: TemplateGeneration,
}

/// Request body for creating a template version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateVersionRequest {
    /// Version name.
    pub name: String,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    /// Make this the active version.
    #[serde(
        serialize_with = "int_bool::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,
    /// Generate plain text from HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_plain_content: Option<bool>,
    /// Editor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Editor>,
    /// Sample data for previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

impl CreateVersionRequest {
    /// Creates a request with only the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn html_content(mut self, html: impl Into<String>) -> Self {
        self.html_content = Some(html.into());
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn plain_content(mut self, text: impl Into<String>) -> Self {
        self.plain_content = Some(text.into());
        self
    }

    /// Sets whether the version is active.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Request body for a partial version update. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateVersionRequest {
    /// Version name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    /// Plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
    /// Active flag.
    #[serde(
        serialize_with = "int_bool::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,
    /// Generate plain text from HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_plain_content: Option<bool>,
    /// Sample data for previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

impl UpdateVersionRequest {
    /// Returns true when nothing would be changed.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
