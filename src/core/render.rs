//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use crate::core::util::truncate_chars;
use std::io::Write;

/// Longest source text shown in a markdown heading
const MD_HEADING_CHARS: usize = 60;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer, followed by a trailing newline when non-empty
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writer.write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        // Group by kind
        let mut translations = Vec::new();
        let mut entries = Vec::new();
        let mut languages = Vec::new();
        let mut stats = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Translation => translations.push(item),
                Kind::Entry => entries.push(item),
                Kind::Language => languages.push(item),
                Kind::Stats => stats.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        if !translations.is_empty() {
            output.push_str("## Translations\n\n");
            for item in translations {
                self.render_translation_md(&mut output, item);
            }
        }

        if !entries.is_empty() {
            output.push_str("## Cache Entries\n\n");
            for item in entries {
                self.render_translation_md(&mut output, item);
            }
        }

        if !languages.is_empty() {
            output.push_str("## Languages\n\n");
            output.push_str("| code | name |\n|---|---|\n");
            for item in languages {
                output.push_str(&format!(
                    "| `{}` | {} |\n",
                    item.code.as_deref().unwrap_or_default(),
                    item.name.as_deref().unwrap_or_default()
                ));
            }
            output.push('\n');
        }

        if !stats.is_empty() {
            output.push_str("## Cache Stats\n\n");
            for item in stats {
                if let Some(serde_json::Value::Object(map)) = &item.data {
                    for (key, value) in map {
                        let value = match value {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        output.push_str(&format!("- **{}**: {}\n", key, value));
                    }
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_translation_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(text) = &item.text {
            let (heading, truncated) = truncate_chars(text, MD_HEADING_CHARS);
            let ellipsis = if truncated { "…" } else { "" };
            output.push_str(&format!("### `{}{}`", heading.replace('\n', " "), ellipsis));
            if let (Some(source), Some(target)) = (&item.source, &item.target) {
                output.push_str(&format!(" ({} → {})", source, target));
            }
            output.push('\n');
        }

        if let Some(translation) = &item.translation {
            output.push_str("\n```\n");
            output.push_str(translation);
            if !translation.ends_with('\n') {
                output.push('\n');
            }
            output.push_str("```\n");
        }

        for warning in &item.warnings {
            output.push_str(&format!("\n> ⚠️ {}: {}\n", warning.code, warning.message));
        }

        output.push('\n');
    }

    /// Render as raw output: bare values, one per line
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| match item.kind {
                Kind::Translation | Kind::Entry => item.translation.clone(),
                Kind::Language => Some(format!(
                    "{}\t{}",
                    item.code.as_deref().unwrap_or_default(),
                    item.name.as_deref().unwrap_or_default()
                )),
                Kind::Stats => item.data.as_ref().map(|d| d.to_string()),
                Kind::Error => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
