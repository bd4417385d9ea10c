//! Frame-count manifest for the image-sequence front-end.
//!
//! The front-end loads `frame_0000.jpg … frame_NNNN.jpg` per scene and needs
//! to know N. After a batch of extractions, each scene's count is recorded
//! through [`ManifestSink::record`], and [`FrameManifest`] renders the
//! mapping as an ES module or as JSON. The extractor itself never touches
//! this file.
//!
//! # Example
//!
//! ```no_run
//! use stillframe::{FrameManifest, ManifestFormat, ManifestSink};
//!
//! let mut manifest = FrameManifest::new();
//! manifest.record("intro", 120);
//! manifest.record("chap1", 80);
//! manifest.write("src/frame_manifest.js", ManifestFormat::JsModule)?;
//! # Ok::<(), stillframe::ExtractError>(())
//! ```

use std::{fs, path::Path};

use serde_json::{Map, Value};

use crate::error::ExtractError;

/// Receives the saved-frame count of each named extraction.
pub trait ManifestSink {
    /// Record `count` frames for the scene `name`.
    fn record(&mut self, name: &str, count: u64);
}

/// On-disk representation of a [`FrameManifest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    /// `export const frameCounts = { intro: 120, ... }`, one key per line.
    #[default]
    JsModule,
    /// A pretty-printed JSON object.
    Json,
}

/// Ordered mapping from scene name to saved-frame count.
///
/// Names keep the order they were first recorded in. Recording a name again
/// replaces its count in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameManifest {
    entries: Vec<(String, u64)>,
}

impl FrameManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded entries in order.
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// Count recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|&(_, count)| count)
    }

    /// Render the manifest in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ManifestError`] if JSON serialization fails.
    pub fn render(&self, format: ManifestFormat) -> Result<String, ExtractError> {
        match format {
            ManifestFormat::JsModule => Ok(self.render_js_module()),
            ManifestFormat::Json => {
                let object: Map<String, Value> = self
                    .entries
                    .iter()
                    .map(|(name, count)| (name.clone(), Value::from(*count)))
                    .collect();
                let mut rendered = serde_json::to_string_pretty(&Value::Object(object))?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }

    /// Write the manifest to `path`, replacing any previous content.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::IoError`] if the file cannot be written.
    pub fn write<P: AsRef<Path>>(&self, path: P, format: ManifestFormat) -> Result<(), ExtractError> {
        let path = path.as_ref();
        let rendered = self.render(format)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, rendered)?;
        log::info!("Manifest saved to {}", path.display());
        Ok(())
    }

    fn render_js_module(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(name, count)| format!("  {}: {count}", js_key(name)))
            .collect();

        let mut rendered = String::from("export const frameCounts = {\n");
        if !lines.is_empty() {
            rendered.push_str(&lines.join(",\n"));
            rendered.push('\n');
        }
        rendered.push_str("}\n");
        rendered
    }
}

impl ManifestSink for FrameManifest {
    fn record(&mut self, name: &str, count: u64) {
        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, existing)) => *existing = count,
            None => self.entries.push((name.to_string(), count)),
        }
    }
}

/// Bare identifier keys stay bare; anything else is quoted.
fn js_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        name.to_string()
    } else {
        Value::from(name).to_string()
    }
}
