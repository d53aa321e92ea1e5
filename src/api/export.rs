use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ChartModel;
use crate::error::{BridgeError, BridgeResult};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Json => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub enable_json_export: bool,
    /// File stem used when the chart has no title.
    #[serde(default = "default_file_stem")]
    pub fallback_file_stem: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            enable_json_export: false,
            fallback_file_stem: default_file_stem(),
        }
    }
}

fn default_file_stem() -> String {
    "chart".to_owned()
}

/// Rendered SVG container located in the host document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub markup: String,
    /// CSS pixel size as currently displayed.
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl SvgElement {
    #[must_use]
    pub fn new(markup: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            markup: markup.into(),
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Raster size at the current display resolution.
    pub fn raster_size(&self) -> BridgeResult<(u32, u32)> {
        let ratio = self.device_pixel_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(BridgeError::Export(format!(
                "device pixel ratio must be finite and > 0, got {ratio}"
            )));
        }
        let scale = |value: f64, axis: &str| -> BridgeResult<u32> {
            let px = (value * ratio).round();
            if !px.is_finite() || px < 1.0 || px > f64::from(u32::MAX) {
                return Err(BridgeError::Export(format!(
                    "svg {axis} of {value} cannot be rasterized"
                )));
            }
            Ok(px as u32)
        };
        Ok((scale(self.width, "width")?, scale(self.height, "height")?))
    }
}

/// Locates the rendered chart in the host document.
pub trait ExportTarget {
    fn find_by_class(&self, class_name: &str) -> Option<SvgElement>;
}

/// Converts SVG markup into PNG bytes.
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> BridgeResult<Vec<u8>>;
}

/// Receives finished export files.
pub trait Downloader {
    fn download(&mut self, artifact: ExportArtifact);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Encodes the file as a base64 `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Downloaded { file_name: String },
    /// No element matched the class name. Nothing was downloaded.
    TargetMissing,
    /// The format is switched off in [`ExportOptions`].
    Disabled,
}

/// Exports the chart rendered under a CSS class name.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartExporter {
    class_name: String,
    options: ExportOptions,
}

impl ChartExporter {
    #[must_use]
    pub fn new(class_name: impl Into<String>, options: ExportOptions) -> Self {
        Self {
            class_name: class_name.into(),
            options,
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn export_svg(
        &self,
        target: &dyn ExportTarget,
        downloader: &mut dyn Downloader,
        title: &str,
    ) -> BridgeResult<ExportOutcome> {
        let Some(element) = self.locate(target) else {
            return Ok(ExportOutcome::TargetMissing);
        };
        let markup = standalone_svg(&element.markup);
        Ok(self.deliver(ExportFormat::Svg, title, markup.into_bytes(), downloader))
    }

    pub fn export_png(
        &self,
        target: &dyn ExportTarget,
        rasterizer: &dyn Rasterizer,
        downloader: &mut dyn Downloader,
        title: &str,
    ) -> BridgeResult<ExportOutcome> {
        let Some(element) = self.locate(target) else {
            return Ok(ExportOutcome::TargetMissing);
        };
        let (width, height) = element.raster_size()?;
        let markup = standalone_svg(&element.markup);
        let bytes = rasterizer.rasterize(&markup, width, height)?;
        debug!(width, height, bytes = bytes.len(), "rasterized chart");
        Ok(self.deliver(ExportFormat::Png, title, bytes, downloader))
    }

    pub fn export_json(
        &self,
        model: &ChartModel,
        downloader: &mut dyn Downloader,
    ) -> BridgeResult<ExportOutcome> {
        if !self.options.enable_json_export {
            debug!("json export disabled");
            return Ok(ExportOutcome::Disabled);
        }
        let json = model.to_json_pretty()?;
        Ok(self.deliver(
            ExportFormat::Json,
            &model.metadata.title,
            json.into_bytes(),
            downloader,
        ))
    }

    fn locate(&self, target: &dyn ExportTarget) -> Option<SvgElement> {
        let element = target.find_by_class(&self.class_name);
        if element.is_none() {
            debug!(class_name = %self.class_name, "export target not found");
        }
        element
    }

    fn deliver(
        &self,
        format: ExportFormat,
        title: &str,
        bytes: Vec<u8>,
        downloader: &mut dyn Downloader,
    ) -> ExportOutcome {
        let stem = file_stem(title);
        let stem = if stem.is_empty() {
            self.options.fallback_file_stem.as_str()
        } else {
            stem.as_str()
        };
        let file_name = format!("{stem}.{}", format.extension());
        debug!(file_name = %file_name, bytes = bytes.len(), "download export");
        downloader.download(ExportArtifact {
            file_name: file_name.clone(),
            mime_type: format.mime_type(),
            bytes,
        });
        ExportOutcome::Downloaded { file_name }
    }
}

/// Lowercase ASCII slug of `title`; empty when nothing usable remains.
#[must_use]
pub fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('-') {
            stem.push('-');
        }
    }
    while stem.ends_with('-') {
        stem.pop();
    }
    stem
}

/// Makes rendered markup loadable as a standalone file.
///
/// Adds the XML prolog and the SVG namespace only when missing.
#[must_use]
pub fn standalone_svg(markup: &str) -> String {
    let trimmed = markup.trim_start();
    let mut body = trimmed.to_owned();
    if body.starts_with("<svg") && !body.contains("xmlns=") {
        body.insert_str(4, &format!(" xmlns=\"{SVG_NAMESPACE}\""));
    }
    if body.starts_with("<?xml") {
        body
    } else {
        format!("{XML_PROLOG}{body}")
    }
}

/// In-memory [`ExportTarget`] for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    elements: Vec<(Vec<String>, SvgElement)>,
}

impl StaticDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element carrying the space-separated `class_attr`.
    #[must_use]
    pub fn with_element(mut self, class_attr: &str, element: SvgElement) -> Self {
        let classes = class_attr.split_whitespace().map(str::to_owned).collect();
        self.elements.push((classes, element));
        self
    }
}

impl ExportTarget for StaticDocument {
    fn find_by_class(&self, class_name: &str) -> Option<SvgElement> {
        self.elements
            .iter()
            .find(|(classes, _)| classes.iter().any(|class| class == class_name))
            .map(|(_, element)| element.clone())
    }
}

/// Collects artifacts instead of saving them.
#[derive(Debug, Clone, Default)]
pub struct MemoryDownloader {
    pub artifacts: Vec<ExportArtifact>,
}

impl Downloader for MemoryDownloader {
    fn download(&mut self, artifact: ExportArtifact) {
        self.artifacts.push(artifact);
    }
}
