//! Unified configuration for the exam extraction pipeline.
//!
//! A single record parameterizes segmentation, clip geometry and crop
//! post-processing:
//! - SegmenterConfig: fragment hygiene and option placeholders
//! - ClipConfig: margins around a question's body region
//! - RenderConfig: supersampling and background detection

use crate::error::{Error, Result};
use crate::rendering::{BackgroundPolicy, Corner};
use serde::{Deserialize, Serialize};

/// Fragment filtering and option text settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Case-insensitive substrings marking fragments to skip entirely
    /// (site watermarks, running footers)
    pub noise_patterns: Vec<String>,

    /// Option text used when a marker is followed by no text
    pub empty_option_placeholder: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            noise_patterns: vec!["comcbt".to_string()],
            empty_option_placeholder: "(no content)".to_string(),
        }
    }
}

impl SegmenterConfig {
    /// Whether `text` contains one of the noise patterns.
    pub fn is_noise(&self, text: &str) -> bool {
        if self.noise_patterns.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.noise_patterns
            .iter()
            .any(|p| !p.is_empty() && lower.contains(&p.to_lowercase()))
    }
}

/// Geometry of the clip rectangle around a question body, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Space kept above the question-start line
    pub vertical_margin: f32,

    /// Space left out above the first option line
    pub option_gap: f32,

    /// Body height used when no option line is known
    pub fallback_body_height: f32,

    /// Inset from both edges of the column
    pub horizontal_inset: f32,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            vertical_margin: 10.0,
            option_gap: 5.0,
            fallback_body_height: 250.0,
            horizontal_inset: 5.0,
        }
    }
}

/// Rendering and crop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Supersampling factor applied when rendering a clip (1.0 = 1px per point)
    pub scale: f32,

    /// Background reference for cropping
    pub background: BackgroundPolicy,

    /// Largest per-channel difference still counted as background
    pub crop_threshold: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 3.0,
            background: BackgroundPolicy::white(),
            crop_threshold: 0,
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamPipelineConfig {
    /// Segmentation settings
    pub segmenter: SegmenterConfig,

    /// Clip rectangle geometry
    pub clip: ClipConfig,

    /// Render and crop settings
    pub render: RenderConfig,
}

impl ExamPipelineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for scanned sheets: sample the paper color from the top-left
    /// corner and tolerate faint scan noise.
    pub fn scanned() -> Self {
        Self::default()
            .with_background(BackgroundPolicy::SampledCorner {
                corner: Corner::TopLeft,
            })
            .with_crop_threshold(24)
    }

    /// Set the supersampling factor.
    pub fn with_render_scale(mut self, scale: f32) -> Self {
        self.render.scale = scale;
        self
    }

    /// Set the crop background policy.
    pub fn with_background(mut self, background: BackgroundPolicy) -> Self {
        self.render.background = background;
        self
    }

    /// Set the crop threshold.
    pub fn with_crop_threshold(mut self, threshold: u8) -> Self {
        self.render.crop_threshold = threshold;
        self
    }

    /// Set the vertical margin above the question start.
    pub fn with_vertical_margin(mut self, margin: f32) -> Self {
        self.clip.vertical_margin = margin;
        self
    }

    /// Set the fallback body height.
    pub fn with_fallback_body_height(mut self, height: f32) -> Self {
        self.clip.fallback_body_height = height;
        self
    }

    /// Set the horizontal inset.
    pub fn with_horizontal_inset(mut self, inset: f32) -> Self {
        self.clip.horizontal_inset = inset;
        self
    }

    /// Replace the noise patterns.
    pub fn with_noise_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segmenter.noise_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        let clip = &self.clip;
        for (name, value) in [
            ("vertical_margin", clip.vertical_margin),
            ("option_gap", clip.option_gap),
            ("fallback_body_height", clip.fallback_body_height),
            ("horizontal_inset", clip.horizontal_inset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !(self.render.scale.is_finite() && self.render.scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "render scale must be positive, got {}",
                self.render.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExamPipelineConfig::default();
        assert_eq!(config.clip.vertical_margin, 10.0);
        assert_eq!(config.clip.option_gap, 5.0);
        assert_eq!(config.clip.fallback_body_height, 250.0);
        assert_eq!(config.clip.horizontal_inset, 5.0);
        assert_eq!(config.render.scale, 3.0);
        assert_eq!(config.render.background, BackgroundPolicy::white());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ExamPipelineConfig::new()
            .with_render_scale(2.0)
            .with_horizontal_inset(0.0)
            .with_noise_patterns(["footer"]);
        assert_eq!(config.render.scale, 2.0);
        assert_eq!(config.clip.horizontal_inset, 0.0);
        assert_eq!(config.segmenter.noise_patterns, vec!["footer".to_string()]);
    }

    #[test]
    fn test_scanned_preset() {
        let config = ExamPipelineConfig::scanned();
        assert_eq!(config.render.background, BackgroundPolicy::sampled());
        assert!(config.render.crop_threshold > 0);
    }

    #[test]
    fn test_noise_matching_case_insensitive() {
        let seg = SegmenterConfig::default();
        assert!(seg.is_noise("www.COMCBT.com"));
        assert!(!seg.is_noise("1. What is X?"));
        let empty = SegmenterConfig {
            noise_patterns: vec![String::new()],
            ..Default::default()
        };
        assert!(!empty.is_noise("anything"));
    }

    #[test]
    fn test_partial_json() {
        let config = ExamPipelineConfig::from_json_str(r#"{"render": {"scale": 2.0}}"#).unwrap();
        assert_eq!(config.render.scale, 2.0);
        assert_eq!(config.clip, ClipConfig::default());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let err = ExamPipelineConfig::new().with_render_scale(0.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(ExamPipelineConfig::from_json_str(r#"{"clip": {"vertical_margin": -1}}"#).is_err());
    }
}
