//! `reel.toml` handling
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [trace]
//! samples = 11
//! scrub = "immediate"     # "smooth", "section", or a lag in seconds
//!
//! [[section]]
//! name = "application"    # a built-in showcase
//! document_top = 800.0
//!
//! [[section]]
//! name = "teaser"
//! track_height = 2.0
//!
//! [[section.variant]]
//! breakpoint = "*"
//! initial = { card = { opacity = 0.0 } }
//! steps = [{ target = "card", duration = 1.0, ease = "power2.out", props = { opacity = 1.0 } }]
//! ```
//!
//! Without a file, the three built-in showcases are stacked on a 1280x800
//! viewport.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use reel_animation::{Props, Step, TargetStates, TimelineProgram};
use reel_layout::Breakpoint;
use reel_story::{showcase, BreakpointVariant, Scrub, StorySection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "reel.toml";

// =============================================================================
// reel.toml
// =============================================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ReelConfig {
    pub viewport: ViewportConfig,
    pub trace: TraceConfig,
    /// Sections in document order
    #[serde(rename = "section")]
    pub sections: Vec<SectionConfig>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            trace: TraceConfig::default(),
            sections: showcase::NAMES
                .iter()
                .map(|name| SectionConfig::builtin(name))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Evenly spaced progress samples across the track
    pub samples: usize,
    /// Overrides every section's scrub mode unless unset or `"section"`
    pub scrub: Option<ScrubSetting>,
    /// Length of one simulated frame, in milliseconds
    pub frame_ms: u64,
    /// Frames ticked after each scroll before sampling
    pub frames: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            samples: 11,
            scrub: Some(ScrubSetting::Mode("immediate".to_string())),
            frame_ms: 16,
            frames: 60,
        }
    }
}

impl TraceConfig {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    /// Scrub mode forced on every traced section, `None` keeps their own
    pub fn scrub_override(&self) -> Result<Option<Scrub>> {
        match &self.scrub {
            Some(ScrubSetting::Mode(mode)) if mode.trim() == "section" => Ok(None),
            Some(setting) => setting.to_scrub().map(Some),
            None => Ok(None),
        }
    }
}

/// `"immediate"`, `"smooth"` (one second lag) or a lag in seconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScrubSetting {
    Lag(f32),
    Mode(String),
}

impl ScrubSetting {
    pub fn to_scrub(&self) -> Result<Scrub> {
        match self {
            ScrubSetting::Mode(mode) => match mode.trim() {
                "immediate" | "none" => Ok(Scrub::Immediate),
                "smooth" => Ok(Scrub::Smooth(1.0)),
                other => anyhow::bail!(
                    "Invalid scrub '{}'. Expected \"immediate\", \"smooth\" or a lag in seconds",
                    other
                ),
            },
            ScrubSetting::Lag(lag) if *lag == 0.0 => Ok(Scrub::Immediate),
            ScrubSetting::Lag(lag) if lag.is_finite() && *lag > 0.0 => Ok(Scrub::Smooth(*lag)),
            ScrubSetting::Lag(lag) => anyhow::bail!("Invalid scrub lag {}", lag),
        }
    }
}

/// One `[[section]]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct SectionConfig {
    pub name: String,
    /// Where the track starts at the configured viewport size, in pixels.
    /// Space up to it is filled with a static block.
    #[serde(default)]
    pub document_top: Option<f32>,
    /// Track height in viewport heights; required for custom sections
    #[serde(default)]
    pub track_height: Option<f32>,
    #[serde(default)]
    pub scrub: Option<ScrubSetting>,
    /// Custom variants; empty means the built-in showcase of this name
    #[serde(default, rename = "variant")]
    pub variants: Vec<VariantConfig>,
}

/// One `[[section.variant]]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct VariantConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub breakpoint: Breakpoint,
    #[serde(default)]
    pub initial: IndexMap<String, Props>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ReelConfig {
    /// Load `path`, or `reel.toml` in the working directory when no path is
    /// given. Only an explicit path has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    tracing::debug!("no {} found, using built-in sections", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn section(&self, name: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Names declared more than once
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut duplicates = Vec::new();
        for section in &self.sections {
            let name = section.name.as_str();
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }
}

impl SectionConfig {
    /// Reference to a built-in showcase with its own settings
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            document_top: None,
            track_height: None,
            scrub: None,
            variants: Vec::new(),
        }
    }

    /// Build the section this table describes
    pub fn to_section(&self) -> Result<StorySection> {
        let mut section = if self.variants.is_empty() {
            showcase::by_name(&self.name).with_context(|| {
                format!(
                    "Section '{}' declares no variants and is not one of {:?}",
                    self.name,
                    showcase::NAMES
                )
            })?
        } else {
            let track_height = self.track_height.with_context(|| {
                format!("Section '{}' declares variants but no track_height", self.name)
            })?;
            let mut section = StorySection::new(&self.name, track_height);
            for (index, variant) in self.variants.iter().enumerate() {
                let variant = variant
                    .to_variant(index)
                    .with_context(|| format!("Section '{}', variant {}", self.name, index))?;
                section = section.variant(variant);
            }
            section
        };

        if let Some(track_height) = self.track_height {
            section.track_height = track_height;
        }
        if let Some(scrub) = &self.scrub {
            section.scrub = scrub
                .to_scrub()
                .with_context(|| format!("Section '{}'", self.name))?;
        }
        Ok(section)
    }
}

impl VariantConfig {
    fn to_variant(&self, index: usize) -> Result<BreakpointVariant> {
        let program = TimelineProgram::from_steps(self.steps.clone())?;
        let mut initial = TargetStates::new();
        for (target, props) in &self.initial {
            initial.set(target.as_str().into(), props);
        }
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("variant-{index}"));
        Ok(BreakpointVariant::new(name, self.breakpoint, initial, program))
    }
}
