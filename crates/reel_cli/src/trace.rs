//! Scroll and resize replays
//!
//! Builds a [`StoryPage`] from the configuration, drives its viewport the
//! way a browser would, and captures what one section rendered at each
//! point.

use anyhow::{Context, Result};
use reel_core::{Size, Viewport};
use reel_layout::Length;
use reel_story::{MountedSection, Scrub, StoryPage, VisualTargets};
use serde::Serialize;
use std::time::Duration;

use crate::config::ReelConfig;

/// What a section showed at one scroll position
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Replay phase (`"before"`, `"resized"`, `"after"`); empty for traces
    #[serde(skip_serializing_if = "str::is_empty")]
    pub phase: &'static str,
    pub width: f32,
    pub offset: f32,
    pub progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playhead: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub status: String,
    pub targets: VisualTargets,
}

impl Frame {
    fn capture(phase: &'static str, page: &StoryPage, section: &MountedSection) -> Self {
        let metrics = page.viewport().metrics();
        Self {
            phase,
            width: metrics.width,
            offset: metrics.scroll_offset,
            progress: section.progress(),
            playhead: section.playhead(),
            variant: section.active_variant(),
            status: section.status().to_string(),
            targets: section.targets(),
        }
    }
}

/// Mount every configured section on a fresh page
///
/// `width` replaces the configured viewport width, `scrub` every section's
/// scrub mode.
pub fn build_page(
    config: &ReelConfig,
    width: Option<f32>,
    scrub: Option<Scrub>,
) -> Result<StoryPage> {
    if let Some(name) = config.duplicate_names().first() {
        anyhow::bail!("Section '{}' is declared more than once", name);
    }

    let width = width.unwrap_or(config.viewport.width);
    let height = config.viewport.height;
    Size::try_new(width, height).context("Invalid viewport")?;

    let mut page = StoryPage::new(Viewport::new(width, height));
    for entry in &config.sections {
        let mut section = entry.to_section()?;
        if let Some(scrub) = scrub {
            section.scrub = scrub;
        }

        if let Some(top) = entry.document_top {
            let end = page.layout().total_height(height);
            if top > end {
                page.block(format!("{}:lead-in", entry.name), Length::Px(top - end))?;
            } else if top < end {
                tracing::warn!(
                    section = %entry.name,
                    document_top = top,
                    content_end = end,
                    "document_top overlaps earlier sections, stacking directly below"
                );
            }
        }

        page.mount(&section)
            .with_context(|| format!("Failed to mount section '{}'", entry.name))?;
    }
    Ok(page)
}

/// Scroll offset at `progress` through the section's track
fn offset_at(section: &MountedSection, progress: f32) -> Result<f32> {
    let bounds = section.bounds().with_context(|| {
        format!(
            "Section '{}' has no scroll track at this viewport size",
            section.name()
        )
    })?;
    Ok(bounds.track_start + progress.clamp(0.0, 1.0) * bounds.track_length)
}

fn settle(page: &StoryPage, frame: Duration, frames: u32) {
    for _ in 0..frames.max(1) {
        page.tick(frame);
    }
}

fn find<'a>(page: &'a StoryPage, name: &str) -> Result<&'a MountedSection> {
    page.find(name)
        .and_then(|id| page.get(id))
        .with_context(|| format!("No section named '{}' is configured", name))
}

/// Sample `name` at evenly spaced progress values across its track
pub fn trace(config: &ReelConfig, name: &str, width: Option<f32>) -> Result<Vec<Frame>> {
    let scrub = config.trace.scrub_override()?;
    let page = build_page(config, width, scrub)?;
    let section = find(&page, name)?;

    let samples = config.trace.samples.max(2);
    let mut frames = Vec::with_capacity(samples);
    for i in 0..samples {
        let progress = i as f32 / (samples - 1) as f32;
        page.viewport().scroll_to(offset_at(section, progress)?);
        settle(&page, config.trace.frame(), config.trace.frames);
        frames.push(Frame::capture("", &page, section));
    }
    Ok(frames)
}

/// Scroll to `progress` at width `from`, resize to `to`, then catch up
///
/// Returns three frames: before the resize, straight after it (the new
/// variant's initial state), and after the next scroll and frames.
pub fn replay_resize(
    config: &ReelConfig,
    name: &str,
    from: f32,
    to: f32,
    progress: f32,
) -> Result<Vec<Frame>> {
    let scrub = config.trace.scrub_override()?;
    let page = build_page(config, Some(from), scrub)?;
    let section = find(&page, name)?;
    let frame = config.trace.frame();
    let frames = config.trace.frames;

    page.viewport().scroll_to(offset_at(section, progress)?);
    settle(&page, frame, frames);
    let before = Frame::capture("before", &page, section);

    page.viewport().resize(to, config.viewport.height);
    let resized = Frame::capture("resized", &page, section);

    page.viewport().scroll_to(offset_at(section, progress)?);
    settle(&page, frame, frames);
    let after = Frame::capture("after", &page, section);

    Ok(vec![before, resized, after])
}
