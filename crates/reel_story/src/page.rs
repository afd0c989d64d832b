//! Story pages
//!
//! A page is a document of stacked blocks on one viewport. Story sections
//! are mounted into it in document order and addressed by [`SectionId`].

use std::time::Duration;

use reel_core::Viewport;
use reel_layout::{DocumentLayout, Length, StickyStage};
use slotmap::{new_key_type, SlotMap};

use crate::error::Result;
use crate::section::{MountedSection, StorySection};

new_key_type! {
    /// Handle to a section mounted on a page
    pub struct SectionId;
}

/// A viewport and the story sections mounted on it
pub struct StoryPage {
    viewport: Viewport,
    layout: DocumentLayout,
    sections: SlotMap<SectionId, MountedSection>,
}

impl StoryPage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: DocumentLayout::new(),
            sections: SlotMap::with_key(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Append a static block (hero, quote, footer) below everything so far
    pub fn block(&mut self, name: impl Into<String>, height: Length) -> Result<()> {
        self.layout.push(name, height)?;
        Ok(())
    }

    /// Append `section` below everything so far and mount it
    ///
    /// Fails without touching the page when the track height is not a
    /// positive multiple of the viewport or the name is already taken.
    pub fn mount(&mut self, section: &StorySection) -> Result<SectionId> {
        StickyStage::new(section.track_height)?;
        self.layout
            .push(section.name.clone(), Length::Vh(section.track_height))?;
        let top = self.layout.offset_of(&section.name)?;
        let mounted = MountedSection::mount(section, top, &self.viewport);
        Ok(self.sections.insert(mounted))
    }

    /// Unmount a section; its block stays in the document
    pub fn unmount(&mut self, id: SectionId) -> bool {
        match self.sections.remove(id) {
            Some(section) => {
                section.unmount();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: SectionId) -> Option<&MountedSection> {
        self.sections.get(id)
    }

    pub fn find(&self, name: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .find(|(_, s)| s.name() == name)
            .map(|(id, _)| id)
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &MountedSection)> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Advance scrub smoothing on every section
    pub fn tick(&self, dt: Duration) {
        for section in self.sections.values() {
            section.tick(dt);
        }
    }

    /// Largest scroll offset the page allows at the current viewport height
    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll(self.viewport.metrics().height)
    }
}
