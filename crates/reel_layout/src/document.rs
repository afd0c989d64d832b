//! Document block layout
//!
//! The page is a vertical stack of blocks. Some have a fixed pixel height
//! and the story tracks are multiples of the viewport height, so block
//! positions are only known once the viewport is.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Height of one document block
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    /// Logical pixels
    Px(f32),
    /// Multiples of the viewport height
    Vh(f32),
}

impl Length {
    pub fn resolve(&self, viewport_height: f32) -> f32 {
        match *self {
            Length::Px(px) => px,
            Length::Vh(multiple) => multiple * viewport_height,
        }
    }

    fn validate(&self) -> Result<()> {
        let (Length::Px(v) | Length::Vh(v)) = *self;
        if !v.is_finite() || v < 0.0 {
            return Err(LayoutError::InvalidLength(v));
        }
        Ok(())
    }
}

/// A document offset made of a pixel part and a viewport-height part
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub px: f32,
    pub vh: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { px: 0.0, vh: 0.0 };

    pub fn px(px: f32) -> Self {
        Self { px, vh: 0.0 }
    }

    pub fn vh(vh: f32) -> Self {
        Self { px: 0.0, vh }
    }

    pub fn resolve(&self, viewport_height: f32) -> f32 {
        self.px + self.vh * viewport_height
    }

    fn plus(mut self, length: Length) -> Self {
        match length {
            Length::Px(px) => self.px += px,
            Length::Vh(vh) => self.vh += vh,
        }
        self
    }
}

impl From<f32> for Offset {
    fn from(px: f32) -> Self {
        Offset::px(px)
    }
}

/// An ordered stack of named blocks
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    blocks: Vec<(String, Length)>,
}

impl DocumentLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block below everything added so far
    pub fn push(&mut self, name: impl Into<String>, height: Length) -> Result<()> {
        height.validate()?;
        let name = name.into();
        if self.contains(&name) {
            return Err(LayoutError::DuplicateBlock(name));
        }
        self.blocks.push((name, height));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.iter().any(|(block, _)| block == name)
    }

    pub fn block(mut self, name: impl Into<String>, height: Length) -> Result<Self> {
        self.push(name, height)?;
        Ok(self)
    }

    /// Offset of the top edge of `name`, valid for any viewport height
    pub fn offset_of(&self, name: &str) -> Result<Offset> {
        let mut offset = Offset::ZERO;
        for (block, height) in &self.blocks {
            if block == name {
                return Ok(offset);
            }
            offset = offset.plus(*height);
        }
        Err(LayoutError::UnknownBlock(name.to_string()))
    }

    /// Document offset of the top edge of `name` in pixels
    pub fn top_of(&self, name: &str, viewport_height: f32) -> Result<f32> {
        self.offset_of(name).map(|o| o.resolve(viewport_height))
    }

    pub fn total_height(&self, viewport_height: f32) -> f32 {
        self.blocks
            .iter()
            .map(|(_, height)| height.resolve(viewport_height))
            .sum()
    }

    /// Largest scroll offset the document allows
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.total_height(viewport_height) - viewport_height).max(0.0)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> DocumentLayout {
        DocumentLayout::new()
            .block("hero", Length::Vh(1.0))
            .and_then(|d| d.block("application", Length::Vh(3.0)))
            .and_then(|d| d.block("quote", Length::Px(400.0)))
            .and_then(|d| d.block("brand", Length::Vh(2.5)))
            .unwrap()
    }

    #[test]
    fn test_tops_follow_viewport_height() {
        let page = page();
        assert_eq!(page.top_of("hero", 800.0), Ok(0.0));
        assert_eq!(page.top_of("application", 800.0), Ok(800.0));
        assert_eq!(page.top_of("brand", 800.0), Ok(800.0 + 2400.0 + 400.0));
        assert_eq!(page.top_of("brand", 600.0), Ok(600.0 + 1800.0 + 400.0));
        assert_eq!(
            page.top_of("footer", 800.0),
            Err(LayoutError::UnknownBlock("footer".into()))
        );
    }

    #[test]
    fn test_offset_keeps_units_apart() {
        let offset = page().offset_of("brand").unwrap();
        assert_eq!(offset, Offset { px: 400.0, vh: 4.0 });
        assert_eq!(offset.resolve(100.0), 800.0);
    }

    #[test]
    fn test_total_and_max_scroll() {
        let page = page();
        assert_eq!(page.total_height(800.0), 800.0 + 2400.0 + 400.0 + 2000.0);
        assert_eq!(page.max_scroll(800.0), 5600.0 - 800.0);
        assert_eq!(DocumentLayout::new().max_scroll(800.0), 0.0);
    }

    #[test]
    fn test_rejects_negative_lengths() {
        let mut page = DocumentLayout::new();
        assert_eq!(
            page.push("bad", Length::Px(-1.0)),
            Err(LayoutError::InvalidLength(-1.0))
        );
        assert!(page.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut page = page();
        assert_eq!(
            page.push("brand", Length::Vh(2.5)),
            Err(LayoutError::DuplicateBlock("brand".into()))
        );
        assert_eq!(page.len(), 4);
        assert_eq!(page.top_of("brand", 800.0), Ok(800.0 + 2400.0 + 400.0));
    }
}
