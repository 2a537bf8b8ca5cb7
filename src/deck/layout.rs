//! Engine-neutral slide document model.
//!
//! Positions are in inches from the top-left corner of a 10 x 7.5 in slide,
//! or a percentage of the slide width/height. Colors are `RRGGBB` hex.

use serde::{Deserialize, Serialize};

pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 7.5;

/// A coordinate or extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    In(f64),
    Pct(f64),
}

impl Length {
    /// Resolves to inches against the slide dimension on this axis.
    pub fn to_inches(self, axis: f64) -> f64 {
        match self {
            Length::In(v) => v,
            Length::Pct(p) => axis * p / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Length,
    pub y: Length,
    pub w: Length,
    pub h: Length,
}

impl Frame {
    pub fn new(x: Length, y: Length, w: Length, h: Length) -> Self {
        Self { x, y, w, h }
    }

    /// All four values in inches.
    pub fn inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(Length::In(x), Length::In(y), Length::In(w), Length::In(h))
    }

    pub fn x_in(&self) -> f64 {
        self.x.to_inches(SLIDE_WIDTH_IN)
    }

    pub fn y_in(&self) -> f64 {
        self.y.to_inches(SLIDE_HEIGHT_IN)
    }

    pub fn w_in(&self) -> f64 {
        self.w.to_inches(SLIDE_WIDTH_IN)
    }

    pub fn h_in(&self) -> f64 {
        self.h.to_inches(SLIDE_HEIGHT_IN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: u32,
    pub color: String,
    pub font_face: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn new(font_size: u32, color: &str) -> Self {
        Self {
            font_size,
            color: color.to_string(),
            font_face: None,
            bold: false,
            italic: false,
            align: Align::Left,
        }
    }

    pub fn face(mut self, face: &str) -> Self {
        self.font_face = Some(face.to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlideObject {
    Text {
        text: String,
        frame: Frame,
        style: TextStyle,
    },
    Rect {
        frame: Frame,
        fill: String,
    },
    /// A horizontal or vertical rule; `frame.h` or `frame.w` is zero.
    Line {
        frame: Frame,
        color: String,
        width_pt: f64,
    },
    /// Placeholder for the running slide number.
    SlideNumber { frame: Frame, style: TextStyle },
}

impl SlideObject {
    pub fn text(text: impl Into<String>, frame: Frame, style: TextStyle) -> Self {
        SlideObject::Text {
            text: text.into(),
            frame,
            style,
        }
    }

    pub fn rect(frame: Frame, fill: &str) -> Self {
        SlideObject::Rect {
            frame,
            fill: fill.to_string(),
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            SlideObject::Text { frame, .. }
            | SlideObject::Rect { frame, .. }
            | SlideObject::Line { frame, .. }
            | SlideObject::SlideNumber { frame, .. } => frame,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlideObject::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A reusable layout: background plus objects drawn under every slide using it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Master {
    pub name: String,
    pub background: String,
    pub objects: Vec<SlideObject>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Name of the master this slide is drawn on, if any.
    pub master: Option<String>,
    /// Overrides the master background.
    pub background: Option<String>,
    pub objects: Vec<SlideObject>,
}

impl Slide {
    pub fn on_master(name: &str) -> Self {
        Self {
            master: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_background(color: &str) -> Self {
        Self {
            background: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, object: SlideObject) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Every text run on the slide, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().filter_map(SlideObject::as_text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckMetadata {
    pub author: String,
    pub company: String,
    pub subject: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub metadata: DeckMetadata,
    pub masters: Vec<Master>,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn master(&self, name: &str) -> Option<&Master> {
        self.masters.iter().find(|m| m.name == name)
    }

    /// Slides that refer to a master the deck does not define.
    pub fn dangling_masters(&self) -> Vec<&str> {
        self.slides
            .iter()
            .filter_map(|s| s.master.as_deref())
            .filter(|name| self.master(name).is_none())
            .collect()
    }
}
