//! Assembles the five-slide company deck from catalog entries and fixed copy.
//!
//! The builder is pure: same inputs, same [`Deck`]. Slide order is title,
//! heritage, sustainability, collections, contact; every slide after the
//! first is drawn on [`MASTER_NAME`].

use super::content::DeckContent;
use super::layout::{
    Align, Deck, DeckMetadata, Frame, Length, Master, Slide, SlideObject, TextStyle,
};
use crate::model::CatalogEntry;

pub const MASTER_NAME: &str = "MASTER_SLIDE";

/// Catalog entries shown on the collections slide.
pub const COLLECTION_SLOTS: usize = 4;
pub const GRID_COLUMNS: usize = 2;
const GRID_COLUMN_WIDTH: f64 = 4.5;
const GRID_ROW_HEIGHT: f64 = 2.2;
const GRID_ORIGIN: (f64, f64) = (0.5, 1.8);

pub const STACK_BASE_Y: f64 = 2.0;
pub const STACK_ROW_HEIGHT: f64 = 1.0;

/// Collection descriptions longer than this are cut on the slide.
pub const DESCRIPTION_LIMIT: usize = 160;

const SERIF: &str = "Times New Roman";
const INK: &str = "0F172A";
const MUTED: &str = "64748B";
const BODY: &str = "334155";

/// Position of a collection in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
}

impl GridCell {
    /// Top-left corner of the cell in inches.
    pub fn origin(self) -> (f64, f64) {
        (
            self.column as f64 * GRID_COLUMN_WIDTH + GRID_ORIGIN.0,
            self.row as f64 * GRID_ROW_HEIGHT + GRID_ORIGIN.1,
        )
    }
}

pub fn grid_cell(index: usize) -> GridCell {
    GridCell {
        column: index % GRID_COLUMNS,
        row: index / GRID_COLUMNS,
    }
}

/// Top of the `index`-th row in a vertical list.
pub fn stacked_row_y(index: usize) -> f64 {
    STACK_BASE_Y + index as f64 * STACK_ROW_HEIGHT
}

/// Cuts `text` to at most `limit` characters, ending with an ellipsis when cut.
pub fn truncate_description(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

pub struct DeckBuilder<'a> {
    content: &'a DeckContent,
}

impl<'a> DeckBuilder<'a> {
    pub fn new(content: &'a DeckContent) -> Self {
        Self { content }
    }

    pub fn build(&self, catalog: &[CatalogEntry]) -> Deck {
        Deck {
            metadata: self.metadata(),
            masters: vec![self.master()],
            slides: vec![
                self.title_slide(),
                self.heritage_slide(),
                self.sustainability_slide(),
                self.collections_slide(catalog),
                self.contact_slide(),
            ],
        }
    }

    fn metadata(&self) -> DeckMetadata {
        DeckMetadata {
            author: self.content.company.clone(),
            company: self.content.company.clone(),
            subject: self.content.deck_subject.clone(),
            title: self.content.deck_title.clone(),
        }
    }

    fn master(&self) -> Master {
        Master {
            name: MASTER_NAME.to_string(),
            background: "F8FAFC".to_string(),
            objects: vec![
                SlideObject::rect(
                    Frame::new(Length::In(0.0), Length::In(0.0), Length::Pct(100.0), Length::In(0.75)),
                    INK,
                ),
                SlideObject::text(
                    &self.content.company,
                    Frame::inches(0.5, 0.15, 5.0, 0.5),
                    TextStyle::new(18, "FFFFFF").face(SERIF).bold(),
                ),
                SlideObject::Line {
                    frame: Frame::new(Length::In(0.5), Length::In(6.8), Length::Pct(90.0), Length::In(0.0)),
                    color: "CBD5E1".to_string(),
                    width_pt: 1.0,
                },
                SlideObject::text(
                    &self.content.footer_tagline,
                    Frame::inches(0.5, 6.9, 5.0, 0.3),
                    TextStyle::new(10, MUTED),
                ),
                SlideObject::SlideNumber {
                    frame: Frame::inches(9.0, 6.9, 0.5, 0.3),
                    style: TextStyle::new(10, MUTED),
                },
            ],
        }
    }

    fn heading(&self, text: &str) -> SlideObject {
        SlideObject::text(
            text,
            Frame::new(Length::In(0.5), Length::In(1.0), Length::Pct(90.0), Length::In(0.5)),
            TextStyle::new(32, INK).face(SERIF).bold(),
        )
    }

    fn title_slide(&self) -> Slide {
        let centered = |y: f64, h: f64| Frame::new(Length::In(1.0), Length::In(y), Length::Pct(80.0), Length::In(h));

        let mut slide = Slide::with_background(INK);
        slide
            .push(SlideObject::text(
                &self.content.company,
                centered(2.5, 1.0),
                TextStyle::new(44, "FFFFFF").face(SERIF).bold().align(Align::Center),
            ))
            .push(SlideObject::text(
                &self.content.title_tagline,
                centered(3.5, 0.5),
                TextStyle::new(20, "94A3B8").align(Align::Center),
            ))
            .push(SlideObject::text(
                &self.content.established,
                centered(4.2, 0.3),
                TextStyle::new(14, MUTED).align(Align::Center),
            ));
        slide
    }

    fn heritage_slide(&self) -> Slide {
        let mut slide = Slide::on_master(MASTER_NAME);
        slide
            .push(self.heading(&self.content.heritage_heading))
            .push(SlideObject::text(
                &self.content.heritage_body,
                Frame::new(Length::In(0.5), Length::In(1.8), Length::Pct(45.0), Length::In(4.0)),
                TextStyle::new(14, BODY).align(Align::Justify),
            ))
            .push(SlideObject::rect(Frame::inches(5.5, 1.8, 4.0, 3.0), "E2E8F0"))
            .push(SlideObject::text(
                &self.content.heritage_image_caption,
                Frame::inches(5.5, 3.2, 4.0, 0.5),
                TextStyle::new(12, MUTED).align(Align::Center),
            ));
        slide
    }

    fn sustainability_slide(&self) -> Slide {
        let mut slide = Slide::on_master(MASTER_NAME);
        slide.push(self.heading(&self.content.sustainability_heading));

        for (idx, point) in self.content.sustainability_points.iter().enumerate() {
            let y = stacked_row_y(idx);
            slide
                .push(SlideObject::text(
                    &point.title,
                    Frame::inches(0.5, y, 3.0, 0.4),
                    TextStyle::new(16, "1E3A8A").bold(),
                ))
                .push(SlideObject::text(
                    &point.description,
                    Frame::inches(0.5, y + 0.4, 8.0, 0.4),
                    TextStyle::new(12, "475569"),
                ));
        }
        slide
    }

    fn collections_slide(&self, catalog: &[CatalogEntry]) -> Slide {
        let mut slide = Slide::on_master(MASTER_NAME);
        slide.push(self.heading(&self.content.collections_heading));

        for (idx, entry) in catalog.iter().take(COLLECTION_SLOTS).enumerate() {
            let (x, y) = grid_cell(idx).origin();
            slide
                .push(SlideObject::text(
                    &entry.title,
                    Frame::inches(x, y, 4.0, 0.3),
                    TextStyle::new(14, INK).bold(),
                ))
                .push(SlideObject::text(
                    &entry.category,
                    Frame::inches(x, y + 0.3, 4.0, 0.2),
                    TextStyle::new(10, MUTED).italic(),
                ))
                .push(SlideObject::text(
                    truncate_description(&entry.description, DESCRIPTION_LIMIT),
                    Frame::inches(x, y + 0.5, 4.0, 1.0),
                    TextStyle::new(11, BODY),
                ));
        }
        slide
    }

    fn contact_slide(&self) -> Slide {
        let block = &self.content.contact;
        let mut slide = Slide::on_master(MASTER_NAME);
        slide
            .push(self.heading(&self.content.contact_heading))
            .push(SlideObject::text(
                &block.headquarters_label,
                Frame::inches(1.0, 2.5, 3.0, 0.3),
                TextStyle::new(14, "000000").bold(),
            ))
            .push(SlideObject::text(
                &block.address,
                Frame::inches(1.0, 2.9, 4.0, 1.0),
                TextStyle::new(12, BODY),
            ))
            .push(SlideObject::text(
                &block.contact_label,
                Frame::inches(5.5, 2.5, 3.0, 0.3),
                TextStyle::new(14, "000000").bold(),
            ))
            .push(SlideObject::text(
                &block.details,
                Frame::inches(5.5, 2.9, 4.0, 1.0),
                TextStyle::new(12, BODY),
            ));
        slide
    }
}
