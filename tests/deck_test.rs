use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::io::{Cursor, Read};
use std::sync::Arc;
use wrapweft::catalog::{fallback, CatalogResolver};
use wrapweft::config::DeckConfig;
use wrapweft::deck::layout::SlideObject;
use wrapweft::deck::{
    grid_cell, Deck, DeckBuilder, DeckContent, DeckEngine, DeckError, DeckService, FileSink, GridCell, PptxEngine,
    MASTER_NAME,
};
use wrapweft::model::CatalogEntry;
use wrapweft::store::{MockStore, StoreError};

struct OfflineEngine;

#[async_trait]
impl DeckEngine for OfflineEngine {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn is_ready(&self) -> bool {
        false
    }

    async fn serialize(&self, _deck: &Deck) -> Result<Vec<u8>, DeckError> {
        panic!("serialize must not be called on an engine that is not ready");
    }
}

fn catalog(n: usize) -> Vec<CatalogEntry> {
    (0..n)
        .map(|i| CatalogEntry::new(format!("c{i}"), format!("Collection {i}"), "Denim", format!("Description {i}"), "", "img"))
        .collect()
}

fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn service(resolver: CatalogResolver, dir: &std::path::Path) -> DeckService {
    let config = DeckConfig {
        output_dir: dir.to_path_buf(),
        ..DeckConfig::default()
    };
    DeckService::new(
        resolver,
        Arc::new(PptxEngine::new().created_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())),
        Arc::new(FileSink::new(dir)),
        &config,
    )
}

#[test]
fn test_grid_placement_is_deterministic() {
    assert_eq!(grid_cell(2), GridCell { column: 0, row: 1 });
    assert_eq!(grid_cell(3), GridCell { column: 1, row: 1 });

    let content = DeckContent::default();
    let deck = DeckBuilder::new(&content).build(&catalog(4));
    let collections = &deck.slides[3];

    let title_of = |n: usize| {
        collections
            .objects
            .iter()
            .find(|o| o.as_text() == Some(format!("Collection {n}").as_str()))
            .map(|o| (o.frame().x_in(), o.frame().y_in()))
            .unwrap()
    };
    assert_eq!(title_of(0), (0.5, 1.8));
    assert_eq!(title_of(1), (5.0, 1.8));
    assert_eq!(title_of(2), (0.5, 4.0));
    assert_eq!(title_of(3), (5.0, 4.0));
}

#[test]
fn test_collections_slide_shows_at_most_four_entries() {
    let content = DeckContent::default();
    let deck = DeckBuilder::new(&content).build(&catalog(5));
    let texts: Vec<&str> = deck.slides[3].texts().collect();

    assert!(texts.contains(&"Collection 3"));
    assert!(!texts.contains(&"Collection 4"));
    // heading + 3 text objects per entry
    assert_eq!(texts.len(), 1 + 4 * 3);
}

#[test]
fn test_master_carries_header_footer_and_slide_number() {
    let content = DeckContent::default();
    let deck = DeckBuilder::new(&content).build(&[]);
    let master = deck.master(MASTER_NAME).unwrap();

    assert_eq!(master.background, "F8FAFC");
    assert!(master
        .objects
        .iter()
        .any(|o| matches!(o, SlideObject::SlideNumber { frame, .. } if frame.x_in() == 9.0)));
    assert!(master.objects.iter().any(|o| o.as_text() == Some("Premium Denim & Sustainable Textiles")));
}

#[tokio::test]
async fn test_export_writes_a_complete_pptx() {
    let dir = tempfile::tempdir().unwrap();
    let export = service(CatalogResolver::offline(), dir.path()).export().await.unwrap();

    assert_eq!(export.location, dir.path().join("WrapWeftCo_Presentation.pptx"));
    assert_eq!(export.slides, 5);
    assert_eq!(export.advisory, None);

    let bytes = std::fs::read(&export.location).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "ppt/presentation.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout2.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/slide5.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }

    let core = zip_entry(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Wrap Weft &amp; Co - Premium Textile Supplier</dc:title>"));
    assert!(core.contains("2025-01-01T00:00:00Z"));

    let layout = zip_entry(&bytes, "ppt/slideLayouts/slideLayout2.xml");
    assert!(layout.contains("type=\"slidenum\""));
    assert!(layout.contains("MASTER_SLIDE"));

    let title_rels = zip_entry(&bytes, "ppt/slides/_rels/slide1.xml.rels");
    assert!(title_rels.contains("slideLayout1.xml"));
    let heritage_rels = zip_entry(&bytes, "ppt/slides/_rels/slide2.xml.rels");
    assert!(heritage_rels.contains("slideLayout2.xml"));

    let collections = zip_entry(&bytes, "ppt/slides/slide4.xml");
    for entry in &fallback::dataset()[..4] {
        assert!(collections.contains(&entry.title));
    }
    assert!(!collections.contains(&fallback::dataset()[4].title));
}

#[tokio::test]
async fn test_engine_not_ready_fails_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let deck = service(CatalogResolver::offline(), dir.path()).with_engine(Arc::new(OfflineEngine));

    let err = deck.export().await.unwrap_err();
    assert!(matches!(err, DeckError::GeneratorNotReady));
    assert_eq!(err.to_string(), "Presentation generator not ready. Please try again in a moment.");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_uses_full_listing_and_passes_advisory_on() {
    let mock = MockStore::new();
    mock.expect_list_all().return_err(StoreError::Transport("dns error".into()));

    let dir = tempfile::tempdir().unwrap();
    let resolver = CatalogResolver::new(Some(Arc::new(mock.clone())));
    let export = service(resolver, dir.path()).export().await.unwrap();

    assert!(export.advisory.is_some());
    assert!(export.location.exists());
    mock.verify();
}

#[tokio::test]
async fn test_control_characters_in_remote_text_keep_slides_well_formed() {
    let mut pasted = catalog(1);
    pasted[0].description = "Pasted\u{b} from Word\u{1} & Co".to_string();
    let mock = MockStore::new();
    mock.expect_list_all().return_ok(pasted);

    let dir = tempfile::tempdir().unwrap();
    let resolver = CatalogResolver::new(Some(Arc::new(mock.clone())));
    let export = service(resolver, dir.path()).export().await.unwrap();

    let bytes = std::fs::read(&export.location).unwrap();
    let collections = zip_entry(&bytes, "ppt/slides/slide4.xml");
    assert!(collections.contains("<a:t>Pasted from Word &amp; Co</a:t>"));
    assert!(!collections.contains('\u{b}'));
    assert!(!collections.contains('\u{1}'));
    mock.verify();
}
