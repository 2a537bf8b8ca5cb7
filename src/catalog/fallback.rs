//! The bundled offline catalog.
//!
//! Fixed at build time, always available, no I/O. Order is significant: the
//! featured fallback takes the first N entries.

use crate::model::CatalogEntry;

fn picsum(seed: u32) -> String {
    format!("https://picsum.photos/600/800?random={seed}")
}

fn gallery(seeds: [u32; 3]) -> Vec<String> {
    seeds.iter().map(|seed| picsum(*seed)).collect()
}

/// The fallback dataset, in display order.
pub fn dataset() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "raw-denim",
            "Raw Denim Series",
            "Denim",
            "Unwashed, untreated, and pure. The foundation of authentic jeanswear.",
            "Woven on vintage shuttle looms, our raw selvedge denim is left unwashed so every \
             crease and fade tells the wearer's story. A dense, slightly slubby hand that softens \
             with wear.",
            picsum(1),
        )
        .with_features([
            "14.5oz selvedge construction",
            "100% long-staple cotton",
            "Indigo rope-dyed yarns",
            "Red-line selvedge ID",
        ])
        .with_images(gallery([1, 11, 21])),
        CatalogEntry::new(
            "sustainable-blends",
            "Eco-Weave Blends",
            "Sustainable",
            "Organic cotton and recycled polyester blends for a sustainable future.",
            "GOTS-certified organic cotton meets post-consumer recycled polyester in a fabric that \
             performs like a virgin blend while cutting water use and landfill waste.",
            picsum(2),
        )
        .with_features([
            "GOTS-certified organic cotton",
            "30% recycled polyester",
            "Low-impact reactive dyes",
            "Traceable supply chain",
        ])
        .with_images(gallery([2, 12, 22])),
        CatalogEntry::new(
            "stretch-tech",
            "Performance Stretch",
            "Performance",
            "Advanced elasticity without compromising the authentic denim look.",
            "A dual-core elastane yarn gives full recovery after thousands of stretch cycles, so \
             garments keep their shape through the day without the shine of typical stretch \
             denim.",
            picsum(3),
        )
        .with_features([
            "Dual-core elastane yarn",
            "95% shape recovery",
            "Authentic twill face",
            "Bag-out resistant",
        ])
        .with_images(gallery([3, 13, 23])),
        CatalogEntry::new(
            "summer-chambray",
            "Summer Chambray",
            "Lightweight",
            "Breathable chambray weaves for shirting and warm-weather collections.",
            "An airy plain weave with an indigo warp and a white weft, finished with an enzyme \
             wash for a soft, broken-in feel from the first wear.",
            picsum(4),
        )
        .with_features([
            "4.5oz plain weave",
            "Enzyme-washed finish",
            "High air permeability",
            "Ideal for shirting",
        ])
        .with_images(gallery([4, 14, 24])),
        CatalogEntry::new(
            "heritage-canvas",
            "Heritage Work Canvas",
            "Workwear",
            "Heavyweight duck canvas built for utility and long service life.",
            "A tightly woven cotton duck with a wax-ready surface, engineered for chore coats, \
             aprons and utility trousers that need to stand up to daily abuse.",
            picsum(5),
        )
        .with_features([
            "12oz cotton duck",
            "Abrasion tested to 50,000 cycles",
            "Wax-ready surface",
            "Triple-ply warp",
        ])
        .with_images(gallery([5, 15, 25])),
        CatalogEntry::new(
            "black-selvedge",
            "Midnight Selvedge",
            "Denim",
            "Sulphur-dyed black selvedge with a deep, slow-fading cast.",
            "Sulphur-dyed over an indigo base, this black selvedge fades to a smoky grey-blue \
             rather than the flat grey of ordinary black denim.",
            picsum(6),
        )
        .with_features([
            "13oz selvedge construction",
            "Indigo-bottomed sulphur black",
            "Grey-line selvedge ID",
            "Sanforized",
        ])
        .with_images(gallery([6, 16, 26])),
    ]
}
