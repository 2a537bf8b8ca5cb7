//! Fixed text blocks of the company deck.
//!
//! Everything here can be overridden from the `[deck.content]` table of the
//! site config; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityPoint {
    pub title: String,
    pub description: String,
}

impl SustainabilityPoint {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactBlock {
    pub headquarters_label: String,
    pub address: String,
    pub contact_label: String,
    pub details: String,
}

impl Default for ContactBlock {
    fn default() -> Self {
        Self {
            headquarters_label: "Headquarters".to_string(),
            address: "123 Textile Avenue\nGarment District, NY 10018\nUnited States".to_string(),
            contact_label: "Contact".to_string(),
            details: "Email: hello@wrapweftco.com\nPhone: +1 (555) 123-4567".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckContent {
    pub company: String,
    pub deck_title: String,
    pub deck_subject: String,
    pub footer_tagline: String,
    pub title_tagline: String,
    pub established: String,
    pub heritage_heading: String,
    pub heritage_body: String,
    pub heritage_image_caption: String,
    pub sustainability_heading: String,
    pub sustainability_points: Vec<SustainabilityPoint>,
    pub collections_heading: String,
    pub contact_heading: String,
    pub contact: ContactBlock,
}

impl Default for DeckContent {
    fn default() -> Self {
        Self {
            company: "Wrap Weft & Co".to_string(),
            deck_title: "Wrap Weft & Co - Premium Textile Supplier".to_string(),
            deck_subject: "Company Overview & Collections".to_string(),
            footer_tagline: "Premium Denim & Sustainable Textiles".to_string(),
            title_tagline: "Weaving the Fabric of Modern Fashion".to_string(),
            established: "Est. 1985".to_string(),
            heritage_heading: "Our Heritage".to_string(),
            heritage_body: "Founded in 1985, Wrap Weft & Co has grown from a single shuttle loom \
                            workshop into a global leader in premium textile manufacturing. We \
                            blend traditional craftsmanship with modern innovation."
                .to_string(),
            heritage_image_caption: "Image: Vintage Loom".to_string(),
            sustainability_heading: "Sustainability Commitment".to_string(),
            sustainability_points: vec![
                SustainabilityPoint::new(
                    "Organic Materials",
                    "100% GOTS-certified organic cotton sourcing.",
                ),
                SustainabilityPoint::new(
                    "Water Stewardship",
                    "Closed-loop filtration recycling 95% of water.",
                ),
                SustainabilityPoint::new(
                    "Renewable Energy",
                    "Manufacturing facility powered by 80% solar energy.",
                ),
                SustainabilityPoint::new(
                    "Circular Economy",
                    "Repurposing pre-consumer waste into new yarns.",
                ),
            ],
            collections_heading: "Our Collections".to_string(),
            contact_heading: "Get in Touch".to_string(),
            contact: ContactBlock::default(),
        }
    }
}
