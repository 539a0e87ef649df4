//! Built-in catalog, templates and company profile.
//!
//! These are what an empty installation is seeded with, so the application
//! is usable with no network access and no prior data. Ids are fixed
//! strings on purpose: reseeding a wiped collection recreates the same
//! records instead of minting new ones.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{CatalogEntry, CatalogItem, Category, Template, TemplateItem, Unit};

const CATEGORY_CORE: &str = "Core works";
const CATEGORY_ELECTRICAL: &str = "Electrical works";
const CATEGORY_ADDITIONAL: &str = "Additional works";

fn seed_timestamp() -> DateTime<Utc> {
    // Fixed epoch for seeded records; anything user-created gets a real
    // timestamp via CatalogItem::new.
    DateTime::<Utc>::UNIX_EPOCH
}

fn seed_item(id: &str, name: &str, unit: Unit, price: u32, category: &str) -> CatalogEntry {
    CatalogEntry::Item(CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        unit,
        price: Decimal::from(price),
        category: Some(category.to_string()),
        created_at: seed_timestamp(),
    })
}

fn seed_category(id: &str, name: &str, sort_order: i32) -> CatalogEntry {
    CatalogEntry::Category(Category {
        id: id.to_string(),
        name: name.to_string(),
        sort_order,
    })
}

/// The default catalog: three categories and the stock price list.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        seed_category("cat-core", CATEGORY_CORE, 0),
        seed_category("cat-electrical", CATEGORY_ELECTRICAL, 1),
        seed_category("cat-additional", CATEGORY_ADDITIONAL, 2),
        seed_item(
            "item-1",
            "MSD Premium white matte sheet, installed",
            Unit::SquareMeter,
            610,
            CATEGORY_CORE,
        ),
        seed_item(
            "item-2",
            "Harpoon wall/ceiling profile, installed",
            Unit::LinearMeter,
            310,
            CATEGORY_CORE,
        ),
        seed_item(
            "item-3",
            "Harpoon perimeter insert",
            Unit::LinearMeter,
            220,
            CATEGORY_CORE,
        ),
        seed_item(
            "item-4",
            "Mounting block and spotlight installation",
            Unit::Piece,
            780,
            CATEGORY_ELECTRICAL,
        ),
        seed_item(
            "item-5",
            "Mounting block and twin spotlight installation",
            Unit::Piece,
            1350,
            CATEGORY_ELECTRICAL,
        ),
        seed_item(
            "item-6",
            "Chandelier mounting block",
            Unit::Piece,
            1100,
            CATEGORY_ELECTRICAL,
        ),
        seed_item(
            "item-7",
            "Ceiling fan mounting block and installation",
            Unit::Piece,
            1300,
            CATEGORY_ELECTRICAL,
        ),
        seed_item(
            "item-8",
            "Curtain rail mounting block",
            Unit::LinearMeter,
            650,
            CATEGORY_ADDITIONAL,
        ),
        seed_item(
            "item-9",
            "Curtain rail installation",
            Unit::LinearMeter,
            270,
            CATEGORY_ADDITIONAL,
        ),
        seed_item(
            "item-10",
            "Divider installation",
            Unit::LinearMeter,
            1700,
            CATEGORY_ADDITIONAL,
        ),
    ]
}

fn template_item(name: &str, unit: Unit, price: u32) -> TemplateItem {
    TemplateItem {
        name: name.to_string(),
        unit,
        price: Decimal::from(price),
    }
}

/// The default templates: the basic harpoon package and its +10% variant.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: "template-harpoon".to_string(),
            name: "Harpoon (basic)".to_string(),
            category: "Ceilings".to_string(),
            items: vec![
                template_item(
                    "MSD Premium white matte sheet, installed",
                    Unit::SquareMeter,
                    610,
                ),
                template_item("Harpoon wall/ceiling profile, installed", Unit::LinearMeter, 310),
                template_item("Harpoon perimeter insert", Unit::LinearMeter, 220),
            ],
        },
        Template {
            id: "template-harpoon-plus".to_string(),
            name: "Harpoon +10%".to_string(),
            category: "Ceilings".to_string(),
            items: vec![
                template_item(
                    "MSD Premium white matte sheet, installed",
                    Unit::SquareMeter,
                    670,
                ),
                template_item("Harpoon wall/ceiling profile, installed", Unit::LinearMeter, 340),
                template_item("Harpoon perimeter insert", Unit::LinearMeter, 240),
            ],
        },
    ]
}
