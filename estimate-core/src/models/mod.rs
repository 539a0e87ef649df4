mod catalog;
mod company;
mod estimate;
mod line_item;
mod status;
mod template;

pub use catalog::{CatalogEntry, CatalogItem, Category};
pub use company::CompanyProfile;
pub use estimate::Estimate;
pub use line_item::{LineItem, Unit};
pub use status::EstimateStatus;
pub use template::{Template, TemplateItem};

/// Generates a fresh record id.
///
/// Ids are opaque strings as far as the store is concerned; v4 UUIDs are
/// simply a collision-safe way to mint them without any coordination.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
