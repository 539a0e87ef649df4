//! Data movement around the estimate store: JSON export/import, CSV
//! price-list loading, and the startup bootstrap file.

pub mod bootstrap;
pub mod export;
pub mod import;
pub mod price_list;

pub use bootstrap::{BootstrapData, BootstrapError};
pub use export::{ExportDocument, ExportError, ExportPayload};
pub use import::{ImportError, ImportReport, import_json};
pub use price_list::{PriceListError, PriceListLoader, PriceListRecord};
