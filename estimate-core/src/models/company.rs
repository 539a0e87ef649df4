use serde::{Deserialize, Serialize};

/// Company details stamped onto rendered quotes.
///
/// The `Default` impl carries the built-in profile used whenever no
/// bootstrap data is available, so quotes are always printable offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub additional_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub warranty: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "PotolokForLife".to_string(),
            full_name: "Stretch ceilings for life".to_string(),
            address: "Moscow region, Pushkino".to_string(),
            phone: "8(977)531-10-99".to_string(),
            additional_phone: "8(977)709-38-43".to_string(),
            email: "potolokforlife@yandex.ru".to_string(),
            payment_terms: "1. 50% prepayment no later than 3 days before the planned \
                            first-stage installation date.\n\
                            2. The remaining 50% is due on the day all work is completed.\n\
                            Materials are paid 100% up front."
                .to_string(),
            warranty: "5-year warranty on materials and workmanship".to_string(),
        }
    }
}
