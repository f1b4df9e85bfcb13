//! Catalog entities managed from the admin back office and browsed per service vertical

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Service vertical a [Service] belongs to. The server tags every service with one of these
/// values; a tag outside this set is a decoding error rather than a silent fallback bucket.
#[derive(
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    AsRefStr,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Copy,
    Clone,
)]
pub enum ServiceCategory {
    /// Automotive workshop services
    #[serde(rename = "bengkel")]
    #[strum(serialize = "bengkel")]
    Bengkel,
    /// Psychology consultations
    #[serde(rename = "psikologi")]
    #[strum(serialize = "psikologi")]
    Psikologi,
    /// Home and errand services
    #[serde(rename = "opo-wae")]
    #[strum(serialize = "opo-wae")]
    OpoWae,
}

/// Editable fields of a [Service]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Bookable service ("layanan")
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i64,
    #[serde(flatten)]
    pub details: ServiceDraft,
}

/// Editable fields of a [Product]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub workshop_id: Option<i64>,
}

/// Spare part or item sold alongside workshop services
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(flatten)]
    pub details: ProductDraft,
}

/// Editable fields of a [Duration]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DurationDraft {
    pub label: String,
    pub minutes: u32,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Consultation length option ("durasi")
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Duration {
    pub id: i64,
    #[serde(flatten)]
    pub details: DurationDraft,
}

/// Editable fields of a [Doctor]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DoctorDraft {
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

/// Psychologist or other provider a consultation can be booked with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: i64,
    #[serde(flatten)]
    pub details: DoctorDraft,
}

/// Editable fields of a [Workshop]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkshopDraft {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub open_hours: Option<String>,
}

/// Partner automotive workshop ("bengkel")
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workshop {
    pub id: i64,
    #[serde(flatten)]
    pub details: WorkshopDraft,
}

/// Serde default for [DoctorDraft::available]
const fn available_by_default() -> bool {
    true
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::{Doctor, Service, ServiceCategory};

    #[test]
    fn service_should_parse_flattened_details() {
        let service: Service = serde_json::from_value(json!({
            "id": 3,
            "name": "Ganti Oli",
            "category": "bengkel",
            "price": 75000.0
        }))
        .expect("Service should parse");

        assert_eq!(service.id, 3);
        assert_eq!(service.details.category, ServiceCategory::Bengkel);
        assert_eq!(service.details.price, Some(75000.0));
        assert!(service.details.description.is_none());
    }

    #[rstest]
    #[case("other")]
    #[case("Bengkel Motor")]
    #[case("")]
    fn service_should_reject_unknown_category(#[case] category: &str) {
        let result = serde_json::from_value::<Service>(json!({
            "id": 1,
            "name": "Cuci Motor",
            "category": category
        }));

        assert!(result.is_err(), "Category {category:?} should not decode");
    }

    #[test]
    fn category_tags_should_be_stable() {
        let tags: Vec<&'static str> = ServiceCategory::iter().map(Into::into).collect();
        assert_eq!(tags, ["bengkel", "psikologi", "opo-wae"]);
    }

    #[test]
    fn doctor_should_default_to_available() {
        let doctor: Doctor =
            serde_json::from_value(json!({ "id": 2, "name": "Dr. Ayu" })).expect("Doctor should parse");
        assert!(doctor.details.available);
    }
}
