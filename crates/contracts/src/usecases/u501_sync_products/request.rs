use serde::{Deserialize, Serialize};

use crate::domain::a001_data_source::SourceConfig;
use crate::shared::product_record::ProductRecord;

/// Тело запроса `POST /sync-products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSyncInput {
    pub source_config: SourceConfig,

    /// Только для MANUAL_FILE_UPLOAD и SUPERSEARCH_API, остальные источники
    /// забирают данные на стороне сервера
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductRecord>>,
}

/// Товар в фиксированной форме, которую ожидает endpoint синхронизации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub product_id: String,
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub image_url: String,
}

impl NormalizedProduct {
    /// Перевести в открытую запись для передачи в `ProductSyncInput`
    pub fn into_record(self) -> ProductRecord {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => ProductRecord::from_map(map),
            _ => ProductRecord::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_data_source::{FileFormat, SourceSettings, SyncSchedule};
    use serde_json::json;

    #[test]
    fn test_products_omitted_when_absent() {
        let input = ProductSyncInput {
            source_config: SourceConfig::new(SourceSettings::SupersearchApi, SyncSchedule::Manual),
            products: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("products").is_none());
        assert_eq!(value["source_config"]["source"], "SUPERSEARCH_API");
    }

    #[test]
    fn test_normalized_product_into_record() {
        let product = NormalizedProduct {
            product_id: "P1".into(),
            product_name: "Widget".into(),
            description: String::new(),
            price: 9.99,
            category: "tools".into(),
            tags: vec!["new".into()],
            in_stock: true,
            image_url: String::new(),
        };
        let input = ProductSyncInput {
            source_config: SourceConfig::new(
                SourceSettings::ManualFileUpload {
                    file_format: FileFormat::Csv,
                },
                SyncSchedule::Manual,
            ),
            products: Some(vec![product.into_record()]),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["products"][0]["product_id"], "P1");
        assert_eq!(value["products"][0]["price"], json!(9.99));
        assert_eq!(value["products"][0]["tags"], json!(["new"]));
    }
}
