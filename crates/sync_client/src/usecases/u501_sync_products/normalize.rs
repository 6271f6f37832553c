use contracts::shared::product_record::ProductRecord;
use contracts::usecases::u501_sync_products::NormalizedProduct;
use serde_json::Value;

/// Привести запись файла к фиксированной форме товара для `POST /sync-products`.
///
/// Только для пути отправки MANUAL_FILE_UPLOAD; предпросмотр показывает сырые поля.
pub fn normalize_record(record: &ProductRecord) -> NormalizedProduct {
    NormalizedProduct {
        product_id: text(record, &["product_id", "id"]),
        product_name: text(record, &["product_name", "title"]),
        description: text(record, &["description"]),
        price: record.get_f64("price").unwrap_or(0.0),
        category: text(record, &["category"]),
        tags: normalize_tags(record.get("tags")),
        in_stock: record.get_bool("in_stock").unwrap_or(false),
        image_url: text(record, &["image_url"]),
    }
}

pub fn normalize_records(records: &[ProductRecord]) -> Vec<NormalizedProduct> {
    records.iter().map(normalize_record).collect()
}

fn text(record: &ProductRecord, keys: &[&str]) -> String {
    record.first_str(keys).unwrap_or_default()
}

/// Теги: JSON-массив или строка через запятую
fn normalize_tags(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.to_string()],
    };

    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
