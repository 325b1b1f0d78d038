use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Continuation field carried by paged directory collections.
pub(super) const NEXT_LINK_FIELD: &str = "@odata.nextLink";

/// One decoded page of a directory collection.
#[derive(Debug)]
pub(super) struct CollectionPage<T> {
    pub(super) value: Vec<T>,
    pub(super) next_link: Option<String>,
}

impl<T: DeserializeOwned> CollectionPage<T> {
    /// Decodes a page leniently.
    ///
    /// A missing or non-array `value` yields no records, and elements that
    /// do not decode are skipped. A null or non-string next link ends paging.
    pub(super) fn from_payload(payload: Value) -> Self {
        let Value::Object(mut fields) = payload else {
            warn!("directory response is not an object, treating as empty");
            return Self::empty();
        };

        let next_link = fields
            .remove(NEXT_LINK_FIELD)
            .and_then(|link| link.as_str().map(ToOwned::to_owned))
            .filter(|link| !link.is_empty());

        let value = match fields.remove("value") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<T>(item) {
                    Ok(record) => Some(record),
                    Err(error) => {
                        warn!(%error, "skipping malformed directory record");
                        None
                    }
                })
                .collect(),
            Some(_) => {
                warn!("directory response 'value' is not an array, treating as empty");
                Vec::new()
            }
            None => Vec::new(),
        };

        Self { value, next_link }
    }

    fn empty() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
        }
    }
}
