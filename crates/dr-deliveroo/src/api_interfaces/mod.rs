pub mod menu;
pub mod restaurants;

use reqwest::{header::CONTENT_TYPE, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    constants::JSON_CONTENT_TYPE,
    error::{GetError, SchemaError},
};

/// Send a GET and return the array found under `key` in the JSON envelope.
///
/// Anything but a 200 with an `application/json` body fails before the body
/// is read.
pub(crate) async fn get_envelope(
    request: RequestBuilder,
    key: &str,
) -> Result<Vec<Value>, GetError> {
    let response = request.send().await?;
    if response.status() != StatusCode::OK {
        return Err(GetError::ResponseError(response.status()));
    }
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if !content_type.as_deref().is_some_and(is_json) {
        return Err(GetError::ContentTypeError(content_type));
    }
    let body = response.text().await.map_err(GetError::ResponseBodyError)?;
    let mut root: Value = serde_json::from_str(&body)?;
    match root.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(SchemaError::MissingEnvelope(key.to_string()).into()),
    }
}

/// Decode the object elements of `items` in order, skipping everything else.
/// The first object that fails to decode fails the whole batch.
pub(crate) fn decode_objects<T: DeserializeOwned>(
    items: Vec<Value>,
    entity: &'static str,
) -> Result<Vec<T>, SchemaError> {
    Ok(decode_indexed_objects(items, entity)?
        .into_iter()
        .map(|(_, item)| item)
        .collect())
}

/// Like [`decode_objects`], paired with each object's index in `items`.
pub(crate) fn decode_indexed_objects<T: DeserializeOwned>(
    items: Vec<Value>,
    entity: &'static str,
) -> Result<Vec<(usize, T)>, SchemaError> {
    items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| item.is_object())
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map(|decoded| (index, decoded))
                .map_err(|source| SchemaError::InvalidEntity {
                    entity,
                    index,
                    source,
                })
        })
        .collect()
}

/// Compare the media type only, ignoring parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}
