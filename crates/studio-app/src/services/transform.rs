//! Application model to gateway route transformation

use serde_json::{json, Map, Value};
use studio_core::{AppModel, CaptureDirection};
use thiserror::Error;
use url::Url;

/// Failure to turn an application into a route
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    /// Notification key describing the failure, when the transformer has one
    pub error_type: Option<String>,
    pub message: String,
}

impl TransformError {
    pub fn new(error_type: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.map(str::to_string),
            message: message.into(),
        }
    }
}

impl From<TransformError> for studio_core::Error {
    fn from(err: TransformError) -> Self {
        studio_core::Error::transform(
            err.error_type.unwrap_or_else(|| "modelTransformationFailed".to_string()),
            err.message,
        )
    }
}

/// Converts an application model into deployable route JSON
pub trait RouteTransformer: Send + Sync {
    fn transform_application(&self, app: &AppModel) -> Result<Value, TransformError>;
}

/// Builds a chain route: filters in application order, then a client handler
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransformer;

impl DefaultTransformer {
    fn capture_value(direction: &CaptureDirection) -> Option<Value> {
        let kinds = direction.captured_kinds();
        (!kinds.is_empty()).then(|| json!(kinds))
    }
}

impl RouteTransformer for DefaultTransformer {
    fn transform_application(&self, app: &AppModel) -> Result<Value, TransformError> {
        if app.name().trim().is_empty() {
            return Err(TransformError::new(
                Some("missingName"),
                format!("Application '{}' has no name", app.id),
            ));
        }

        let mut filters = Vec::with_capacity(app.content.filters.len());
        for (idx, filter) in app.content.filters.iter().enumerate() {
            if filter.filter_type.is_none() {
                return Err(TransformError::new(
                    Some("missingFilterType"),
                    format!("Filter #{} of '{}' has no type", idx + 1, app.id),
                ));
            }
            filters.push(serde_json::to_value(filter).map_err(|e| {
                TransformError::new(None, format!("Filter #{}: {}", idx + 1, e))
            })?);
        }

        let capture = app.capture();
        let client_handler = match Self::capture_value(&capture.outbound) {
            Some(kinds) => json!({ "type": "ClientHandler", "capture": kinds }),
            None => json!("ClientHandler"),
        };

        let mut route = Map::new();
        route.insert("name".into(), json!(app.id.as_str()));
        if let Some(url) = &app.content.url {
            let parsed = Url::parse(url).map_err(|e| {
                TransformError::new(None, format!("Invalid base URI '{}': {}", url, e))
            })?;
            route.insert("baseURI".into(), json!(parsed.as_str()));
        }
        if let Some(condition) = &app.content.condition {
            route.insert("condition".into(), json!(condition));
        }
        if let Some(kinds) = Self::capture_value(&capture.inbound) {
            route.insert("capture".into(), kinds);
        }
        route.insert(
            "handler".into(),
            json!({
                "type": "Chain",
                "config": {
                    "filters": filters,
                    "handler": client_handler,
                }
            }),
        );

        Ok(Value::Object(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::{CaptureConfig, FilterEntry};

    #[test]
    fn test_minimal_route() {
        let app = AppModel::new("petstore", "Pet Store");
        let route = DefaultTransformer.transform_application(&app).unwrap();

        assert_eq!(
            route,
            json!({
                "name": "petstore",
                "handler": {
                    "type": "Chain",
                    "config": {"filters": [], "handler": "ClientHandler"}
                }
            })
        );
    }

    #[test]
    fn test_full_route() {
        let mut app = AppModel::new("petstore", "Pet Store");
        app.content.url = Some("http://petstore:8080".into());
        app.content.condition = Some("${matches(request.uri.path, '^/pets')}".into());
        app.content.filters = vec![FilterEntry::new("ThrottlingFilter")
            .with("rate", json!({"numberOfRequests": 60, "duration": "1 m"}))];
        app.content.capture = Some(CaptureConfig::from_flags([true, true, false, true]));

        let route = DefaultTransformer.transform_application(&app).unwrap();

        assert_eq!(route["baseURI"], json!("http://petstore:8080/"));
        assert_eq!(route["condition"], json!("${matches(request.uri.path, '^/pets')}"));
        assert_eq!(route["capture"], json!(["request", "response"]));
        let chain = &route["handler"]["config"];
        assert_eq!(chain["filters"][0]["type"], json!("ThrottlingFilter"));
        assert_eq!(chain["filters"][0]["rate"]["numberOfRequests"], json!(60));
        assert_eq!(
            chain["handler"],
            json!({"type": "ClientHandler", "capture": ["response"]})
        );
    }

    #[test]
    fn test_missing_name_is_typed_error() {
        let app = AppModel::new("a1", "  ");
        let err = DefaultTransformer.transform_application(&app).unwrap_err();
        assert_eq!(err.error_type.as_deref(), Some("missingName"));
    }

    #[test]
    fn test_untyped_filter_is_rejected() {
        let mut app = AppModel::new("a1", "One");
        app.content.filters = vec![FilterEntry {
            filter_type: None,
            config: Map::new(),
        }];
        let err = DefaultTransformer.transform_application(&app).unwrap_err();
        assert_eq!(err.error_type.as_deref(), Some("missingFilterType"));
    }

    #[test]
    fn test_invalid_url_has_no_error_type() {
        let mut app = AppModel::new("a1", "One");
        app.content.url = Some("not a url".into());
        let err = DefaultTransformer.transform_application(&app).unwrap_err();
        assert!(err.error_type.is_none());
        assert!(err.message.contains("not a url"));
    }

    #[test]
    fn test_into_core_error_uses_fallback_key() {
        let err: studio_core::Error = TransformError::new(None, "boom").into();
        assert!(matches!(
            err,
            studio_core::Error::Transform { ref error_type, .. } if error_type == "modelTransformationFailed"
        ));
    }
}
