use std::collections::BTreeMap;

use crate::response::{ResponseStatus, STATUS_ATTRIBUTE_EXCEPTIONS, STATUS_ATTRIBUTE_STACK_TRACE};
use crate::status::ResponseStatusCode;

/// Structured context a server attaches to a response status.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A request the server executed and reported as failed.
///
/// Every diagnostic field is independently optional. `None` means the server
/// did not say; `Some` of an empty collection means it said there was nothing.
/// The value is read-only once built: accessors only lend borrowed views, so a
/// caller that wants to edit a field works on its own copy.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct RemoteFailure {
    status_code: ResponseStatusCode,
    message: String,
    exception_hierarchy: Option<Vec<String>>,
    stack_trace: Option<String>,
    attributes: Option<Attributes>,
}

impl RemoteFailure {
    pub fn new(status_code: ResponseStatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            exception_hierarchy: None,
            stack_trace: None,
            attributes: None,
        }
    }

    pub fn from_parts(
        status_code: ResponseStatusCode,
        message: impl Into<String>,
        exception_hierarchy: Option<Vec<String>>,
        stack_trace: Option<String>,
        attributes: Option<Attributes>,
    ) -> Self {
        Self {
            status_code,
            message: message.into(),
            exception_hierarchy,
            stack_trace,
            attributes,
        }
    }

    pub fn with_exception_hierarchy<I, S>(mut self, hierarchy: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exception_hierarchy = Some(hierarchy.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Builds the failure from a response status.
    ///
    /// The exception hierarchy and stack trace travel as the `exceptions` and
    /// `stackTrace` status attributes. They are moved out of the attribute map
    /// when well-formed and dropped when `null`. If nothing else was reported
    /// the attributes end up absent; a map the server sent empty stays present
    /// and empty.
    pub fn from_status(status: ResponseStatus) -> Self {
        let ResponseStatus {
            code,
            message,
            attributes,
        } = status;

        let Some(mut attributes) = attributes else {
            return Self::new(code, message);
        };

        let mut extracted = false;
        for key in [STATUS_ATTRIBUTE_EXCEPTIONS, STATUS_ATTRIBUTE_STACK_TRACE] {
            if attributes.get(key).is_some_and(serde_json::Value::is_null) {
                attributes.remove(key);
                extracted = true;
            }
        }
        let exception_hierarchy = take_string_list(&mut attributes, STATUS_ATTRIBUTE_EXCEPTIONS);
        let stack_trace = take_string(&mut attributes, STATUS_ATTRIBUTE_STACK_TRACE);
        let extracted = extracted || exception_hierarchy.is_some() || stack_trace.is_some();
        let attributes = if extracted && attributes.is_empty() {
            None
        } else {
            Some(attributes)
        };

        tracing::debug!(
            status = %code,
            has_hierarchy = exception_hierarchy.is_some(),
            has_stack_trace = stack_trace.is_some(),
            has_attributes = attributes.is_some(),
            "server reported failure"
        );

        Self {
            status_code: code,
            message,
            exception_hierarchy,
            stack_trace,
            attributes,
        }
    }

    pub fn status_code(&self) -> ResponseStatusCode {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Remote exception class names, outermost first. Each entry's cause is
    /// the entry after it.
    pub fn exception_hierarchy(&self) -> Option<&[String]> {
        self.exception_hierarchy.as_deref()
    }

    /// The stack trace text produced by the server.
    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    /// Innermost reported exception, the last entry of the hierarchy.
    pub fn root_cause(&self) -> Option<&str> {
        self.exception_hierarchy
            .as_ref()
            .and_then(|h| h.last())
            .map(String::as_str)
    }
}

fn take_string_list(attributes: &mut Attributes, key: &str) -> Option<Vec<String>> {
    let list = attributes
        .get(key)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect::<Option<Vec<_>>>()?;
    attributes.remove(key);
    Some(list)
}

fn take_string(attributes: &mut Attributes, key: &str) -> Option<String> {
    let text = attributes.get(key)?.as_str()?.to_string();
    attributes.remove(key);
    Some(text)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use serde_json::json;

    fn hierarchy() -> Vec<String> {
        vec![
            "ConstraintException".to_string(),
            "IllegalStateException".to_string(),
        ]
    }

    fn status(attributes: Option<serde_json::Value>) -> ResponseStatus {
        ResponseStatus {
            code: ResponseStatusCode::ServerError,
            message: "constraint violated".to_string(),
            attributes: attributes.map(|v| serde_json::from_value(v).unwrap()),
        }
    }

    #[test]
    fn status_and_message_only_leaves_everything_absent() {
        let failure = RemoteFailure::new(ResponseStatusCode::ServerError, "boom");
        assert_eq!(failure.status_code(), ResponseStatusCode::ServerError);
        assert_eq!(failure.message(), "boom");
        assert_eq!(failure.to_string(), "boom");
        assert_eq!(failure.exception_hierarchy(), None);
        assert_eq!(failure.stack_trace(), None);
        assert_eq!(failure.attributes(), None);
        assert_eq!(failure.root_cause(), None);
    }

    #[test]
    fn all_fields_are_exposed_unmodified() {
        let attributes: Attributes =
            [("retryAfterMs".to_string(), json!(250))].into_iter().collect();
        let failure = RemoteFailure::from_parts(
            ResponseStatusCode::ServerErrorTemporary,
            "try again",
            Some(hierarchy()),
            Some("at Foo.bar(Foo.java:1)".to_string()),
            Some(attributes.clone()),
        );
        assert_eq!(failure.status_code(), ResponseStatusCode::ServerErrorTemporary);
        assert_eq!(failure.exception_hierarchy(), Some(hierarchy().as_slice()));
        assert_eq!(failure.stack_trace(), Some("at Foo.bar(Foo.java:1)"));
        assert_eq!(failure.attributes(), Some(&attributes));
        assert_eq!(failure.root_cause(), Some("IllegalStateException"));
    }

    #[test]
    fn optional_fields_are_independent() {
        let only_trace =
            RemoteFailure::new(ResponseStatusCode::ServerError, "x").with_stack_trace("trace");
        assert_eq!(only_trace.stack_trace(), Some("trace"));
        assert_eq!(only_trace.exception_hierarchy(), None);
        assert_eq!(only_trace.attributes(), None);

        let only_attributes = RemoteFailure::new(ResponseStatusCode::ServerError, "x")
            .with_attributes(Attributes::new());
        assert_eq!(only_attributes.attributes(), Some(&Attributes::new()));
        assert_eq!(only_attributes.stack_trace(), None);
    }

    #[test]
    fn empty_hierarchy_is_not_absent() {
        let failure = RemoteFailure::new(ResponseStatusCode::ServerError, "x")
            .with_exception_hierarchy(Vec::<String>::new());
        assert_eq!(failure.exception_hierarchy(), Some(&[][..]));
        assert_eq!(failure.root_cause(), None);
    }

    #[test]
    fn editing_a_copy_does_not_touch_the_failure() {
        let failure = RemoteFailure::new(ResponseStatusCode::ServerError, "x")
            .with_exception_hierarchy(hierarchy())
            .with_attributes([("k".to_string(), json!("v"))].into_iter().collect());

        let mut chain = failure.exception_hierarchy().unwrap().to_vec();
        chain.push("InjectedException".to_string());
        let mut attributes = failure.attributes().unwrap().clone();
        attributes.insert("injected".to_string(), json!(true));

        assert_eq!(failure.exception_hierarchy(), Some(hierarchy().as_slice()));
        assert_eq!(failure.attributes().unwrap().len(), 1);
        assert!(!failure.attributes().unwrap().contains_key("injected"));
    }

    #[test]
    fn from_status_without_attributes() {
        let failure = RemoteFailure::from_status(status(None));
        assert_eq!(failure.message(), "constraint violated");
        assert_eq!(failure.exception_hierarchy(), None);
        assert_eq!(failure.stack_trace(), None);
        assert_eq!(failure.attributes(), None);
    }

    #[test]
    fn from_status_moves_diagnostics_out_of_attributes() {
        let failure = RemoteFailure::from_status(status(Some(json!({
            "exceptions": ["ConstraintException", "IllegalStateException"],
            "stackTrace": "java.lang.IllegalStateException\n\tat ..."
        }))));
        assert_eq!(failure.exception_hierarchy(), Some(hierarchy().as_slice()));
        assert_eq!(
            failure.stack_trace(),
            Some("java.lang.IllegalStateException\n\tat ...")
        );
        assert_eq!(failure.attributes(), None);
    }

    #[test]
    fn from_status_keeps_other_attributes() {
        let failure = RemoteFailure::from_status(status(Some(json!({
            "exceptions": ["ConstraintException"],
            "parameter": "age"
        }))));
        assert_eq!(
            failure.exception_hierarchy(),
            Some(&["ConstraintException".to_string()][..])
        );
        let attributes = failure.attributes().unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("parameter"), Some(&json!("age")));
    }

    #[test]
    fn from_status_keeps_an_explicitly_empty_map() {
        let failure = RemoteFailure::from_status(status(Some(json!({}))));
        assert_eq!(failure.attributes(), Some(&Attributes::new()));
    }

    #[test]
    fn from_status_treats_null_diagnostics_as_absent() {
        let failure = RemoteFailure::from_status(status(Some(json!({
            "exceptions": ["ConstraintException"],
            "stackTrace": null
        }))));
        assert_eq!(
            failure.exception_hierarchy(),
            Some(&["ConstraintException".to_string()][..])
        );
        assert_eq!(failure.stack_trace(), None);
        assert_eq!(failure.attributes(), None);

        let failure = RemoteFailure::from_status(status(Some(json!({
            "exceptions": null,
            "stackTrace": null,
            "parameter": "age"
        }))));
        assert_eq!(failure.exception_hierarchy(), None);
        assert_eq!(failure.stack_trace(), None);
        let attributes = failure.attributes().unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("parameter"), Some(&json!("age")));
    }

    #[test]
    fn from_status_leaves_malformed_diagnostics_in_place() {
        let failure = RemoteFailure::from_status(status(Some(json!({
            "exceptions": ["ok", 7],
            "stackTrace": 12
        }))));
        assert_eq!(failure.exception_hierarchy(), None);
        assert_eq!(failure.stack_trace(), None);
        let attributes = failure.attributes().unwrap();
        assert_eq!(attributes.get("exceptions"), Some(&json!(["ok", 7])));
        assert_eq!(attributes.get("stackTrace"), Some(&json!(12)));
    }
}
