use serde::Deserialize;
use std::fmt;

/// Error payload the Resource Manager API attaches to failed calls and to
/// failed long-running operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ArmError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for ArmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "unspecified error"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArmErrorResponse {
    pub error: Option<ArmError>,
}

#[cfg(test)]
mod tests {
    use super::ArmErrorResponse;

    #[test]
    fn renders_code_and_message() {
        let response: ArmErrorResponse = serde_json::from_str(
            r#"{"error": {"code": "ResourceGroupNotFound", "message": "Resource group 'rg' could not be found."}}"#,
        )
        .unwrap();

        assert_eq!(
            response.error.unwrap().to_string(),
            "ResourceGroupNotFound: Resource group 'rg' could not be found."
        );
    }
}
