use thiserror::Error;

use super::registry::SchemeId;

/// Raised when a scheme identifier is not one of the fixed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown grading scheme '{name}' (expected one of: {expected})", expected = SchemeId::label_list())]
pub struct UnknownSchemeError {
    pub name: String,
}

impl UnknownSchemeError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_scheme_and_choices() {
        let err = UnknownSchemeError::new("MIT");
        let msg = err.to_string();
        assert!(msg.contains("'MIT'"));
        assert!(msg.contains("BRAC/NSU, NWU, Public, US"));
    }
}
