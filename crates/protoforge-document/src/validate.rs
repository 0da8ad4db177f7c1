use crate::Prototype;

/// Outcome of the pre-save check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

impl Validation {
    fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

pub fn validate(proto: &Prototype) -> Validation {
    if proto.id.trim().is_empty() {
        return Validation::invalid("Prototype ID is required.");
    }
    if proto.kind.trim().is_empty() {
        return Validation::invalid("Prototype type is required.");
    }
    Validation {
        valid: true,
        message: "Prototype is valid.".to_string(),
    }
}
