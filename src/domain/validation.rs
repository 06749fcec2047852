use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidUrl { field: &'static str, input: String },
    TemplateVersionOutOfRange { actual: u32 },
    UnknownVariant { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::TemplateVersionOutOfRange { actual } => {
                write!(f, "template version out of range: {actual} (expected >= 1)")
            }
            Self::UnknownVariant { field, input } => {
                write!(f, "unknown {field} value: {input}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
