//! Input validation limits for names, relationship kinds and attributes

/// Maximum length for a person name (256 chars)
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length for a relationship kind name (64 chars)
pub const MAX_KIND_NAME_LEN: usize = 64;

/// Maximum length for a custom attribute label (64 chars)
pub const MAX_ATTRIBUTE_LABEL_LEN: usize = 64;

/// Maximum length for a single attribute value (64KB)
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 64 * 1024;

/// Person keys with a fixed meaning in the snapshot format.
///
/// Relationship kinds and custom attribute labels share the person object
/// with these, so neither may take one of these names.
pub const RESERVED_KEYS: &[&str] = &[
    "firstname",
    "lastname",
    "middle",
    "fullname",
    "bio",
    "emails",
    "links",
];

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NameTooLong { len: usize, max: usize },
    KindNameTooLong { len: usize, max: usize },
    LabelTooLong { len: usize, max: usize },
    ValueTooLong { len: usize, max: usize },
    EmptyKindName,
    EmptyLabel,
    UntrimmedKindName(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooLong { len, max } => {
                write!(f, "Name too long: {} chars (max {})", len, max)
            }
            Self::KindNameTooLong { len, max } => {
                write!(f, "Relationship name too long: {} chars (max {})", len, max)
            }
            Self::LabelTooLong { len, max } => {
                write!(f, "Attribute label too long: {} chars (max {})", len, max)
            }
            Self::ValueTooLong { len, max } => {
                write!(f, "Attribute value too long: {} chars (max {})", len, max)
            }
            Self::EmptyKindName => write!(f, "Relationship name cannot be empty"),
            Self::EmptyLabel => write!(f, "Attribute label cannot be empty"),
            Self::UntrimmedKindName(name) => write!(
                f,
                "Relationship name \"{}\" has leading or trailing whitespace",
                name
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Whether `key` is one of the fixed person keys
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Validate a raw person name before parsing
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate a relationship kind name
///
/// Reserved keys are checked by the caller, which reports them as
/// [`crate::Error::ReservedAttribute`].
pub fn validate_kind_name(kind: &str) -> Result<(), ValidationError> {
    if kind.is_empty() {
        return Err(ValidationError::EmptyKindName);
    }
    if kind.trim() != kind {
        return Err(ValidationError::UntrimmedKindName(kind.to_string()));
    }
    if kind.len() > MAX_KIND_NAME_LEN {
        return Err(ValidationError::KindNameTooLong {
            len: kind.len(),
            max: MAX_KIND_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate a custom attribute label
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.len() > MAX_ATTRIBUTE_LABEL_LEN {
        return Err(ValidationError::LabelTooLong {
            len: label.len(),
            max: MAX_ATTRIBUTE_LABEL_LEN,
        });
    }
    Ok(())
}

/// Validate an attribute value (bio, email, link or custom value)
pub fn validate_value(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_ATTRIBUTE_VALUE_LEN {
        return Err(ValidationError::ValueTooLong {
            len: value.len(),
            max: MAX_ATTRIBUTE_VALUE_LEN,
        });
    }
    Ok(())
}
