use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: String) -> Self {
                Self(id)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(SessionId);

define_id!(Nickname);

pub const MAX_NICKNAME_LENGTH: usize = 50;

impl Nickname {
    /// Trims surrounding whitespace and checks the length limit.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Nickname cannot be empty".to_string());
        }
        if trimmed.chars().count() > MAX_NICKNAME_LENGTH {
            return Err(format!(
                "Nickname cannot be longer than {} characters",
                MAX_NICKNAME_LENGTH
            ));
        }
        if trimmed.chars().any(char::is_control) {
            return Err("Nickname cannot contain control characters".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}
