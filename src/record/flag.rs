use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Database action tag carried alongside each demand offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrudFlag {
    Create,
    Update,
    Delete,
    None,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown CRUD flag tag {0:?}")]
pub struct UnknownFlag(pub String);

impl CrudFlag {
    pub const ALL: [CrudFlag; 4] = [Self::Create, Self::Update, Self::Delete, Self::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for CrudFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrudFlag {
    type Err = UnknownFlag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str() == tag)
            .ok_or_else(|| UnknownFlag(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_back() {
        for flag in CrudFlag::ALL {
            assert_eq!(flag.as_str().parse::<CrudFlag>().unwrap(), flag);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(
            "create".parse::<CrudFlag>(),
            Err(UnknownFlag("create".to_string()))
        );
    }
}
