//! Origin document dialects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema dialect of an origin document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginType {
    /// Swagger 2.0
    #[default]
    SwaggerV2,
    /// OpenAPI 3.x
    SwaggerV3,
}

impl OriginType {
    /// Look up an origin type by its configuration tag
    ///
    /// Tags are matched case-insensitively, with or without a separator
    /// (`SwaggerV3`, `swagger-v3` and `swagger_v3` are equivalent).
    ///
    /// # Examples
    /// ```
    /// use origin_sync_common::OriginType;
    ///
    /// assert_eq!(OriginType::from_tag("SwaggerV3"), Some(OriginType::SwaggerV3));
    /// assert_eq!(OriginType::from_tag("swagger-v2"), Some(OriginType::SwaggerV2));
    /// assert_eq!(OriginType::from_tag("foo"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "swaggerv2" => Some(OriginType::SwaggerV2),
            "swaggerv3" => Some(OriginType::SwaggerV3),
            _ => None,
        }
    }

    /// Configuration tag for this origin type
    pub fn as_tag(&self) -> &'static str {
        match self {
            OriginType::SwaggerV2 => "SwaggerV2",
            OriginType::SwaggerV3 => "SwaggerV3",
        }
    }
}

impl fmt::Display for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
