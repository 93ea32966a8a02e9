//! OpenAPI 3.x normalizer
//!
//! Parses OpenAPI 3 documents into the standard data source model.
//!
//! ## Differences from Swagger 2.0
//! - Schemas live under `components.schemas`
//! - Request bodies become a single `body` parameter
//! - Response types come from the `content` of the success response,
//!   preferring `application/json`
//!
//! ## Usage
//! ```rust,ignore
//! use origin_sync_parser::swagger_v3::SwaggerV3Parser;
//!
//! let parser = SwaggerV3Parser::from_file("openapi.yaml", "petstore", true)?;
//! let data_source = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::SwaggerV3Parser;
pub use types::*;
