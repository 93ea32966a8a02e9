//! Swagger 2.0 normalizer
//!
//! Parses Swagger 2.0 documents into the standard data source model.
//!
//! ## Sources
//! - springfox / SpringDoc services: `GET /v2/api-docs`
//! - Go swag: `docs/swagger.json`
//! - Any hand-written Swagger 2.0 document, JSON or YAML
//!
//! ## Usage
//! ```rust,ignore
//! use origin_sync_parser::swagger_v2::SwaggerV2Parser;
//!
//! let parser = SwaggerV2Parser::from_file("petstore.json", "petstore", true)?;
//! let data_source = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::SwaggerV2Parser;
pub use types::*;
