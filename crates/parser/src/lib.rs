//! Origin document normalizers
//!
//! This crate turns origin documents into the format-independent
//! [`StandardDataSource`](origin_sync_common::StandardDataSource) model.
//!
//! ## Supported Dialects
//! - **Swagger 2.0**: [`SwaggerV2Parser`] reads `definitions`, `paths` and
//!   top-level `tags`
//! - **OpenAPI 3.x**: [`SwaggerV3Parser`] reads `components.schemas`,
//!   `paths`, request bodies and response content
//!
//! Both normalizers share the same schema conversion and interface naming
//! rules, so a document described in either dialect yields the same model.
//!
//! ## Interface Naming
//! - With `using_operation_id`, an operation's `operationId` becomes the
//!   interface name (a springfox `UsingGET` suffix is dropped)
//! - Otherwise the name is derived from the method and path:
//!   `GET /pet/{petId}` → `getPetByPetId`
//! - Duplicate names inside one mod get numeric suffixes

mod builder;
mod naming;
mod schema;
pub mod swagger_v2;
pub mod swagger_v3;

pub use naming::{GenericName, NameMapper};
pub use schema::{AdditionalProperties, Schema, SchemaType};
pub use swagger_v2::SwaggerV2Parser;
pub use swagger_v3::SwaggerV3Parser;
