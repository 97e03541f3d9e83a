//! # Rutas
//!
//! Tipos que describen una ruta antes de registrarla en el router:
//!
//! - [`RouteDescriptor`]: ruta simple (páginas, endpoints internos)
//! - [`ApiRouteDescriptor`]: ruta de API con documentación OpenAPI y path
//!   normalizado
//! - [`RouteVariant`]: contenedor que guarda cualquiera de las dos

pub mod api;
pub mod descriptor;
pub mod openapi;
pub mod variant;

pub use api::{normalize_api_path, ApiDocumentation, ApiRouteDescriptor};
pub use descriptor::{Handler, RouteDescriptor, DEFAULT_CONTENT_TYPE};
pub use variant::RouteVariant;
