//! # Módulo HTTP
//!
//! Vocabulario de request/response compartido por los handlers, sin importar
//! qué servidor HTTP (polling o basado en eventos) recibió la petición.
//!
//! - Modelo de request con parsing de query strings, formularios y JSON
//! - Modelo de response con cuatro modos de contenido excluyentes
//! - Métodos y códigos de estado
//! - Codificación urlencoded
//!
//! ## Flujo
//!
//! ```text
//! adaptador → Request (parse_request_body) → router → handler(&mut Request, &mut Response)
//!           ← Response (content_mode)      ←
//! ```
//!
//! El framing del protocolo (status line, headers en el cable) es
//! responsabilidad del adaptador; aquí solo se preparan los datos.

pub mod headers; // Headers que los adaptadores deben recolectar
pub mod method; // Métodos HTTP
pub mod request; // Modelo de request y parsing de contenido
pub mod response; // Modelo de response y modos de contenido
pub mod status; // Códigos de estado HTTP
pub mod urlencoded; // Decodificación/codificación de URLs

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use method::{Method, ParseMethodError};
pub use request::Request;
pub use response::{Content, ContentMode, Response, StorageStream};
pub use status::StatusCode;
