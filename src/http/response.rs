//! # Modelo de Response
//!
//! El handler escribe directamente en un [`Response`]; el adaptador HTTP lo
//! lee después y decide cómo emitir los bytes según el modo de contenido.
//!
//! ## Modos de contenido
//!
//! ```text
//! Normal   -> buffer propio (String)
//! Progmem  -> datos constantes residentes en firmware (&'static, sin copia)
//! Json     -> el llamador producirá un documento JSON tras esta llamada
//! Storage  -> bytes en almacenamiento externo: (colección, clave, driver)
//! ```
//!
//! Solo un modo está activo a la vez: activar uno descarta el payload de
//! los otros tres.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use web_platform_core::http::{ContentMode, Response};
//!
//! let mut response = Response::new();
//! response.set_content(r#"{"ok": true}"#, "application/json");
//! response.set_header("Cache-Control", "no-cache");
//!
//! assert_eq!(response.content_mode(), ContentMode::Normal);
//!
//! response.set_json_content();
//! assert_eq!(response.content(), "");
//! ```

use super::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// MIME type de un response recién creado
pub const DEFAULT_MIME_TYPE: &str = "text/html";

/// Etiqueta del modo de contenido activo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    Normal,
    Progmem,
    Json,
    Storage,
}

/// Referencia a bytes guardados en un almacenamiento externo
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageStream {
    pub collection: String,
    pub key: String,
    /// Driver de almacenamiento (`""` = driver por defecto)
    pub driver_name: String,
}

/// Payload del response, uno por modo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Buffer propio
    Normal(String),

    /// Datos constantes del llamador; nunca se copian ni se liberan aquí
    Progmem(&'static [u8]),

    /// El documento lo produce el llamador; aquí no se guarda nada
    Json,

    Storage(StorageStream),
}

impl Content {
    pub fn mode(&self) -> ContentMode {
        match self {
            Content::Normal(_) => ContentMode::Normal,
            Content::Progmem(_) => ContentMode::Progmem,
            Content::Json => ContentMode::Json,
            Content::Storage(_) => ContentMode::Storage,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Normal(String::new())
    }
}

/// Response que construye un handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200 por defecto)
    status: u16,

    content: Content,

    mime_type: String,

    /// Headers escritos por el handler; la búsqueda es exacta
    headers: HashMap<String, String>,

    headers_sent: bool,

    response_sent: bool,
}

impl Response {
    /// Crea un response vacío: 200, modo Normal, `text/html`
    pub fn new() -> Self {
        Self {
            status: StatusCode::Ok.as_u16(),
            content: Content::default(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            headers: HashMap::new(),
            headers_sent: false,
            response_sent: false,
        }
    }

    // === Estado ===

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, code: u16) {
        self.status = code;
    }

    // === Modos de contenido ===

    /// Establece contenido propio (modo Normal)
    pub fn set_content(&mut self, content: &str, mime_type: &str) {
        self.content = Content::Normal(content.to_string());
        self.mime_type = mime_type.to_string();
    }

    /// Contenido del buffer; `""` si el modo activo no es Normal
    pub fn content(&self) -> &str {
        match &self.content {
            Content::Normal(buffer) => buffer,
            _ => "",
        }
    }

    /// Apunta a datos constantes residentes en firmware (modo Progmem)
    ///
    /// El response guarda solo la referencia.
    pub fn set_progmem_content(&mut self, data: &'static [u8], mime_type: &str) {
        self.content = Content::Progmem(data);
        self.mime_type = mime_type.to_string();
    }

    pub fn has_progmem_content(&self) -> bool {
        matches!(self.content, Content::Progmem(_))
    }

    pub fn progmem_data(&self) -> Option<&'static [u8]> {
        match self.content {
            Content::Progmem(data) => Some(data),
            _ => None,
        }
    }

    /// Marca que el llamador producirá un documento JSON (`application/json`)
    pub fn set_json_content(&mut self) {
        self.set_json_content_as("application/json");
    }

    /// Igual que [`Response::set_json_content`] con un MIME type explícito
    pub fn set_json_content_as(&mut self, mime_type: &str) {
        self.content = Content::Json;
        self.mime_type = mime_type.to_string();
    }

    pub fn has_json_content(&self) -> bool {
        matches!(self.content, Content::Json)
    }

    /// Apunta a bytes de un almacenamiento externo (modo Storage)
    pub fn set_storage_stream_content(&mut self, collection: &str, key: &str, mime_type: &str, driver_name: &str) {
        self.content = Content::Storage(StorageStream {
            collection: collection.to_string(),
            key: key.to_string(),
            driver_name: driver_name.to_string(),
        });
        self.mime_type = mime_type.to_string();
    }

    pub fn has_storage_stream_content(&self) -> bool {
        matches!(self.content, Content::Storage(_))
    }

    pub fn storage_stream(&self) -> Option<&StorageStream> {
        match &self.content {
            Content::Storage(stream) => Some(stream),
            _ => None,
        }
    }

    /// Serializa `value` en el buffer propio como `application/json`
    ///
    /// Para documentos pequeños que el handler arma completos en memoria.
    ///
    /// # Ejemplo
    /// ```
    /// use serde_json::json;
    /// use web_platform_core::http::Response;
    ///
    /// let mut response = Response::new();
    /// response.write_json(&json!({"status": "ok"}));
    ///
    /// assert_eq!(response.content(), r#"{"status":"ok"}"#);
    /// assert_eq!(response.mime_type(), "application/json");
    /// ```
    pub fn write_json(&mut self, value: &Value) {
        self.set_content(&value.to_string(), "application/json");
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content.mode()
    }

    /// Payload completo del modo activo
    pub fn payload(&self) -> &Content {
        &self.content
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn set_mime_type(&mut self, mime_type: &str) {
        self.mime_type = mime_type.to_string();
    }

    // === Headers ===

    /// Agrega un header; si ya existe (misma clave exacta) se sobrescribe
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Obtiene un header por clave exacta; `""` si no existe
    ///
    /// A diferencia del request, aquí sí se distinguen mayúsculas: los
    /// headers del response los escribe el código, no vienen del cable.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Redirige a `url` con el código indicado (302 para redirección temporal)
    ///
    /// Una redirección no lleva body: el contenido vuelve a modo Normal vacío.
    pub fn set_redirect(&mut self, url: &str, code: u16) {
        self.status = code;
        self.set_header("Location", url);
        self.content = Content::default();
    }

    // === Progreso de salida ===

    pub fn mark_headers_sent(&mut self) {
        self.headers_sent = true;
    }

    pub fn mark_response_sent(&mut self) {
        self.response_sent = true;
    }

    pub fn is_headers_sent(&self) -> bool {
        self.headers_sent
    }

    pub fn is_response_sent(&self) -> bool {
        self.response_sent
    }

    /// Vuelve exactamente al estado recién construido
    ///
    /// Los adaptadores que reutilizan un response entre requests deben
    /// llamarlo antes de cada uso.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
