//! # Modelo de Request
//! src/http/request.rs
//!
//! Estado parseado de un request y los algoritmos de parsing de contenido.
//! Los adaptadores HTTP construyen un [`Request`] por cada petición, le
//! entregan headers y body, y lo descartan cuando el handler termina.
//!
//! ## Almacenes de parámetros
//!
//! | Almacén        | Origen                              | Búsqueda              |
//! |----------------|-------------------------------------|-----------------------|
//! | `params`       | query string, formularios, ruta     | exacta                |
//! | `json_params`  | nivel superior de un body JSON      | exacta                |
//! | `headers`      | headers del request                 | sin mayúsculas (HTTP) |
//!
//! Ningún método de este módulo falla: la ausencia siempre se representa
//! como `""` o como un contenedor sin modificar.

use super::urlencoded;
use super::Method;
use crate::auth::AuthContext;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Request HTTP ya recibido por un adaptador
#[derive(Debug, Clone)]
pub struct Request {
    /// Path de la petición (ej: "/status")
    path: String,

    method: Method,

    /// Body crudo del request
    body: String,

    client_ip: String,

    /// Query string, formularios y parámetros de ruta
    params: HashMap<String, String>,

    /// Headers HTTP; ordenados para que la búsqueda sea determinista
    headers: BTreeMap<String, String>,

    /// Nivel superior de un body JSON, como strings
    json_params: HashMap<String, String>,

    /// Patrón de la ruta que hizo match (ej: "/users/{id}")
    matched_route_pattern: String,

    /// Path base del módulo dueño de la ruta
    module_base_path: String,

    auth_context: AuthContext,
}

impl Request {
    /// Crea un request vacío: `GET /`
    pub fn new() -> Self {
        Self {
            path: "/".to_string(),
            method: Method::GET,
            body: String::new(),
            client_ip: String::new(),
            params: HashMap::new(),
            headers: BTreeMap::new(),
            json_params: HashMap::new(),
            matched_route_pattern: String::new(),
            module_base_path: String::new(),
            auth_context: AuthContext::new(),
        }
    }

    /// Crea un request a partir de un request target (`/path?query`)
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::{Method, Request};
    ///
    /// let request = Request::from_target(Method::GET, "/fibonacci?num=10");
    ///
    /// assert_eq!(request.path(), "/fibonacci");
    /// assert_eq!(request.param("num"), "10");
    /// ```
    pub fn from_target(method: Method, target: &str) -> Self {
        let mut request = Self::new();
        request.method = method;

        match target.split_once('?') {
            Some((path, query)) => {
                request.path = path.to_string();
                request.parse_query_params(query);
            }
            None => request.path = target.to_string(),
        }

        request
    }

    // === Parsing de contenido ===

    /// Parsea un query string (`a=1&b=2`) en el almacén de parámetros
    ///
    /// Claves y valores se decodifican; la última aparición de una clave gana.
    pub fn parse_query_params(&mut self, query: &str) {
        for (key, value) in urlencoded::parse_pairs(query) {
            self.params.insert(key, value);
        }
    }

    /// Parsea un body `application/x-www-form-urlencoded`
    ///
    /// Comparte gramática con el query string.
    pub fn parse_form_data(&mut self, form_data: &str) {
        self.parse_query_params(form_data);
    }

    /// Aplana el nivel superior de un objeto JSON en `json_params`
    ///
    /// - strings se copian tal cual
    /// - números se renderizan en decimal; los flotantes usan la forma más
    ///   corta que se relee igual (`2.5`, `1e300`)
    /// - booleanos se guardan como `"true"` / `"false"`
    /// - objetos, arrays y `null` no se aplanan (se omiten)
    ///
    /// Un JSON inválido, o que no sea un objeto, no agrega nada.
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::Request;
    ///
    /// let mut request = Request::new();
    /// request.parse_json_data(r#"{"name": "led", "level": 42, "on": true}"#);
    ///
    /// assert_eq!(request.json_param("name"), "led");
    /// assert_eq!(request.json_param("level"), "42");
    /// assert_eq!(request.json_param("on"), "true");
    /// ```
    pub fn parse_json_data(&mut self, json_data: &str) {
        if json_data.trim().is_empty() {
            return;
        }

        let Ok(Value::Object(object)) = serde_json::from_str::<Value>(json_data) else {
            return;
        };

        for (key, value) in object {
            let flattened = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => continue,
            };
            self.json_params.insert(key, flattened);
        }
    }

    /// Parsea el body según su `Content-Type`
    ///
    /// La comparación no distingue mayúsculas y busca una subcadena, así que
    /// `application/json; charset=utf-8` también cuenta como JSON. Cualquier
    /// otro tipo (incluido `multipart/form-data`) se ignora.
    pub fn parse_request_body(&mut self, body: &str, content_type: &str) {
        if body.is_empty() {
            return;
        }

        let content_type = content_type.to_ascii_lowercase();

        if content_type.contains("application/json") {
            self.parse_json_data(body);
        } else if content_type.contains("application/x-www-form-urlencoded") {
            self.parse_form_data(body);
        }
    }

    // === Información del request ===

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
    }

    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    pub fn set_client_ip(&mut self, ip: &str) {
        self.client_ip = ip.to_string();
    }

    // === Parámetros (query, formulario, ruta) ===

    /// Obtiene un parámetro; `""` si no existe
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn set_param(&mut self, name: &str, value: &str) {
        self.params.insert(name.to_string(), value.to_string());
    }

    pub fn clear_params(&mut self) {
        self.params.clear();
    }

    /// Obtiene un parámetro de ruta (ej: `id` en `/users/{id}`)
    ///
    /// El router guarda los segmentos capturados en el mismo almacén que los
    /// parámetros del query string.
    pub fn route_parameter(&self, name: &str) -> &str {
        self.param(name)
    }

    // === Headers ===

    /// Obtiene un header sin distinguir mayúsculas; `""` si no existe
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::Request;
    ///
    /// let mut request = Request::new();
    /// request.set_header("Content-Type", "application/json");
    ///
    /// assert_eq!(request.header("content-type"), "application/json");
    /// assert_eq!(request.header("X-Missing"), "");
    /// ```
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|key| key.eq_ignore_ascii_case(name))
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Guarda un header; reemplaza cualquier entrada con el mismo nombre
    /// sin importar mayúsculas
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn clear_headers(&mut self) {
        self.headers.clear();
    }

    // === Parámetros JSON ===

    /// Obtiene un parámetro JSON de nivel superior; `""` si no existe
    pub fn json_param(&self, name: &str) -> &str {
        self.json_params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn json_params(&self) -> &HashMap<String, String> {
        &self.json_params
    }

    pub fn set_json_param(&mut self, name: &str, value: &str) {
        self.json_params.insert(name.to_string(), value.to_string());
    }

    pub fn clear_json_params(&mut self) {
        self.json_params.clear();
    }

    // === Autenticación ===

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth_context
    }

    pub fn auth_context_mut(&mut self) -> &mut AuthContext {
        &mut self.auth_context
    }

    pub fn set_auth_context(&mut self, context: AuthContext) {
        self.auth_context = context;
    }

    // === Contexto de ruteo ===

    pub fn matched_route(&self) -> &str {
        &self.matched_route_pattern
    }

    pub fn set_matched_route(&mut self, pattern: &str) {
        self.matched_route_pattern = pattern.to_string();
    }

    pub fn module_base_path(&self) -> &str {
        &self.module_base_path
    }

    pub fn set_module_base_path(&mut self, base_path: &str) {
        self.module_base_path = base_path.to_string();
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
