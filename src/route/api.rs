//! # Rutas de API Documentadas
//! src/route/api.rs
//!
//! Una [`ApiRouteDescriptor`] envuelve un [`RouteDescriptor`] y le agrega
//! documentación OpenAPI. Además normaliza su path **una sola vez**, al
//! construirse:
//!
//! | Path recibido | Path guardado |
//! |---------------|---------------|
//! | `/api/test`   | `/test`       |
//! | `api`         | `/`           |
//! | `test`        | `/test`       |
//! | `/status`     | `/status`     |
//!
//! Cambios posteriores a `route.path` no se vuelven a normalizar.

use super::{Handler, RouteDescriptor};
use crate::auth::AuthRequirement;
use crate::http::{Method, Request, Response};
use serde::Serialize;

/// Documentación OpenAPI de una operación
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiDocumentation {
    summary: String,
    operation_id: String,
    description: String,
    tags: Vec<String>,
    /// JSON de ejemplo del body del request
    request_example: String,
    response_example: String,
    /// Esquema JSON del body del request
    request_schema: String,
    response_schema: String,
    /// Definición JSON de los parámetros
    parameters: String,
    /// Definición JSON de las respuestas
    responses: String,
}

impl ApiDocumentation {
    pub fn new(summary: &str, description: &str, operation_id: &str) -> Self {
        Self {
            summary: summary.to_string(),
            description: description.to_string(),
            operation_id: operation_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn with_request_example(mut self, example: &str) -> Self {
        self.request_example = example.to_string();
        self
    }

    pub fn with_response_example(mut self, example: &str) -> Self {
        self.response_example = example.to_string();
        self
    }

    pub fn with_request_body(mut self, schema: &str) -> Self {
        self.request_schema = schema.to_string();
        self
    }

    pub fn with_response_schema(mut self, schema: &str) -> Self {
        self.response_schema = schema.to_string();
        self
    }

    pub fn with_parameters(mut self, parameters: &str) -> Self {
        self.parameters = parameters.to_string();
        self
    }

    pub fn with_responses(mut self, responses: &str) -> Self {
        self.responses = responses.to_string();
        self
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn request_example(&self) -> &str {
        &self.request_example
    }

    pub fn response_example(&self) -> &str {
        &self.response_example
    }

    pub fn request_schema(&self) -> &str {
        &self.request_schema
    }

    pub fn response_schema(&self) -> &str {
        &self.response_schema
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn responses(&self) -> &str {
        &self.responses
    }

    /// Verifica si hay algún campo de documentación con contenido
    pub fn has_documentation(&self) -> bool {
        !(self.summary.is_empty()
            && self.description.is_empty()
            && self.operation_id.is_empty()
            && self.tags.is_empty()
            && self.request_example.is_empty()
            && self.response_example.is_empty()
            && self.request_schema.is_empty()
            && self.response_schema.is_empty()
            && self.parameters.is_empty()
            && self.responses.is_empty())
    }

    /// Tags separados por comas (`""` si no hay)
    pub fn tags_string(&self) -> String {
        self.tags.join(",")
    }
}

/// Normaliza el path de una ruta de API
///
/// # Ejemplo
/// ```
/// use web_platform_core::route::normalize_api_path;
///
/// assert_eq!(normalize_api_path("/api/v1/x"), "/v1/x");
/// assert_eq!(normalize_api_path("api"), "/");
/// assert_eq!(normalize_api_path("health"), "/health");
/// ```
pub fn normalize_api_path(path: &str) -> String {
    // Se quita "/api" y se conserva la barra siguiente
    if let Some(rest) = path.strip_prefix("/api/") {
        return format!("/{}", rest);
    }

    if path == "api" {
        return "/".to_string();
    }

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Ruta de API con documentación
#[derive(Debug, Clone)]
pub struct ApiRouteDescriptor {
    /// Ruta subyacente (con el path ya normalizado)
    pub route: RouteDescriptor,

    pub docs: ApiDocumentation,
}

impl ApiRouteDescriptor {
    /// Crea una ruta de API pública con el path normalizado
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::Method;
    /// use web_platform_core::route::{ApiDocumentation, ApiRouteDescriptor};
    ///
    /// let route = ApiRouteDescriptor::new("/api/status", Method::GET, |_req, res| {
    ///     res.set_content(r#"{"up": true}"#, "application/json");
    /// })
    /// .with_docs(ApiDocumentation::new("Estado", "Estado del dispositivo", "getStatus"));
    ///
    /// assert_eq!(route.path(), "/status");
    /// ```
    pub fn new<F>(path: &str, method: Method, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        Self::with_handler(path, method, Handler::new(handler))
    }

    pub fn with_handler(path: &str, method: Method, handler: Handler) -> Self {
        Self {
            route: RouteDescriptor::unchecked(&normalize_api_path(path), method, handler),
            docs: ApiDocumentation::default(),
        }
    }

    pub fn with_docs(mut self, docs: ApiDocumentation) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.route = self.route.with_content_type(content_type);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.route = self.route.with_description(description);
        self
    }

    pub fn with_auth(mut self, requirement: impl Into<AuthRequirement>) -> Self {
        self.route = self.route.with_auth(requirement);
        self
    }

    pub fn path(&self) -> &str {
        &self.route.path
    }
}
