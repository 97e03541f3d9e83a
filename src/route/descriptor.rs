//! # Descriptor de Ruta
//! src/route/descriptor.rs
//!
//! Valor que describe una ruta: path, método, handler, content type,
//! descripción y requerimiento de autenticación.

use crate::auth::AuthRequirement;
use crate::http::{Method, Request, Response};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Content type de una ruta cuando no se indica otro
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Handler de una ruta
///
/// Recibe el request y el response mutables y escribe el resultado
/// directamente en el response.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&mut Request, &mut Response) + Send + Sync>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Handler que no hace nada
    pub fn noop() -> Self {
        Self::new(|_, _| {})
    }

    pub fn call(&self, request: &mut Request, response: &mut Response) {
        (self.0)(request, response)
    }

    /// Verifica si dos handlers comparten la misma función
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Ruta simple
///
/// # Ejemplo
/// ```
/// use web_platform_core::auth::{AuthMechanism, AuthRequirement};
/// use web_platform_core::http::Method;
/// use web_platform_core::route::RouteDescriptor;
///
/// let route = RouteDescriptor::new("/config", Method::POST, |_req, res| {
///     res.set_content("saved", "text/plain");
/// })
/// .with_auth(AuthRequirement::only(AuthMechanism::Session))
/// .with_description("Guarda la configuración");
///
/// assert_eq!(route.content_type, "text/html");
/// assert!(route.auth_requirement.requires_auth());
/// ```
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// Path o patrón de la ruta (ej: "/status", "/users/{id}")
    pub path: String,

    pub method: Method,

    pub handler: Handler,

    pub content_type: String,

    /// Descripción legible de la ruta
    pub description: String,

    pub auth_requirement: AuthRequirement,
}

impl RouteDescriptor {
    /// Crea una ruta pública con content type `text/html`
    ///
    /// Si el path parece de API (`/api/...` o `api/...`) se emite un warning:
    /// esas rutas deberían declararse como [`ApiRouteDescriptor`].
    ///
    /// [`ApiRouteDescriptor`]: super::ApiRouteDescriptor
    pub fn new<F>(path: &str, method: Method, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut Response) + Send + Sync + 'static,
    {
        Self::with_handler(path, method, Handler::new(handler))
    }

    /// Igual que [`RouteDescriptor::new`] con un [`Handler`] ya construido
    pub fn with_handler(path: &str, method: Method, handler: Handler) -> Self {
        if path.starts_with("/api/") || path.starts_with("api/") {
            warn!(
                path,
                "route path looks like an API path; consider an ApiRouteDescriptor for documentation and path normalization"
            );
        }
        Self::unchecked(path, method, handler)
    }

    /// Construcción sin verificar el path
    pub(crate) fn unchecked(path: &str, method: Method, handler: Handler) -> Self {
        Self {
            path: path.to_string(),
            method,
            handler,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            description: String::new(),
            auth_requirement: AuthRequirement::default(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_auth(mut self, requirement: impl Into<AuthRequirement>) -> Self {
        self.auth_requirement = requirement.into();
        self
    }

    /// Ejecuta el handler de la ruta
    pub fn invoke(&self, request: &mut Request, response: &mut Response) {
        self.handler.call(request, response);
    }
}
