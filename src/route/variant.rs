//! # Variante de Ruta
//! src/route/variant.rs
//!
//! Una colección de rutas guarda [`RouteVariant`]s para poder mezclar rutas
//! simples y rutas de API documentadas sin que el llamador sepa cuál es
//! cuál.
//!
//! ## Accesores con placeholder
//!
//! [`RouteVariant::plain`] y [`RouteVariant::documented`] nunca fallan: si
//! la variante activa es la otra, devuelven una ruta placeholder fija (path
//! vacío o normalizado, handler que no hace nada). Hay un único placeholder
//! por accesor, creado la primera vez que se necesita y compartido por todo
//! el proceso. Quien prefiera detectar el error puede usar
//! [`RouteVariant::try_plain`] / [`RouteVariant::try_documented`].

use super::{ApiDocumentation, ApiRouteDescriptor, Handler, RouteDescriptor};
use crate::auth::AuthRequirement;
use crate::http::Method;
use std::sync::OnceLock;
use tracing::debug;

/// Ruta simple o ruta de API documentada
#[derive(Debug, Clone)]
pub enum RouteVariant {
    Plain(RouteDescriptor),
    Documented(ApiRouteDescriptor),
}

impl RouteVariant {
    pub fn is_plain(&self) -> bool {
        matches!(self, RouteVariant::Plain(_))
    }

    pub fn is_documented(&self) -> bool {
        matches!(self, RouteVariant::Documented(_))
    }

    /// Ruta simple activa, o el placeholder si la variante es documentada
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::Method;
    /// use web_platform_core::route::{ApiRouteDescriptor, RouteVariant};
    ///
    /// let variant = RouteVariant::from(ApiRouteDescriptor::new("/api/x", Method::GET, |_, _| {}));
    ///
    /// assert_eq!(variant.plain().path, "");
    /// ```
    pub fn plain(&self) -> &RouteDescriptor {
        match self {
            RouteVariant::Plain(route) => route,
            RouteVariant::Documented(api) => {
                debug!(path = %api.route.path, "plain route requested from documented variant");
                plain_placeholder()
            }
        }
    }

    /// Ruta documentada activa, o el placeholder si la variante es simple
    pub fn documented(&self) -> &ApiRouteDescriptor {
        match self {
            RouteVariant::Documented(api) => api,
            RouteVariant::Plain(route) => {
                debug!(path = %route.path, "documented route requested from plain variant");
                documented_placeholder()
            }
        }
    }

    pub fn try_plain(&self) -> Option<&RouteDescriptor> {
        match self {
            RouteVariant::Plain(route) => Some(route),
            RouteVariant::Documented(_) => None,
        }
    }

    pub fn try_documented(&self) -> Option<&ApiRouteDescriptor> {
        match self {
            RouteVariant::Documented(api) => Some(api),
            RouteVariant::Plain(_) => None,
        }
    }

    /// Descriptor subyacente de la variante activa
    pub fn route(&self) -> &RouteDescriptor {
        match self {
            RouteVariant::Plain(route) => route,
            RouteVariant::Documented(api) => &api.route,
        }
    }

    pub fn route_mut(&mut self) -> &mut RouteDescriptor {
        match self {
            RouteVariant::Plain(route) => route,
            RouteVariant::Documented(api) => &mut api.route,
        }
    }

    pub fn path(&self) -> &str {
        &self.route().path
    }

    pub fn method(&self) -> Method {
        self.route().method
    }

    pub fn auth_requirement(&self) -> &AuthRequirement {
        &self.route().auth_requirement
    }

    pub fn handler(&self) -> &Handler {
        &self.route().handler
    }

    /// Documentación, solo para rutas de API
    pub fn docs(&self) -> Option<&ApiDocumentation> {
        self.try_documented().map(|api| &api.docs)
    }
}

impl From<RouteDescriptor> for RouteVariant {
    fn from(route: RouteDescriptor) -> Self {
        RouteVariant::Plain(route)
    }
}

impl From<ApiRouteDescriptor> for RouteVariant {
    fn from(route: ApiRouteDescriptor) -> Self {
        RouteVariant::Documented(route)
    }
}

fn plain_placeholder() -> &'static RouteDescriptor {
    static PLACEHOLDER: OnceLock<RouteDescriptor> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| RouteDescriptor::unchecked("", Method::GET, Handler::noop()))
}

fn documented_placeholder() -> &'static ApiRouteDescriptor {
    static PLACEHOLDER: OnceLock<ApiRouteDescriptor> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| ApiRouteDescriptor::with_handler("", Method::GET, Handler::noop()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthMechanism;
    use crate::http::{Request, Response};

    fn web_handler(_req: &mut Request, res: &mut Response) {
        res.set_content("test", "text/plain");
    }

    fn api_handler(_req: &mut Request, res: &mut Response) {
        res.set_content("api test", "application/json");
    }

    fn plain_variant() -> RouteVariant {
        RouteDescriptor::new("/test", Method::GET, web_handler)
            .with_auth(AuthMechanism::Session)
            .with_description("página de prueba")
            .into()
    }

    fn documented_variant() -> RouteVariant {
        ApiRouteDescriptor::new("/api/test", Method::POST, api_handler)
            .with_docs(ApiDocumentation::new("Test API", "A test endpoint", "postTest"))
            .into()
    }

    // ==================== Construcción ====================

    #[test]
    fn test_plain_constructor() {
        let variant = plain_variant();
        assert!(variant.is_plain());
        assert!(!variant.is_documented());
    }

    #[test]
    fn test_documented_constructor() {
        let variant = documented_variant();
        assert!(variant.is_documented());
        assert!(!variant.is_plain());
        assert_eq!(variant.path(), "/test");
    }

    // ==================== Accesores ====================

    #[test]
    fn test_matching_accessors() {
        let plain = plain_variant();
        assert_eq!(plain.plain().path, "/test");

        let documented = documented_variant();
        assert_eq!(documented.documented().route.path, "/test");
        assert_eq!(documented.documented().docs.summary(), "Test API");
    }

    #[test]
    fn test_mismatch_returns_plain_placeholder() {
        let variant = documented_variant();
        let placeholder = variant.plain();

        assert_eq!(placeholder.path, "");
        assert_eq!(placeholder.description, "");

        let mut request = Request::new();
        let mut response = Response::new();
        placeholder.invoke(&mut request, &mut response);
        assert_eq!(response, Response::new());
    }

    #[test]
    fn test_mismatch_returns_documented_placeholder() {
        let variant = plain_variant();
        let placeholder = variant.documented();

        assert_eq!(placeholder.route.path, "/");
        assert!(!placeholder.docs.has_documentation());
        assert_ne!(placeholder.route.description, "página de prueba");
    }

    #[test]
    fn test_placeholder_is_shared() {
        let first = plain_variant();
        let second = plain_variant();

        assert!(std::ptr::eq(first.documented(), second.documented()));

        let a = documented_variant();
        let b = documented_variant();
        assert!(std::ptr::eq(a.plain(), b.plain()));
    }

    #[test]
    fn test_mismatch_does_not_disturb_active_route() {
        let variant = plain_variant();
        let _ = variant.documented();

        assert!(variant.is_plain());
        assert_eq!(variant.plain().path, "/test");
    }

    #[test]
    fn test_try_accessors() {
        let plain = plain_variant();
        assert!(plain.try_plain().is_some());
        assert!(plain.try_documented().is_none());
        assert!(plain.docs().is_none());

        let documented = documented_variant();
        assert!(documented.try_plain().is_none());
        assert_eq!(documented.docs().map(|d| d.operation_id()), Some("postTest"));
    }

    #[test]
    fn test_delegating_accessors() {
        let variant = plain_variant();
        assert_eq!(variant.method(), Method::GET);
        assert!(variant.auth_requirement().contains(AuthMechanism::Session));

        let documented = documented_variant();
        assert_eq!(documented.method(), Method::POST);
        assert_eq!(documented.route().content_type, "text/html");
    }

    // ==================== Copia y asignación ====================

    #[test]
    fn test_clone_preserves_fields() {
        let original = plain_variant();
        let copy = original.clone();

        assert!(copy.is_plain());
        assert_eq!(copy.path(), original.path());
        assert_eq!(copy.method(), original.method());
        assert_eq!(copy.route().description, original.route().description);
        assert_eq!(copy.auth_requirement(), original.auth_requirement());

        let original = documented_variant();
        let copy = original.clone();
        assert!(copy.is_documented());
        assert_eq!(copy.documented().docs, original.documented().docs);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = plain_variant();
        let mut copy = original.clone();
        copy.route_mut().path = "/changed".to_string();

        assert_eq!(original.path(), "/test");
        assert_eq!(copy.path(), "/changed");
    }

    #[test]
    fn test_assignment_switches_variant() {
        let plain = plain_variant();
        let mut target = documented_variant();
        assert!(target.is_documented());

        target = plain.clone();
        assert!(target.is_plain());

        target = documented_variant();
        assert!(target.is_documented());
        assert_eq!(target.path(), "/test");
    }

    #[test]
    fn test_handler_invocation_through_variant() {
        let variant = documented_variant();
        let mut request = Request::new();
        let mut response = Response::new();

        variant.handler().call(&mut request, &mut response);
        assert_eq!(response.content(), "api test");
    }
}
