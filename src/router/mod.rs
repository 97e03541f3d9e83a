//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Tabla de rutas que mapea (path, método) a la ruta registrada y ejecuta
//! su handler.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → RouteTable → ¿path? → ¿método? → ¿auth? → Handler → Response
//!               │            │          │          │
//!               │           404        405     401 / 403
//! ```
//!
//! Los paths pueden tener segmentos `{nombre}` (ej: `/users/{id}`). Un
//! segmento capturado queda en el almacén de parámetros del request, así que
//! el handler lo lee con `route_parameter("id")`.
//!
//! Si un path literal y un patrón coinciden con el mismo request, gana el
//! literal. Entre dos rutas del mismo tipo gana la primera registrada.

use crate::http::{Method, Request, Response, StatusCode};
use crate::module::WebModule;
use crate::route::RouteVariant;
use regex::Regex;
use serde_json::json;
use tracing::{debug, info, warn};

/// Resultado de despachar un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// El handler de la ruta se ejecutó
    Handled,
    NotFound,
    MethodNotAllowed,
    /// La ruta pide autenticación y el request no la tiene
    Unauthorized,
    /// El request está autenticado con un mecanismo que la ruta no acepta
    Forbidden,
}

impl DispatchOutcome {
    /// Código de estado que el dispatcher escribió en el response
    ///
    /// Para `Handled` es 200, aunque el handler pudo haberlo cambiado.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchOutcome::Handled => StatusCode::Ok,
            DispatchOutcome::NotFound => StatusCode::NotFound,
            DispatchOutcome::MethodNotAllowed => StatusCode::MethodNotAllowed,
            DispatchOutcome::Unauthorized => StatusCode::Unauthorized,
            DispatchOutcome::Forbidden => StatusCode::Forbidden,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }
}

/// Cómo se compara el path de una ruta
#[derive(Debug, Clone)]
enum PathMatcher {
    Literal,
    Pattern { regex: Regex, names: Vec<String> },
}

#[derive(Debug, Clone)]
struct RouteEntry {
    variant: RouteVariant,
    module_base_path: String,
    matcher: PathMatcher,
}

impl RouteEntry {
    fn new(variant: RouteVariant, module_base_path: &str) -> Self {
        let matcher = compile_pattern(variant.path());
        Self {
            variant,
            module_base_path: module_base_path.to_string(),
            matcher,
        }
    }

    /// Segmentos capturados si el path coincide
    fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        match &self.matcher {
            PathMatcher::Literal => (self.variant.path() == path).then(Vec::new),
            PathMatcher::Pattern { regex, names } => {
                let caps = regex.captures(path)?;
                let values = names
                    .iter()
                    .zip(caps.iter().skip(1))
                    .map(|(name, value)| {
                        let value = value.map(|m| m.as_str()).unwrap_or("");
                        (name.clone(), value.to_string())
                    })
                    .collect();
                Some(values)
            }
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self.matcher, PathMatcher::Literal)
    }
}

/// Compila `/users/{id}` a `^/users/([^/]+)$`; sin `{...}` queda literal
fn compile_pattern(path: &str) -> PathMatcher {
    if !path.contains('{') {
        return PathMatcher::Literal;
    }

    let mut expr = String::from("^");
    let mut names = Vec::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        expr.push_str(&regex::escape(&rest[..open]));
        expr.push_str("([^/]+)");
        names.push(rest[open + 1..close].to_string());
        rest = &rest[close + 1..];
    }
    expr.push_str(&regex::escape(rest));
    expr.push('$');

    if names.is_empty() {
        return PathMatcher::Literal;
    }

    match Regex::new(&expr) {
        Ok(regex) => PathMatcher::Pattern { regex, names },
        Err(e) => {
            warn!(path, error = %e, "invalid route pattern, matching literally");
            PathMatcher::Literal
        }
    }
}

/// Une el path base de un módulo con el path de una ruta usando una sola `/`
fn join_paths(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", path),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, path),
    }
}

enum Lookup<'a> {
    Found(&'a RouteEntry, Vec<(String, String)>),
    MethodMismatch(Vec<&'a RouteEntry>),
    Missing,
}

/// Tabla de rutas
///
/// Se llena al arrancar y después solo se lee: `dispatch` toma `&self`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Crea una tabla vacía
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta tal cual
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::http::{Method, Request, Response};
    /// use web_platform_core::route::RouteDescriptor;
    /// use web_platform_core::router::{DispatchOutcome, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// table.register(RouteDescriptor::new("/hello", Method::GET, |_req, res| {
    ///     res.set_content("hello", "text/plain");
    /// }));
    ///
    /// let mut request = Request::from_target(Method::GET, "/hello");
    /// let mut response = Response::new();
    ///
    /// assert_eq!(table.dispatch(&mut request, &mut response), DispatchOutcome::Handled);
    /// assert_eq!(response.content(), "hello");
    /// ```
    pub fn register(&mut self, route: impl Into<RouteVariant>) {
        self.push(route.into(), "");
    }

    /// Inicia el módulo y registra sus rutas HTTP debajo de `base_path`
    pub fn register_module(&mut self, base_path: &str, module: &mut dyn WebModule) {
        module.begin();
        let routes = module.http_routes();
        info!(
            module = module.name(),
            version = module.version(),
            base_path,
            routes = routes.len(),
            "registering module"
        );

        for mut variant in routes {
            let full_path = join_paths(base_path, variant.path());
            variant.route_mut().path = full_path;
            self.push(variant, base_path);
        }
    }

    fn push(&mut self, variant: RouteVariant, module_base_path: &str) {
        info!(
            path = variant.path(),
            method = %variant.method(),
            documented = variant.is_documented(),
            auth = %variant.auth_requirement(),
            "route registered"
        );
        self.routes.push(RouteEntry::new(variant, module_base_path));
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Rutas en orden de registro
    pub fn routes(&self) -> impl Iterator<Item = &RouteVariant> {
        self.routes.iter().map(|entry| &entry.variant)
    }

    /// Busca la ruta que atendería `path` con `method`
    pub fn find(&self, path: &str, method: Method) -> Option<&RouteVariant> {
        match self.lookup(path, method) {
            Lookup::Found(entry, _) => Some(&entry.variant),
            _ => None,
        }
    }

    fn lookup(&self, path: &str, method: Method) -> Lookup<'_> {
        let literals = self.routes.iter().filter(|entry| entry.is_literal());
        let patterns = self.routes.iter().filter(|entry| !entry.is_literal());

        let mut wrong_method = Vec::new();
        for entry in literals.chain(patterns) {
            let Some(captures) = entry.captures(path) else {
                continue;
            };
            if entry.variant.method() == method {
                return Lookup::Found(entry, captures);
            }
            wrong_method.push(entry);
        }

        if wrong_method.is_empty() {
            Lookup::Missing
        } else {
            Lookup::MethodMismatch(wrong_method)
        }
    }

    /// Encuentra la ruta del request, verifica autenticación y ejecuta el handler
    ///
    /// Los rechazos escriben un body JSON `{"success": false, "error": ...}`
    /// con el código correspondiente.
    pub fn dispatch(&self, request: &mut Request, response: &mut Response) -> DispatchOutcome {
        let path = request.path().to_string();
        let method = request.method();

        let (entry, captures) = match self.lookup(&path, method) {
            Lookup::Found(entry, captures) => (entry, captures),
            Lookup::MethodMismatch(candidates) => {
                let allowed: Vec<&str> = candidates.iter().map(|e| e.variant.method().as_str()).collect();
                debug!(%path, %method, "method not allowed");
                response.set_header("Allow", &allowed.join(", "));
                write_error(response, StatusCode::MethodNotAllowed, &format!("Method {} not allowed for {}", method, path));
                return DispatchOutcome::MethodNotAllowed;
            }
            Lookup::Missing => {
                debug!(%path, %method, "route not found");
                write_error(response, StatusCode::NotFound, &format!("Route not found: {}", path));
                return DispatchOutcome::NotFound;
            }
        };

        let requirement = entry.variant.auth_requirement();
        let context = request.auth_context();
        if !requirement.is_satisfied_by(context) {
            let outcome = if context.authenticated {
                write_error(response, StatusCode::Forbidden, "Authentication method not accepted");
                DispatchOutcome::Forbidden
            } else {
                write_error(response, StatusCode::Unauthorized, "Authentication required");
                DispatchOutcome::Unauthorized
            };
            info!(%path, %method, required = %requirement, ?outcome, "request rejected by auth gate");
            return outcome;
        }

        for (name, value) in &captures {
            request.set_param(name, value);
        }
        request.set_matched_route(entry.variant.path());
        request.set_module_base_path(&entry.module_base_path);

        response.set_mime_type(&entry.variant.route().content_type);
        entry.variant.handler().call(request, response);

        debug!(%path, %method, status = response.status(), "request handled");
        DispatchOutcome::Handled
    }
}

fn write_error(response: &mut Response, status: StatusCode, message: &str) {
    response.set_status(status.as_u16());
    response.write_json(&json!({
        "success": false,
        "error": message,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthContext, AuthMechanism};
    use crate::http::{Method, StatusCode};
    use crate::route::{ApiRouteDescriptor, RouteDescriptor};

    fn test_handler(_req: &mut Request, res: &mut Response) {
        res.set_content(r#"{"test": "ok"}"#, "application/json");
    }

    fn hello_handler(_req: &mut Request, res: &mut Response) {
        res.set_content("hello", "text/plain");
    }

    fn user_handler(req: &mut Request, res: &mut Response) {
        let body = format!("user {}", req.route_parameter("id"));
        res.set_content(&body, "text/plain");
    }

    fn run(table: &RouteTable, method: Method, target: &str) -> (DispatchOutcome, Request, Response) {
        let mut request = Request::from_target(method, target);
        let mut response = Response::new();
        let outcome = table.dispatch(&mut request, &mut response);
        (outcome, request, response)
    }

    // ==================== Registro ====================

    #[test]
    fn test_router_creation() {
        let table = RouteTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_register_route() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/test", Method::GET, test_handler));
        table.register(ApiRouteDescriptor::new("/api/data", Method::POST, test_handler));

        assert_eq!(table.len(), 2);
        let paths: Vec<&str> = table.routes().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/test", "/data"]);
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/wifi", "/scan"), "/wifi/scan");
        assert_eq!(join_paths("/wifi/", "scan"), "/wifi/scan");
        assert_eq!(join_paths("/wifi//", "//scan"), "/wifi/scan");
        assert_eq!(join_paths("/wifi", "/"), "/wifi");
        assert_eq!(join_paths("", "/scan"), "/scan");
        assert_eq!(join_paths("/", "/"), "/");
    }

    struct Wifi;

    impl WebModule for Wifi {
        fn name(&self) -> &str {
            "wifi"
        }

        fn http_routes(&self) -> Vec<RouteVariant> {
            vec![
                RouteDescriptor::new("/", Method::GET, hello_handler).into(),
                ApiRouteDescriptor::new("/api/scan", Method::GET, test_handler).into(),
            ]
        }
    }

    #[test]
    fn test_register_module_prefixes_paths() {
        let mut table = RouteTable::new();
        table.register_module("/wifi/", &mut Wifi);

        let paths: Vec<&str> = table.routes().map(|r| r.path()).collect();
        assert_eq!(paths, vec!["/wifi", "/wifi/scan"]);
    }

    #[derive(Default)]
    struct Lazy {
        started: bool,
    }

    impl WebModule for Lazy {
        fn name(&self) -> &str {
            "lazy"
        }

        fn http_routes(&self) -> Vec<RouteVariant> {
            let path = if self.started { "/ready" } else { "/not-started" };
            vec![RouteDescriptor::new(path, Method::GET, hello_handler).into()]
        }

        fn begin(&mut self) {
            self.started = true;
        }
    }

    #[test]
    fn test_register_module_calls_begin_first() {
        let mut module = Lazy::default();
        let mut table = RouteTable::new();
        table.register_module("/lazy", &mut module);

        assert!(module.started);
        assert!(table.find("/lazy/ready", Method::GET).is_some());
        assert!(table.find("/lazy/not-started", Method::GET).is_none());
    }

    #[test]
    fn test_module_base_path_reaches_request() {
        let mut table = RouteTable::new();
        table.register_module("/wifi", &mut Wifi);

        let (outcome, request, _) = run(&table, Method::GET, "/wifi/scan");
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(request.module_base_path(), "/wifi");
        assert_eq!(request.matched_route(), "/wifi/scan");
    }

    // ==================== Búsqueda ====================

    #[test]
    fn test_route_found() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/test", Method::GET, test_handler));

        let (outcome, _, response) = run(&table, Method::GET, "/test");
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(response.status(), 200);
        assert_eq!(response.content(), r#"{"test": "ok"}"#);
    }

    #[test]
    fn test_route_not_found() {
        let table = RouteTable::new();

        let (outcome, _, response) = run(&table, Method::GET, "/nonexistent");
        assert_eq!(outcome, DispatchOutcome::NotFound);
        assert_eq!(response.status(), 404);
        assert_eq!(response.mime_type(), "application/json");
        assert!(response.content().contains("Route not found: /nonexistent"));
    }

    #[test]
    fn test_method_not_allowed() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/test", Method::GET, test_handler));
        table.register(RouteDescriptor::new("/test", Method::PUT, test_handler));

        let (outcome, _, response) = run(&table, Method::DELETE, "/test");
        assert_eq!(outcome, DispatchOutcome::MethodNotAllowed);
        assert_eq!(response.status(), 405);
        assert_eq!(response.header("Allow"), "GET, PUT");
    }

    #[test]
    fn test_multiple_routes() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/test", Method::GET, test_handler));
        table.register(RouteDescriptor::new("/hello", Method::GET, hello_handler));

        let (_, _, response) = run(&table, Method::GET, "/test");
        assert_eq!(response.mime_type(), "application/json");

        let (_, _, response) = run(&table, Method::GET, "/hello");
        assert_eq!(response.content(), "hello");
    }

    #[test]
    fn test_same_path_different_methods() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/item", Method::GET, hello_handler));
        table.register(RouteDescriptor::new("/item", Method::POST, test_handler));

        assert_eq!(table.find("/item", Method::POST).map(|r| r.method()), Some(Method::POST));
        assert!(table.find("/item", Method::PATCH).is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/dup", Method::GET, hello_handler).with_description("first"));
        table.register(RouteDescriptor::new("/dup", Method::GET, test_handler).with_description("second"));

        let found = table.find("/dup", Method::GET).map(|r| r.route().description.as_str());
        assert_eq!(found, Some("first"));
    }

    // ==================== Patrones ====================

    #[test]
    fn test_pattern_captures_parameter() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/users/{id}", Method::GET, user_handler));

        let (outcome, request, response) = run(&table, Method::GET, "/users/42");
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(request.route_parameter("id"), "42");
        assert_eq!(request.matched_route(), "/users/{id}");
        assert_eq!(response.content(), "user 42");
    }

    #[test]
    fn test_pattern_multiple_segments() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/files/{bucket}/{name}", Method::GET, hello_handler));

        let (_, request, _) = run(&table, Method::GET, "/files/logs/boot.txt");
        assert_eq!(request.route_parameter("bucket"), "logs");
        assert_eq!(request.route_parameter("name"), "boot.txt");
    }

    #[test]
    fn test_pattern_does_not_span_segments() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/users/{id}", Method::GET, user_handler));

        let (outcome, _, _) = run(&table, Method::GET, "/users/42/extra");
        assert_eq!(outcome, DispatchOutcome::NotFound);

        let (outcome, _, _) = run(&table, Method::GET, "/users/");
        assert_eq!(outcome, DispatchOutcome::NotFound);
    }

    #[test]
    fn test_literal_wins_over_pattern() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/users/{id}", Method::GET, user_handler));
        table.register(RouteDescriptor::new("/users/me", Method::GET, hello_handler));

        let (_, request, response) = run(&table, Method::GET, "/users/me");
        assert_eq!(response.content(), "hello");
        assert_eq!(request.matched_route(), "/users/me");
    }

    #[test]
    fn test_pattern_special_characters_are_literal() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/v1.0/{id}", Method::GET, user_handler));

        assert!(table.find("/v1.0/7", Method::GET).is_some());
        assert!(table.find("/v1x0/7", Method::GET).is_none());
    }

    #[test]
    fn test_query_params_survive_dispatch() {
        let mut table = RouteTable::new();
        table.register(RouteDescriptor::new("/users/{id}", Method::GET, user_handler));

        let (_, request, _) = run(&table, Method::GET, "/users/9?verbose=1");
        assert_eq!(request.param("verbose"), "1");
        assert_eq!(request.route_parameter("id"), "9");
    }

    // ==================== Autenticación ====================

    fn protected_table() -> RouteTable {
        let mut table = RouteTable::new();
        table.register(
            RouteDescriptor::new("/admin", Method::GET, hello_handler)
                .with_auth([AuthMechanism::Session, AuthMechanism::Token]),
        );
        table
    }

    #[test]
    fn test_unauthenticated_request_is_rejected() {
        let table = protected_table();

        let (outcome, _, response) = run(&table, Method::GET, "/admin");
        assert_eq!(outcome, DispatchOutcome::Unauthorized);
        assert_eq!(response.status(), 401);
        assert_eq!(outcome.status(), StatusCode::Unauthorized);
    }

    #[test]
    fn test_wrong_mechanism_is_forbidden() {
        let table = protected_table();
        let mut request = Request::from_target(Method::GET, "/admin");
        request.set_auth_context(AuthContext::authenticated_via(AuthMechanism::PageToken, "bob"));
        let mut response = Response::new();

        assert_eq!(table.dispatch(&mut request, &mut response), DispatchOutcome::Forbidden);
        assert_eq!(response.status(), 403);
    }

    #[test]
    fn test_accepted_mechanism_is_handled() {
        let table = protected_table();
        let mut request = Request::from_target(Method::GET, "/admin");
        request.set_auth_context(AuthContext::authenticated_via(AuthMechanism::Token, "alice"));
        let mut response = Response::new();

        assert!(table.dispatch(&mut request, &mut response).is_handled());
        assert_eq!(response.content(), "hello");
    }

    #[test]
    fn test_rejection_skips_handler() {
        let table = protected_table();

        let (_, request, response) = run(&table, Method::GET, "/admin");
        assert_ne!(response.content(), "hello");
        assert_eq!(request.matched_route(), "");
    }

    // ==================== Content type ====================

    #[test]
    fn test_route_content_type_becomes_mime_type() {
        let mut table = RouteTable::new();
        table.register(
            RouteDescriptor::new("/raw", Method::GET, |_req: &mut Request, _res: &mut Response| {})
                .with_content_type("text/csv"),
        );

        let (_, _, response) = run(&table, Method::GET, "/raw");
        assert_eq!(response.mime_type(), "text/csv");
    }
}
