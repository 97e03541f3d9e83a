//! # Módulos Web
//! src/module.rs
//!
//! Un módulo agrupa las rutas de una funcionalidad (configuración WiFi,
//! sensores, etc.) bajo un nombre. El router las monta debajo de un path
//! base con [`RouteTable::register_module`].
//!
//! [`RouteTable::register_module`]: crate::router::RouteTable::register_module

use crate::route::RouteVariant;

/// Conjunto de rutas con nombre y ciclo de vida propio
///
/// # Ejemplo
/// ```
/// use web_platform_core::http::Method;
/// use web_platform_core::module::WebModule;
/// use web_platform_core::route::{RouteDescriptor, RouteVariant};
///
/// struct Status;
///
/// impl WebModule for Status {
///     fn name(&self) -> &str {
///         "status"
///     }
///
///     fn http_routes(&self) -> Vec<RouteVariant> {
///         vec![RouteDescriptor::new("/", Method::GET, |_req, res| {
///             res.set_content("ok", "text/plain");
///         })
///         .into()]
///     }
/// }
///
/// assert_eq!(Status.version(), "1.0.0");
/// assert_eq!(Status.https_routes().len(), 1);
/// ```
pub trait WebModule {
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> &str {
        "Web-enabled module"
    }

    /// Rutas que el módulo expone por HTTP
    fn http_routes(&self) -> Vec<RouteVariant>;

    /// Rutas que el módulo expone por HTTPS (por defecto, las mismas)
    ///
    /// Las lee el adaptador HTTPS; la tabla de rutas solo monta las HTTP.
    fn https_routes(&self) -> Vec<RouteVariant> {
        self.http_routes()
    }

    /// Inicialización; `RouteTable::register_module` la llama antes de pedir
    /// las rutas
    fn begin(&mut self) {}

    /// Trabajo periódico del módulo; lo llama el loop del adaptador
    fn handle(&mut self) {}
}
