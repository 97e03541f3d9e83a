//! # Web Platform Core
//! src/lib.rs
//!
//! Núcleo de un framework HTTP para dispositivos embebidos: el vocabulario
//! que comparten el servidor HTTP, los módulos de la aplicación y los
//! handlers.
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `http`: Modelo de request/response, parsing de query, formularios y JSON
//! - `auth`: Mecanismos de autenticación y evaluación de requerimientos
//! - `route`: Descriptores de ruta, rutas de API documentadas y `RouteVariant`
//! - `module`: Trait `WebModule` para agrupar rutas
//! - `router`: Tabla de rutas y despacho (path, método, auth)
//! - `config`: Configuración del binario (CLI + variables de entorno)
//! - `logging`: Inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```
//! use web_platform_core::auth::{AuthContext, AuthMechanism};
//! use web_platform_core::http::{Method, Request, Response};
//! use web_platform_core::route::ApiRouteDescriptor;
//! use web_platform_core::router::{DispatchOutcome, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.register(
//!     ApiRouteDescriptor::new("/api/users/{id}", Method::GET, |req, res| {
//!         let body = format!(r#"{{"id": "{}"}}"#, req.route_parameter("id"));
//!         res.set_content(&body, "application/json");
//!     })
//!     .with_auth(AuthMechanism::Session),
//! );
//!
//! let mut request = Request::from_target(Method::GET, "/users/7");
//! request.set_auth_context(AuthContext::authenticated_via(AuthMechanism::Session, "ana"));
//! let mut response = Response::new();
//!
//! assert_eq!(table.dispatch(&mut request, &mut response), DispatchOutcome::Handled);
//! assert_eq!(response.content(), r#"{"id": "7"}"#);
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod logging;
pub mod module;
pub mod route;
pub mod router;
