//! # Configuración
//! src/config.rs
//!
//! Este módulo define la configuración del binario con soporte completo
//! para argumentos CLI y variables de entorno. Además del logging, describe
//! el request que el binario despacha contra la tabla de rutas de ejemplo.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_platform_core --method POST \
//!   --target "/api/config?save=1" \
//!   --content-type application/json \
//!   --body '{"ssid": "casa"}' \
//!   --auth session --username admin
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! DEVICE_NAME=sensor-01 LOG_FILTER=debug ./web_platform_core --target /status
//! ```

use crate::auth::{AuthContext, AuthMechanism};
use crate::http::{Method, Request};
use clap::Parser;
use thiserror::Error;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Device name must not be empty")]
    EmptyDeviceName,

    #[error("Target must start with '/': {0}")]
    InvalidTarget(String),

    #[error("Malformed header (expected Name:Value): {0}")]
    MalformedHeader(String),
}

/// Configuración del binario
#[derive(Debug, Clone, Parser)]
#[command(name = "web_platform_core")]
#[command(about = "Despacha un request contra la tabla de rutas de la plataforma web")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Nombre del dispositivo (aparece en las páginas de ejemplo)
    #[arg(long, default_value = "webplatform", env = "DEVICE_NAME")]
    pub device_name: String,

    // === Logging ===

    /// Filtro de logs (sintaxis de EnvFilter); `RUST_LOG` tiene prioridad
    #[arg(long, default_value = "info", env = "LOG_FILTER")]
    pub log_filter: String,

    /// Emite los logs como JSON
    #[arg(long, env = "JSON_LOGS")]
    pub json_logs: bool,

    // === Request ===

    /// Método HTTP del request
    #[arg(short, long, default_value = "GET")]
    pub method: Method,

    /// Request target (path y query string)
    #[arg(short, long, default_value = "/")]
    pub target: String,

    /// Body del request
    #[arg(long, default_value = "")]
    pub body: String,

    /// Content type del body (también se agrega como header)
    #[arg(long)]
    pub content_type: Option<String>,

    /// IP del cliente
    #[arg(long, default_value = "127.0.0.1")]
    pub client_ip: String,

    /// Header extra, repetible (ej: --header "X-Token:abc")
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    // === Autenticación ===

    /// Mecanismo con el que el request ya viene autenticado
    #[arg(long)]
    pub auth: Option<AuthMechanism>,

    /// Usuario autenticado (solo con --auth)
    #[arg(long, default_value = "")]
    pub username: String,

    // === Salida ===

    /// Imprime la tabla de rutas como JSON en vez de despachar
    #[arg(long)]
    pub list_routes: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Línea de request legible (ej: "GET /status")
    pub fn request_line(&self) -> String {
        format!("{} {}", self.method, self.target)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_name.trim().is_empty() {
            return Err(ConfigError::EmptyDeviceName);
        }

        if !self.target.starts_with('/') {
            return Err(ConfigError::InvalidTarget(self.target.clone()));
        }

        self.parsed_headers()?;

        Ok(())
    }

    /// Headers `Name:Value` separados en pares
    pub fn parsed_headers(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.headers
            .iter()
            .map(|raw| match raw.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Ok((name.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(ConfigError::MalformedHeader(raw.clone())),
            })
            .collect()
    }

    /// Construye el request descrito por la configuración
    ///
    /// El body se parsea según el content type (o el header `Content-Type`
    /// si no se indicó) y el contexto de autenticación se llena con
    /// `--auth` / `--username`, como lo haría el middleware de auth.
    ///
    /// # Ejemplo
    /// ```
    /// use web_platform_core::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.target = "/search?q=rust+lang".to_string();
    ///
    /// let request = config.build_request().unwrap();
    /// assert_eq!(request.path(), "/search");
    /// assert_eq!(request.param("q"), "rust lang");
    /// ```
    pub fn build_request(&self) -> Result<Request, ConfigError> {
        self.validate()?;

        let mut request = Request::from_target(self.method, &self.target);
        request.set_client_ip(&self.client_ip);

        for (name, value) in self.parsed_headers()? {
            request.set_header(&name, &value);
        }

        if let Some(content_type) = &self.content_type {
            request.set_header("Content-Type", content_type);
        }

        if !self.body.is_empty() {
            let content_type = request.header("Content-Type").to_string();
            request.set_body(&self.body);
            request.parse_request_body(&self.body, &content_type);
        }

        if let Some(mechanism) = self.auth {
            let context = AuthContext::authenticated_via(mechanism, &self.username);
            request.set_auth_context(context);
        }

        Ok(request)
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║              Web Platform Core Configuration                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("📟 Device:");
        println!("   Name:         {}", self.device_name);
        println!("   Log filter:   {}", self.log_filter);
        println!("   JSON logs:    {}", if self.json_logs { "yes" } else { "no" });
        println!();
        println!("📨 Request:");
        println!("   Line:         {}", self.request_line());
        println!("   Client IP:    {}", self.client_ip);
        println!("   Content type: {}", self.content_type.as_deref().unwrap_or("-"));
        println!("   Body bytes:   {}", self.body.len());
        println!("   Headers:      {}", self.headers.len());
        println!();
        println!("🔐 Auth:");
        match self.auth {
            Some(mechanism) => println!("   {} as '{}'", mechanism, self.username),
            None => println!("   unauthenticated"),
        }
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            device_name: "webplatform".to_string(),
            log_filter: "info".to_string(),
            json_logs: false,
            method: Method::GET,
            target: "/".to_string(),
            body: String::new(),
            content_type: None,
            client_ip: "127.0.0.1".to_string(),
            headers: Vec::new(),
            auth: None,
            username: String::new(),
            list_routes: false,
        }
    }
}
