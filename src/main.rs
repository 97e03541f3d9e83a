//! # Web Platform Core - Entry Point
//! src/main.rs
//!
//! Arma una tabla de rutas de ejemplo (páginas, API documentada, un módulo
//! WiFi), construye el request descrito por la CLI, lo despacha e imprime
//! el response resultante.

use serde_json::json;
use std::error::Error;
use web_platform_core::auth::AuthMechanism;
use web_platform_core::config::Config;
use web_platform_core::http::{status, Content, Method, Request, Response};
use web_platform_core::logging;
use web_platform_core::module::WebModule;
use web_platform_core::route::{openapi, ApiDocumentation, ApiRouteDescriptor, RouteDescriptor, RouteVariant};
use web_platform_core::router::RouteTable;

/// Ícono embebido en el binario
static LOGO_SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"><circle cx="8" cy="8" r="7"/></svg>"#;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Error de configuración: {}", e);
        std::process::exit(1);
    }

    logging::init(&config);

    if let Err(e) = run(&config) {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let table = build_route_table(&config.device_name);

    if config.list_routes {
        let listing: Vec<_> = table.routes().map(describe_route).collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    config.print_summary();

    let mut request = config.build_request()?;
    let mut response = Response::new();
    let outcome = table.dispatch(&mut request, &mut response);

    print_response(&request, &response);
    tracing::info!(?outcome, status = response.status(), "dispatch finished");

    Ok(())
}

fn describe_route(route: &RouteVariant) -> serde_json::Value {
    json!({
        "path": route.path(),
        "method": route.method(),
        "auth": route.auth_requirement(),
        "content_type": route.route().content_type,
        "description": route.route().description,
        "docs": route.docs(),
    })
}

fn print_response(request: &Request, response: &Response) {
    println!("📬 Response:");
    println!("   Status:       {} {}", response.status(), status::reason_phrase(response.status()));
    println!("   MIME type:    {}", response.mime_type());
    println!("   Mode:         {:?}", response.content_mode());
    if !request.matched_route().is_empty() {
        println!("   Route:        {}", request.matched_route());
    }
    for (name, value) in response.headers() {
        println!("   {}: {}", name, value);
    }
    println!();

    match response.payload() {
        Content::Normal(body) => println!("{}", body),
        Content::Progmem(data) => println!("{}", String::from_utf8_lossy(data)),
        Content::Json => println!("(JSON document produced by the caller)"),
        Content::Storage(stream) => {
            let driver = if stream.driver_name.is_empty() { "default" } else { stream.driver_name.as_str() };
            println!("(stream {}/{} via {} driver)", stream.collection, stream.key, driver);
        }
    }
}

fn build_route_table(device_name: &str) -> RouteTable {
    let mut table = RouteTable::new();

    let name = device_name.to_string();
    table.register(
        RouteDescriptor::new("/", Method::GET, move |_req, res| {
            let page = format!("<html><body><h1>{}</h1></body></html>", name);
            res.set_content(&page, "text/html");
        })
        .with_description("Página principal"),
    );

    table.register(
        RouteDescriptor::new("/logo.svg", Method::GET, |_req, res| {
            res.set_progmem_content(LOGO_SVG, "image/svg+xml");
        })
        .with_content_type("image/svg+xml"),
    );

    table.register(
        RouteDescriptor::new("/backup", Method::GET, |_req, res| {
            res.set_storage_stream_content("backups", "latest", "application/octet-stream", "");
        })
        .with_auth(AuthMechanism::LocalOnly)
        .with_description("Descarga el último respaldo"),
    );

    let name = device_name.to_string();
    table.register(
        ApiRouteDescriptor::new("/api/status", Method::GET, move |req, res| {
            res.write_json(&json!({
                "device": name,
                "client": req.client_ip(),
                "authenticated": req.auth_context().authenticated,
            }));
        })
        .with_docs(openapi::with_success_response(
            "Device status",
            "Estado del dispositivo",
            &openapi::generate_operation_id("get", "Status"),
            &["system"],
            "Current status",
        )),
    );

    table.register(
        ApiRouteDescriptor::new("/api/config", Method::POST, |req, res| {
            let ssid = req.json_param("ssid");
            let ssid = if ssid.is_empty() { req.param("ssid") } else { ssid };
            if ssid.is_empty() {
                res.set_status(400);
                res.write_json(&json!({"success": false, "error": "ssid is required"}));
                return;
            }
            res.write_json(&json!({
                "success": true,
                "message": format!("saved ssid '{}' for {}", ssid, req.auth_context().username),
            }));
        })
        .with_auth([AuthMechanism::Session, AuthMechanism::Token])
        .with_content_type("application/json")
        .with_docs(
            ApiDocumentation::new("Save config", "Guarda la configuración de red", "postConfig")
                .with_tags(&["config"])
                .with_request_example(r#"{"ssid": "casa"}"#)
                .with_response_schema(&openapi::success_response_schema("Confirmation"))
                .with_responses(&openapi::error_response_schema("Missing ssid")),
        ),
    );

    table.register(
        ApiRouteDescriptor::new("/api/users/{id}", Method::GET, |req, res| {
            res.write_json(&json!({"id": req.route_parameter("id")}));
        })
        .with_auth(AuthMechanism::Session)
        .with_docs(
            ApiDocumentation::new("Get user", "Obtiene un usuario", "getUser")
                .with_parameters(&openapi::id_parameter("id", "User id")),
        ),
    );

    table.register(RouteDescriptor::new("/redirect", Method::GET, |_req, res| {
        res.set_redirect("/", 302);
    }));

    let mut wifi = WifiModule;
    table.register_module("/wifi", &mut wifi);

    table
}

/// Módulo de ejemplo con su propia página y endpoint de escaneo
struct WifiModule;

impl WebModule for WifiModule {
    fn name(&self) -> &str {
        "wifi"
    }

    fn description(&self) -> &str {
        "Configuración de red inalámbrica"
    }

    fn http_routes(&self) -> Vec<RouteVariant> {
        vec![
            RouteDescriptor::new("/", Method::GET, |req, res| {
                let page = format!("<h1>WiFi</h1><p>module at {}</p>", req.module_base_path());
                res.set_content(&page, "text/html");
            })
            .into(),
            ApiRouteDescriptor::new("/api/scan", Method::GET, |_req, res| {
                res.set_json_content();
            })
            .with_docs(ApiDocumentation::new("Scan networks", "", &openapi::generate_operation_id("get", "Scan")))
            .into(),
        ]
    }
}
