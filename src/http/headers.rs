//! Headers que los adaptadores deben recolectar de cada request.
//!
//! Algunos servidores embebidos solo conservan los headers que se les piden
//! explícitamente; esta lista cubre lo que usan el parsing de bodies y la
//! autenticación.

pub const COMMON_HTTP_HEADERS: [&str; 15] = [
    "Host",
    "User-Agent",
    "Accept",
    "Accept-Language",
    "Accept-Encoding",
    "Content-Type",
    "Content-Length",
    "Authorization",
    "Cookie",
    "X-CSRF-Token",
    "X-Requested-With",
    "Referer",
    "Cache-Control",
    "Connection",
    "Pragma",
];

/// Indica si `name` está en [`COMMON_HTTP_HEADERS`] (sin distinguir mayúsculas)
pub fn is_common_header(name: &str) -> bool {
    COMMON_HTTP_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}
