//! # Codificación `application/x-www-form-urlencoded`
//! src/http/urlencoded.rs
//!
//! Gramática compartida por query strings y bodies de formularios:
//!
//! ```text
//! key1=value1&key2=value%20with%20spaces&flag&&key3=a+b
//! ```
//!
//! - Los pares se separan por `&`; segmentos vacíos (`&&`) se ignoran.
//! - Cada par se divide en el **primer** `=`; sin `=` el valor es `""`.
//! - `+` es un espacio y `%XX` es el byte con ese valor hexadecimal.
//! - Un escape `%` malformado se conserva literalmente.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes que se dejan sin escapar al codificar (RFC 3986 unreserved)
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Decodifica un componente de URL
///
/// # Ejemplo
/// ```
/// use web_platform_core::http::urlencoded::decode;
///
/// assert_eq!(decode("hello+world"), "hello world");
/// assert_eq!(decode("hello%20world"), "hello world");
/// assert_eq!(decode("100%"), "100%");
/// ```
///
/// Si los bytes decodificados no son UTF-8 válido, cada byte se convierte
/// en el `char` del mismo valor (Latin-1), así `%FE` y `%FF` siguen siendo
/// distintos.
pub fn decode(s: &str) -> String {
    // '+' se sustituye antes de decodificar para que "%2B" siga siendo '+'
    let spaced = s.replace('+', " ");
    let decoded = percent_decode_str(&spaced);

    match decoded.clone().decode_utf8() {
        Ok(text) => text.into_owned(),
        Err(_) => decoded.map(char::from).collect(),
    }
}

/// Codifica un componente para un query string o formulario
///
/// Los espacios se codifican como `+`.
///
/// # Ejemplo
/// ```
/// use web_platform_core::http::urlencoded::encode;
///
/// assert_eq!(encode("50% off"), "50%25+off");
/// ```
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

/// Parsea un string urlencoded en pares `(key, value)` decodificados
///
/// Los pares se devuelven en orden de aparición; quien los consume decide
/// la política ante claves repetidas.
pub fn parse_pairs(raw: &str) -> impl Iterator<Item = (String, String)> + '_ {
    raw.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(segment), String::new()),
        })
}
