//! # Mecanismos de Autenticación
//! src/auth/mechanism.rs
//!
//! Define las formas en que un request puede quedar autenticado y el
//! conjunto (OR) de mecanismos que una ruta acepta.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Forma en que un request puede estar autenticado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AuthMechanism {
    /// Sin autenticación (ruta pública)
    None = 0,

    /// Sesión basada en cookie
    Session = 1,

    /// Token en header o parámetro
    Token = 2,

    /// Solo accesible desde la red local
    LocalOnly = 4,

    /// Token de página (protección CSRF)
    PageToken = 8,
}

/// Error al convertir un string en [`AuthMechanism`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown auth mechanism: {0}")]
pub struct ParseAuthMechanismError(pub String);

impl AuthMechanism {
    /// Nombre estable del mecanismo (para logs y depuración)
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMechanism::None => "NONE",
            AuthMechanism::Session => "SESSION",
            AuthMechanism::Token => "TOKEN",
            AuthMechanism::LocalOnly => "LOCAL_ONLY",
            AuthMechanism::PageToken => "PAGE_TOKEN",
        }
    }
}

impl fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMechanism {
    type Err = ParseAuthMechanismError;

    /// Acepta el nombre en cualquier combinación de mayúsculas, con `_` o `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(AuthMechanism::None),
            "session" => Ok(AuthMechanism::Session),
            "token" => Ok(AuthMechanism::Token),
            "local_only" | "local" => Ok(AuthMechanism::LocalOnly),
            "page_token" | "csrf" => Ok(AuthMechanism::PageToken),
            _ => Err(ParseAuthMechanismError(s.to_string())),
        }
    }
}

/// Conjunto ordenado de mecanismos aceptados por una ruta
///
/// Basta con que **uno** de ellos coincida (lógica OR). El valor por defecto
/// es `{None}`, es decir, una ruta pública.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthRequirement(Vec<AuthMechanism>);

impl AuthRequirement {
    /// Crea un requerimiento a partir de una lista de mecanismos
    ///
    /// Una lista vacía se acepta y se trata como "no requiere autenticación".
    pub fn new(mechanisms: Vec<AuthMechanism>) -> Self {
        Self(mechanisms)
    }

    /// Requerimiento público: `{None}`
    pub fn public() -> Self {
        Self(vec![AuthMechanism::None])
    }

    /// Requerimiento de un único mecanismo
    pub fn only(mechanism: AuthMechanism) -> Self {
        Self(vec![mechanism])
    }

    pub fn contains(&self, mechanism: AuthMechanism) -> bool {
        self.0.contains(&mechanism)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn mechanisms(&self) -> &[AuthMechanism] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthMechanism> {
        self.0.iter()
    }
}

impl Default for AuthRequirement {
    fn default() -> Self {
        Self::public()
    }
}

impl From<Vec<AuthMechanism>> for AuthRequirement {
    fn from(mechanisms: Vec<AuthMechanism>) -> Self {
        Self::new(mechanisms)
    }
}

impl From<AuthMechanism> for AuthRequirement {
    fn from(mechanism: AuthMechanism) -> Self {
        Self::only(mechanism)
    }
}

impl<const N: usize> From<[AuthMechanism; N]> for AuthRequirement {
    fn from(mechanisms: [AuthMechanism; N]) -> Self {
        Self::new(mechanisms.to_vec())
    }
}

impl fmt::Display for AuthRequirement {
    /// Formato: `{SESSION|TOKEN}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|m| m.as_str()).collect();
        write!(f, "{{{}}}", names.join("|"))
    }
}
