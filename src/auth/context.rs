//! # Contexto de Autenticación
//! src/auth/context.rs
//!
//! Registro mutable por request. Nace vacío con cada [`Request`] y lo
//! completa el middleware de autenticación antes de despachar el handler.
//!
//! [`Request`]: crate::http::Request

use super::AuthMechanism;

/// Estado de autenticación de un request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Si el request quedó autenticado
    pub authenticated: bool,

    /// Mecanismo con el que se autenticó
    pub mechanism: AuthMechanism,

    pub session_id: String,

    pub token: String,

    pub username: String,

    /// Momento de la autenticación (segundos desde epoch, 0 = nunca)
    pub authenticated_at: u64,
}

impl AuthContext {
    /// Contexto vacío (no autenticado)
    pub fn new() -> Self {
        Self {
            authenticated: false,
            mechanism: AuthMechanism::None,
            session_id: String::new(),
            token: String::new(),
            username: String::new(),
            authenticated_at: 0,
        }
    }

    /// Contexto autenticado mediante `mechanism`
    pub fn authenticated_via(mechanism: AuthMechanism, username: &str) -> Self {
        Self {
            authenticated: true,
            mechanism,
            username: username.to_string(),
            ..Self::new()
        }
    }

    /// Hay una sesión válida (autenticado por sesión y con id no vacío)
    pub fn has_valid_session(&self) -> bool {
        self.authenticated && self.mechanism == AuthMechanism::Session && !self.session_id.is_empty()
    }

    /// Hay un token válido (autenticado por token y con token no vacío)
    pub fn has_valid_token(&self) -> bool {
        self.authenticated && self.mechanism == AuthMechanism::Token && !self.token.is_empty()
    }

    /// Vuelve al estado recién construido
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_empty() {
        let ctx = AuthContext::default();
        assert!(!ctx.authenticated);
        assert_eq!(ctx.mechanism, AuthMechanism::None);
        assert!(ctx.session_id.is_empty());
        assert!(ctx.token.is_empty());
        assert!(ctx.username.is_empty());
        assert_eq!(ctx.authenticated_at, 0);
    }

    #[test]
    fn test_valid_session_requires_id() {
        let mut ctx = AuthContext::authenticated_via(AuthMechanism::Session, "admin");
        assert!(!ctx.has_valid_session());

        ctx.session_id = "abc123".to_string();
        assert!(ctx.has_valid_session());
        assert!(!ctx.has_valid_token());
    }

    #[test]
    fn test_valid_token_requires_token() {
        let mut ctx = AuthContext::authenticated_via(AuthMechanism::Token, "");
        assert!(!ctx.has_valid_token());

        ctx.token = "tok_42".to_string();
        assert!(ctx.has_valid_token());

        ctx.authenticated = false;
        assert!(!ctx.has_valid_token());
    }

    #[test]
    fn test_clear() {
        let mut ctx = AuthContext::authenticated_via(AuthMechanism::Token, "admin");
        ctx.token = "tok".to_string();
        ctx.authenticated_at = 1_700_000_000;

        ctx.clear();
        assert_eq!(ctx, AuthContext::new());
    }
}
