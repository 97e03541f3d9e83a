//! # Módulo de Autenticación
//!
//! Evalúa si el contexto de autenticación de un request satisface los
//! requerimientos de una ruta.
//!
//! ## Reglas
//!
//! - Un requerimiento vacío o que contenga `None` es público.
//! - En otro caso el request debe estar autenticado y su mecanismo debe
//!   aparecer en el requerimiento (lógica OR).
//!
//! La evaluación es pura: no hay efectos secundarios ni errores.

pub mod context;
pub mod mechanism;

pub use context::AuthContext;
pub use mechanism::{AuthMechanism, AuthRequirement, ParseAuthMechanismError};

/// Verifica si `context` satisface `requirement`
///
/// # Ejemplo
/// ```
/// use web_platform_core::auth::{requirement_is_satisfied, AuthContext, AuthMechanism, AuthRequirement};
///
/// let requirement = AuthRequirement::from([AuthMechanism::Session, AuthMechanism::Token]);
/// let ctx = AuthContext::authenticated_via(AuthMechanism::Token, "admin");
///
/// assert!(requirement_is_satisfied(&requirement, &ctx));
/// assert!(!requirement_is_satisfied(&requirement, &AuthContext::default()));
/// ```
pub fn requirement_is_satisfied(requirement: &AuthRequirement, context: &AuthContext) -> bool {
    if requirement.is_empty() || requirement.contains(AuthMechanism::None) {
        return true;
    }

    context.authenticated && requirement.contains(context.mechanism)
}

/// Indica si el requerimiento exige algún tipo de autenticación
///
/// Solo `{}` y exactamente `{None}` se consideran públicos.
pub fn requires_any_auth(requirement: &AuthRequirement) -> bool {
    !(requirement.is_empty() || requirement.mechanisms() == [AuthMechanism::None])
}

/// Indica si `mechanism` forma parte del requerimiento
pub fn has_mechanism(requirement: &AuthRequirement, mechanism: AuthMechanism) -> bool {
    requirement.contains(mechanism)
}

impl AuthRequirement {
    /// Versión método de [`requirement_is_satisfied`]
    pub fn is_satisfied_by(&self, context: &AuthContext) -> bool {
        requirement_is_satisfied(self, context)
    }

    /// Versión método de [`requires_any_auth`]
    pub fn requires_auth(&self) -> bool {
        requires_any_auth(self)
    }
}
