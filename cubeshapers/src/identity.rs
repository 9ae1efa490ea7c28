//! Caller identity as seen by the security injection step.
//!
//! Token validation happens upstream; this module only reads already-verified claims.

use serde_json::{Map, Value};

use crate::config::IdentityConfig;

/// Resolves the tenant and user a request runs on behalf of.
pub trait CallerIdentity: Send + Sync {
    fn tenant_id(&self) -> Option<String>;
    fn user_id(&self) -> Option<String>;
}

/// Identity backed by a JWT-style claims map.
#[derive(Debug, Clone, Default)]
pub struct ClaimsIdentity {
    claims: Map<String, Value>,
    tenant_claims: Vec<String>,
    user_claims: Vec<String>,
}

impl ClaimsIdentity {
    pub fn from_claims(claims: Map<String, Value>) -> Self {
        Self::with_claim_names(claims, &IdentityConfig::default())
    }

    pub fn with_claim_names(claims: Map<String, Value>, names: &IdentityConfig) -> Self {
        Self {
            claims,
            tenant_claims: names.tenant_claims.clone(),
            user_claims: names.user_claims.clone(),
        }
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// First non-empty claim in preference order.
    fn first_claim(&self, names: &[String]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.claims.get(name))
            .filter_map(claim_to_string)
            .find(|value| !value.is_empty())
    }
}

fn claim_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl CallerIdentity for ClaimsIdentity {
    fn tenant_id(&self) -> Option<String> {
        self.first_claim(&self.tenant_claims)
    }

    fn user_id(&self) -> Option<String> {
        self.first_claim(&self.user_claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn prefers_primary_tenant_claim() {
        let identity = ClaimsIdentity::from_claims(claims(json!({
            "tenant_id": "T1",
            "http://schemas.microsoft.com/identity/claims/tenantid": "T2"
        })));
        assert_eq!(identity.tenant_id().as_deref(), Some("T1"));
    }

    #[test]
    fn falls_back_to_namespaced_tenant_claim() {
        let identity = ClaimsIdentity::from_claims(claims(json!({
            "tenant_id": "",
            "http://schemas.microsoft.com/identity/claims/tenantid": "T2"
        })));
        assert_eq!(identity.tenant_id().as_deref(), Some("T2"));
    }

    #[test]
    fn user_id_falls_back_to_sub() {
        let identity = ClaimsIdentity::from_claims(claims(json!({ "sub": "u-42" })));
        assert_eq!(identity.user_id().as_deref(), Some("u-42"));
        assert_eq!(identity.tenant_id(), None);
    }

    #[test]
    fn custom_claim_names() {
        let names = IdentityConfig {
            tenant_claims: vec!["org".to_string()],
            user_claims: vec!["email".to_string()],
        };
        let identity = ClaimsIdentity::with_claim_names(
            claims(json!({ "org": 7, "email": "a@b.c", "tenant_id": "ignored" })),
            &names,
        );
        assert_eq!(identity.tenant_id().as_deref(), Some("7"));
        assert_eq!(identity.user_id().as_deref(), Some("a@b.c"));
    }
}
