//! Reasoning service configuration

use secrecy::Secret;
use serde::Deserialize;

use crate::domain::catalog::EndpointTemplate;

use super::error::ValidationError;

/// Where and as whom the reasoning service is called
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Reasoning API base URL, without query string
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Society the stage agencies belong to
    #[serde(default = "default_society_id")]
    pub society_id: String,

    /// Agency level
    #[serde(default = "default_level")]
    pub level: u32,

    /// User id sent in every request body
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Tenant header value; empty disables tenant headers
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Optional bearer token
    pub auth_token: Option<Secret<String>>,
}

impl ServiceConfig {
    /// Template the stage endpoints are built from
    pub fn endpoint_template(&self) -> EndpointTemplate {
        EndpointTemplate {
            base_url: self.base_url.clone(),
            society_id: self.society_id.clone(),
            level: self.level,
        }
    }

    /// Tenant id, if tenant headers are enabled
    pub fn tenant(&self) -> Option<&str> {
        Some(self.tenant_id.trim()).filter(|t| !t.is_empty())
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.society_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SERVICE__SOCIETY_ID"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SERVICE__USER_ID"));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            society_id: default_society_id(),
            level: default_level(),
            user_id: default_user_id(),
            tenant_id: default_tenant_id(),
            auth_token: None,
        }
    }
}

fn default_base_url() -> String {
    "https://eoc.mu-sigma.com/talos-engine/agency/reasoning_api".to_string()
}

fn default_society_id() -> String {
    "1757657318406".to_string()
}

fn default_level() -> u32 {
    1
}

fn default_user_id() -> String {
    "talos-rest-endpoint".to_string()
}

fn default_tenant_id() -> String {
    "talos".to_string()
}
