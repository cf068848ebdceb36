use super::{GkeFlags, NAME};
use crate::error::{Error, Result};
use crate::installer::PlatformConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// GKE platform configuration, as persisted in the cluster config file.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GkeConfig {
    #[serde(skip)]
    flags: GkeFlags,
    pub contact_email: String,
    pub dns_zone: String,
    pub project: String,
    pub oauth_proxy: OauthProxyConfig,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OauthProxyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authz_domain: String,
    pub google_groups: Vec<String>,
}

impl fmt::Debug for OauthProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OauthProxyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &if self.client_secret.is_empty() { "" } else { "<redacted>" })
            .field("authz_domain", &self.authz_domain)
            .field("google_groups", &self.google_groups)
            .finish()
    }
}

impl fmt::Debug for GkeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GkeConfig")
            .field("contact_email", &self.contact_email)
            .field("dns_zone", &self.dns_zone)
            .field("project", &self.project)
            .field("oauth_proxy", &self.oauth_proxy)
            .finish_non_exhaustive()
    }
}

impl GkeConfig {
    pub fn new(flags: GkeFlags) -> Self {
        let mut config = Self { flags, ..Self::default() };
        config.apply_flags();
        config
    }

    fn apply_flags(&mut self) {
        let flags = &self.flags;
        if let Some(v) = given(&flags.email) {
            self.contact_email = v;
        }
        if let Some(v) = given(&flags.dns_zone) {
            self.dns_zone = v;
        }
        if let Some(v) = given(&flags.project) {
            self.project = v;
        }
        if let Some(v) = given(&flags.authz_domain) {
            self.oauth_proxy.authz_domain = v;
        }
        if let Some(v) = given(&flags.oauth_client_id) {
            self.oauth_proxy.client_id = v;
        }
        if let Some(v) = given(&flags.oauth_client_secret) {
            self.oauth_proxy.client_secret = v;
        }
        let groups: Vec<String> = flags
            .oauth_google_groups
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        if !groups.is_empty() {
            self.oauth_proxy.google_groups = groups;
        }
    }
}

fn given(flag: &Option<String>) -> Option<String> {
    flag.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl PlatformConfig for GkeConfig {
    fn check(&self) -> Result<()> {
        let id = given(&self.flags.oauth_client_id);
        let secret = given(&self.flags.oauth_client_secret);
        if id.is_some() != secret.is_some() {
            return Err(Error::config(
                NAME,
                "--oauth-client-id and --oauth-client-secret must be given together",
            ));
        }
        if let Some(email) = given(&self.flags.email) {
            if !email.contains('@') {
                return Err(Error::config(NAME, format!("invalid contact email '{email}'")));
            }
        }
        Ok(())
    }

    fn merge_persisted(&mut self, persisted: Value) -> Result<()> {
        let previous: GkeConfig = serde_json::from_value(persisted)?;
        let flags = std::mem::take(&mut self.flags);
        *self = Self { flags, ..previous };
        self.apply_flags();
        Ok(())
    }

    fn generate(&mut self) -> Result<()> {
        let zone = self.dns_zone.trim_end_matches('.').to_string();
        self.dns_zone = zone;
        if self.contact_email.is_empty() {
            return Err(Error::install("contact email is required: pass --email or set EMAIL"));
        }
        Ok(())
    }

    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
