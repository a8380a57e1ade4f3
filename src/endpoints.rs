//! Tenant-parameterized URL templates for the portal handshake.
//!
//! Paths are spelled exactly as the portal serves them, including
//! `inter_check.asp`.

use url::Url;

use crate::error::Error;

/// Production portal base.
pub const DEFAULT_BASE_URL: &str = "https://secure.zac.ai";

/// Resolves the fixed handshake endpoints against one base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, Error> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    fn resolve(&self, tenant: &str, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{tenant}/{path}"));
        url
    }

    /// `/{tenant}/Logon.aspx` — the ASP.NET logon form.
    pub fn logon_page(&self, tenant: &str) -> Url {
        self.resolve(tenant, "Logon.aspx")
    }

    /// `/{tenant}/User/user_check.asp` — credential check.
    pub fn user_check(&self, tenant: &str) -> Url {
        self.resolve(tenant, "User/user_check.asp")
    }

    /// `/{tenant}/User/inter_check.asp` — inner session check.
    pub fn inner_check(&self, tenant: &str) -> Url {
        self.resolve(tenant, "User/inter_check.asp")
    }

    /// `/{tenant}/b/Api/Account/LoginSS` — session finalize.
    pub fn login_ss(&self, tenant: &str) -> Url {
        self.resolve(tenant, "b/Api/Account/LoginSS")
    }

    /// `/{tenant}/b/top` — authenticated landing page, used as the session
    /// probe target.
    pub fn top_page(&self, tenant: &str) -> Url {
        self.resolve(tenant, "b/top")
    }

    /// Scheme + host portion of the base, used for the `Origin` header.
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_templates() {
        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            endpoints.logon_page("beex").as_str(),
            "https://secure.zac.ai/beex/Logon.aspx"
        );
        assert_eq!(
            endpoints.user_check("beex").as_str(),
            "https://secure.zac.ai/beex/User/user_check.asp"
        );
        assert_eq!(
            endpoints.inner_check("beex").as_str(),
            "https://secure.zac.ai/beex/User/inter_check.asp"
        );
        assert_eq!(
            endpoints.login_ss("beex").as_str(),
            "https://secure.zac.ai/beex/b/Api/Account/LoginSS"
        );
        assert_eq!(
            endpoints.top_page("beex").as_str(),
            "https://secure.zac.ai/beex/b/top"
        );
    }

    #[test]
    fn test_origin_keeps_non_default_port() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(endpoints.origin(), "http://127.0.0.1:8080");

        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(endpoints.origin(), "https://secure.zac.ai");
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(Endpoints::new("not a url").is_err());
    }
}
