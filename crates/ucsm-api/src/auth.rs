// Session authentication
//
// `aaaLogin` trades credentials for a session cookie that every later
// request carries in its body; `aaaLogout` invalidates it.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::client::UcsClient;
use crate::error::Error;
use crate::xml::XmlElement;

impl UcsClient {
    /// Authenticate with the controller using username/password.
    ///
    /// On success the session cookie is stored and used for all subsequent
    /// requests. A method-level failure of `aaaLogin` (an `errorCode` in the
    /// response) is reported as [`Error::Authentication`]; HTTP and
    /// transport failures pass through unchanged.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        debug!(username, "logging in at {}", self.endpoint_url());

        let request = XmlElement::new("aaaLogin")
            .with_attr("inName", username)
            .with_attr("inPassword", password.expose_secret());

        let root = match self.post(&request).await {
            Ok(root) => root,
            Err(Error::Api { code, message }) => {
                return Err(Error::Authentication {
                    message: format!("{message} (code {code})"),
                });
            }
            Err(Error::SessionExpired) => {
                return Err(Error::Authentication {
                    message: "controller rejected the credentials".into(),
                });
            }
            Err(e) => return Err(e),
        };

        let cookie = root
            .attr("outCookie")
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "login response carried no session cookie".into(),
            })?;
        self.set_cookie(Some(SecretString::from(cookie.to_owned())));

        debug!(
            refresh_period = root.attr("outRefreshPeriod").unwrap_or("-"),
            privileges = root.attr("outPriv").unwrap_or("-"),
            "login successful"
        );
        Ok(())
    }

    /// End the current session. A no-op when not logged in.
    ///
    /// The local cookie is dropped even if the controller rejects the call.
    pub async fn logout(&self) -> Result<(), Error> {
        let Ok(cookie) = self.cookie() else {
            return Ok(());
        };
        self.set_cookie(None);

        let request = XmlElement::new("aaaLogout").with_attr("inCookie", cookie);
        let root = self.post(&request).await?;

        match root.attr("outStatus") {
            Some("success") | None => debug!("logout complete"),
            Some(other) => warn!(status = other, "unexpected logout status"),
        }
        Ok(())
    }
}
