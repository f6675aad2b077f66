//! HTTP control-plane client.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use super::{ControlPlane, DownloadTicket, FinalizeRequest, UploadRequest, UploadTicket};
use crate::core::config::Context;
use crate::core::store::Token;
use crate::error::{AuthError, NetworkError, Result};

const TIMEOUT: Duration = Duration::from_secs(30);

/// Response of `POST /v1/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub plan: String,
}

/// A cloud project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// One audit log record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub details: serde_json::Value,
    pub created_at: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    license_key: &'a str,
}

#[derive(Serialize)]
struct CreateProjectRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ShareRequest<'a> {
    project_id: &'a str,
    user_email: &'a str,
    role: &'a str,
}

/// Blocking JSON client for the control-plane REST API.
pub struct HttpControlPlane {
    base: Url,
    token: Option<Token>,
    http: Client,
}

impl HttpControlPlane {
    /// Client for `base`. Every endpoint except login needs a token.
    pub fn new(base: Url, token: Option<Token>) -> Result<Self> {
        let http = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| NetworkError::Request {
                step: "client setup",
                message: e.to_string(),
            })?;
        Ok(Self { base, token, http })
    }

    /// Client for the context's API URL.
    pub fn from_context(ctx: &Context, token: Option<Token>) -> Result<Self> {
        Self::new(ctx.api_url.clone(), token)
    }

    /// Exchange a license key for a token.
    pub fn login(&self, license_key: &str) -> Result<LoginResponse> {
        let url = self.endpoint("v1/auth/login")?;
        let request = self.http.post(url).json(&LoginRequest { license_key });
        self.send("login", request, false)?
            .json()
            .map_err(|e| invalid("login", e))
    }

    pub fn create_project(&self, name: &str) -> Result<Project> {
        self.post_json("create project", "v1/projects", &CreateProjectRequest { name })
    }

    /// Grant `user_email` access to a project.
    pub fn share(&self, project_id: &str, user_email: &str, role: &str) -> Result<()> {
        let url = self.endpoint("v1/shares")?;
        let request = self.http.post(url).json(&ShareRequest {
            project_id,
            user_email,
            role,
        });
        self.send("share", request, true)?;
        Ok(())
    }

    /// Most recent audit records for a project.
    pub fn audit(&self, project_id: &str, limit: u32) -> Result<Vec<AuditEntry>> {
        let mut url = self.endpoint("v1/audit")?;
        url.query_pairs_mut()
            .append_pair("project_id", project_id)
            .append_pair("limit", &limit.to_string());
        self.get_json("audit", url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| {
            NetworkError::Request {
                step: "build url",
                message: e.to_string(),
            }
            .into()
        })
    }

    fn pull_url(&self, project_id: &str, version: Option<u64>) -> Result<Url> {
        let mut url = self.endpoint("v1/bundles/pull")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("project_id", project_id);
            if let Some(version) = version {
                query.append_pair("version", &version.to_string());
            } else {
                query.append_pair("latest", "true");
            }
        }
        Ok(url)
    }

    /// Resolve an upload or download URL handed out by the control-plane.
    /// Relative URLs are taken relative to the API base.
    fn blob_url(&self, step: &'static str, raw: &str) -> Result<Url> {
        match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base
                .join(raw.trim_start_matches('/'))
                .map_err(|e| invalid(step, e)),
            Err(e) => Err(invalid(step, e)),
        }
    }

    /// The bearer token goes only to the control-plane's own origin, never
    /// to a third-party blob store.
    fn is_control_plane(&self, url: &Url) -> bool {
        url.origin() == self.base.origin()
    }

    fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        step: &'static str,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let url = self.endpoint(path)?;
        let request = self.http.post(url).json(body);
        self.send(step, request, true)?
            .json()
            .map_err(|e| invalid(step, e))
    }

    fn get_json<R: DeserializeOwned>(&self, step: &'static str, url: Url) -> Result<R> {
        let request = self.http.get(url);
        self.send(step, request, true)?
            .json()
            .map_err(|e| invalid(step, e))
    }

    fn send(&self, step: &'static str, request: RequestBuilder, auth: bool) -> Result<Response> {
        let request = if auth {
            let token = self.token.as_ref().ok_or(AuthError::NotLoggedIn)?;
            request.bearer_auth(token.as_str())
        } else {
            request
        };

        trace!(step, "sending request");
        let response = request.send().map_err(|e| NetworkError::Request {
            step,
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!(step, status = status.as_u16(), "response received");
        check_status(step, status, auth, response)
    }
}

fn check_status(
    step: &'static str,
    status: StatusCode,
    auth: bool,
    response: Response,
) -> Result<Response> {
    if status.is_success() {
        return Ok(response);
    }
    if auth && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
        return Err(AuthError::Rejected(status.as_u16()).into());
    }
    let body = response.text().unwrap_or_default();
    Err(NetworkError::Status {
        step,
        status: status.as_u16(),
        body: body.trim().to_string(),
    }
    .into())
}

fn invalid(step: &'static str, err: impl std::fmt::Display) -> crate::error::Error {
    NetworkError::InvalidResponse {
        step,
        message: err.to_string(),
    }
    .into()
}

impl ControlPlane for HttpControlPlane {
    fn request_upload(&self, request: &UploadRequest) -> Result<UploadTicket> {
        self.post_json("push", "v1/bundles/push", request)
    }

    fn upload(&self, upload_url: &str, ciphertext: &[u8]) -> Result<()> {
        let url = self.blob_url("upload", upload_url)?;
        let auth = self.is_control_plane(&url);
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(ciphertext.to_vec());
        self.send("upload", request, auth)?;
        Ok(())
    }

    fn finalize(&self, request: &FinalizeRequest) -> Result<()> {
        let url = self.endpoint("v1/bundles/finalize")?;
        let request = self.http.post(url).json(request);
        self.send("finalize", request, true)?;
        Ok(())
    }

    fn request_download(&self, project_id: &str, version: Option<u64>) -> Result<DownloadTicket> {
        let url = self.pull_url(project_id, version)?;
        self.get_json("pull", url)
    }

    fn download(&self, download_url: &str) -> Result<Vec<u8>> {
        let url = self.blob_url("download", download_url)?;
        let auth = self.is_control_plane(&url);
        let request = self.http.get(url);
        let bytes = self
            .send("download", request, auth)?
            .bytes()
            .map_err(|e| NetworkError::Request {
                step: "download",
                message: e.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}
