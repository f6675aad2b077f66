//! Cloud bundle protocol.
//!
//! Push and pull versioned bundles through a remote control-plane that
//! hands out blob-store tickets and keeps the per-bundle data keys.
//!
//! ## Push
//!
//! 1. Generate a fresh 32-byte data key.
//! 2. Encrypt locally with it.
//! 3. Ask the control-plane for an upload ticket (bundle id, storage key,
//!    version).
//! 4. Upload the ciphertext.
//! 5. Finalize, handing over the data key for server-side wrapping.
//!
//! ## Pull
//!
//! 1. Ask for a download ticket (latest or a specific version). The ticket
//!    carries the data key.
//! 2. Download the ciphertext and decrypt locally.
//!
//! Any failing step aborts the whole operation. Nothing is retried.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::{self, KeyMaterial, RawKey};
use crate::core::constants::LOCAL_PROJECT_ID;
use crate::error::{InputError, NetworkError, Result};

mod client;

pub use client::{AuditEntry, HttpControlPlane, LoginResponse, Project, User};

/// Request body for `POST /v1/bundles/push`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub project_id: String,
    pub size_bytes: usize,
}

/// Upload ticket returned by the control-plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    pub upload_url: String,
    pub bundle_id: String,
    #[serde(rename = "s3_key")]
    pub storage_key: String,
    pub version: u64,
}

/// Request body for `POST /v1/bundles/finalize`.
#[derive(Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub bundle_id: String,
    #[serde(rename = "s3_key")]
    pub storage_key: String,
    /// Base64 of the raw data key.
    pub wrapped_key: Zeroizing<String>,
}

impl std::fmt::Debug for FinalizeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizeRequest")
            .field("bundle_id", &self.bundle_id)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

/// Download ticket returned by `GET /v1/bundles/pull`.
#[derive(Deserialize)]
pub struct DownloadTicket {
    pub download_url: String,
    /// Base64 data key for this version.
    pub data_key: Zeroizing<String>,
    pub version: u64,
}

/// Remote side of the bundle protocol.
///
/// Implemented over HTTP by [`HttpControlPlane`]; tests substitute an
/// in-memory fake.
pub trait ControlPlane {
    /// Reserve a new bundle version and get somewhere to upload it.
    fn request_upload(&self, request: &UploadRequest) -> Result<UploadTicket>;

    /// Upload ciphertext to the ticket's URL.
    fn upload(&self, upload_url: &str, ciphertext: &[u8]) -> Result<()>;

    /// Commit an uploaded bundle together with its data key.
    fn finalize(&self, request: &FinalizeRequest) -> Result<()>;

    /// Locate a bundle version. `None` asks for the latest.
    fn request_download(&self, project_id: &str, version: Option<u64>) -> Result<DownloadTicket>;

    /// Fetch ciphertext from a download URL.
    fn download(&self, download_url: &str) -> Result<Vec<u8>>;
}

/// Outcome of a successful push.
#[derive(Debug, Clone)]
pub struct PushReceipt {
    pub bundle_id: String,
    pub version: u64,
    /// The uploaded ciphertext, for an optional local copy.
    pub ciphertext: Vec<u8>,
}

/// Decrypted result of a pull.
pub struct Pulled {
    pub version: u64,
    pub plaintext: Zeroizing<Vec<u8>>,
}

/// Data key of one cloud version.
pub struct VersionKey {
    pub version: u64,
    pub key: RawKey,
}

/// Reject the placeholder project id used before `project create`.
pub fn require_project(project_id: &str) -> Result<()> {
    if project_id.is_empty() || project_id == LOCAL_PROJECT_ID {
        return Err(InputError::MissingProject.into());
    }
    Ok(())
}

/// Encrypt `plaintext` under a fresh data key and publish it as the next
/// version of `project_id`.
pub fn push<C: ControlPlane + ?Sized>(
    remote: &C,
    project_id: &str,
    plaintext: &[u8],
) -> Result<PushReceipt> {
    require_project(project_id)?;

    let data_key = cipher::generate_key()?;
    let ciphertext = cipher::encrypt(plaintext, &KeyMaterial::from_raw_key(&data_key))?;

    let ticket = remote.request_upload(&UploadRequest {
        project_id: project_id.to_string(),
        size_bytes: ciphertext.len(),
    })?;
    debug!(
        bundle_id = %ticket.bundle_id,
        version = ticket.version,
        size = ciphertext.len(),
        "upload ticket issued"
    );

    remote.upload(&ticket.upload_url, &ciphertext)?;
    debug!(bundle_id = %ticket.bundle_id, "ciphertext uploaded");

    remote.finalize(&FinalizeRequest {
        bundle_id: ticket.bundle_id.clone(),
        storage_key: ticket.storage_key.clone(),
        wrapped_key: cipher::key_to_base64(&data_key),
    })?;
    info!(
        bundle_id = %ticket.bundle_id,
        version = ticket.version,
        "bundle pushed"
    );

    Ok(PushReceipt {
        bundle_id: ticket.bundle_id,
        version: ticket.version,
        ciphertext,
    })
}

/// Fetch and decrypt a version of `project_id`. `None` pulls the latest.
pub fn pull<C: ControlPlane + ?Sized>(
    remote: &C,
    project_id: &str,
    version: Option<u64>,
) -> Result<Pulled> {
    let ticket = download_ticket(remote, project_id, version)?;
    let key = decode_data_key(&ticket.data_key)?;

    let ciphertext = remote.download(&ticket.download_url)?;
    debug!(version = ticket.version, size = ciphertext.len(), "bundle downloaded");

    let plaintext = cipher::decrypt(&ciphertext, &KeyMaterial::from_raw_key(&key))?;
    info!(version = ticket.version, "bundle pulled");

    Ok(Pulled {
        version: ticket.version,
        plaintext,
    })
}

/// Look up the data key of a version without downloading its blob.
///
/// Used to open a local copy of a cloud bundle.
pub fn version_key<C: ControlPlane + ?Sized>(
    remote: &C,
    project_id: &str,
    version: Option<u64>,
) -> Result<VersionKey> {
    let ticket = download_ticket(remote, project_id, version)?;
    Ok(VersionKey {
        version: ticket.version,
        key: decode_data_key(&ticket.data_key)?,
    })
}

fn download_ticket<C: ControlPlane + ?Sized>(
    remote: &C,
    project_id: &str,
    version: Option<u64>,
) -> Result<DownloadTicket> {
    require_project(project_id)?;

    let ticket = remote.request_download(project_id, version)?;
    if let Some(requested) = version {
        if ticket.version != requested {
            return Err(NetworkError::VersionMismatch {
                requested,
                returned: ticket.version,
            }
            .into());
        }
    }
    Ok(ticket)
}

fn decode_data_key(encoded: &str) -> Result<RawKey> {
    cipher::key_from_base64(encoded).map_err(|e| {
        NetworkError::InvalidResponse {
            step: "pull",
            message: format!("unusable data key: {e}"),
        }
        .into()
    })
}
