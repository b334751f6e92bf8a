//! Handle for a single remote file.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::effects::{self, DimensionKind, DimensionRequest};
use crate::error::{Result, UcareError};
use crate::info::FileInfo;
use crate::poll::{DEFAULT_TIMEOUT, Deadline, WaitOptions};

/// A file UUID optionally followed by `/-/<effects>`, found anywhere in the input.
static UUID_WITH_EFFECTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<uuid>[a-z0-9]{8}-(?:[a-z0-9]{4}-){3}[a-z0-9]{12})(?:/-/(?P<effects>.*))?")
        .unwrap()
});

/// A remote file identified by UUID.
///
/// Metadata is fetched on first use and cached; every refresh replaces the
/// cached record as a whole.
pub struct File<'c> {
    file_id: String,
    default_effects: Option<String>,
    cached_url: Option<String>,
    info: Option<FileInfo>,
    client: &'c dyn ApiClient,
}

impl<'c> File<'c> {
    /// Parse a bare UUID, `<uuid>/-/<effects>`, or a CDN URL containing either.
    ///
    /// When the input is an `http(s)` URL it is kept verbatim and returned by
    /// [`File::url`] without a metadata request.
    pub fn new(cdn_url_or_file_id: &str, client: &'c dyn ApiClient) -> Result<Self> {
        let captures = UUID_WITH_EFFECTS
            .captures(cdn_url_or_file_id)
            .ok_or_else(|| UcareError::invalid("Couldn't find UUID"))?;

        let file_id = captures["uuid"].to_string();
        let default_effects = captures
            .name("effects")
            .map(|m| m.as_str())
            .filter(|effects| !effects.is_empty())
            .map(String::from);

        let cached_url = (cdn_url_or_file_id.starts_with("http://")
            || cdn_url_or_file_id.starts_with("https://"))
        .then(|| cdn_url_or_file_id.to_string());

        Ok(Self {
            file_id,
            default_effects,
            cached_url,
            info: None,
            client,
        })
    }

    /// Build a handle from a record that was already fetched, e.g. as part of
    /// group metadata. No request is made.
    pub fn from_info(info: FileInfo, client: &'c dyn ApiClient) -> Result<Self> {
        let mut file = Self::new(&info.uuid, client)?;
        file.info = Some(info);
        Ok(file)
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Transformation path that followed `/-/` in the source identifier.
    pub fn default_effects(&self) -> Option<&str> {
        self.default_effects.as_deref()
    }

    pub fn api_uri(&self) -> String {
        format!("/files/{}/", self.file_id)
    }

    pub fn storage_uri(&self) -> String {
        format!("/files/{}/storage/", self.file_id)
    }

    /// Metadata, if it has been fetched already.
    pub fn cached_info(&self) -> Option<&FileInfo> {
        self.info.as_ref()
    }

    /// Metadata, fetching it on first access.
    pub fn info(&mut self) -> Result<&FileInfo> {
        if self.info.is_none() {
            self.refresh_info()?;
        }
        Ok(self.info.get_or_insert_default())
    }

    /// Fetch metadata and replace the cached record.
    pub fn refresh_info(&mut self) -> Result<&FileInfo> {
        let body = self.client.make_request(Method::GET, &self.api_uri())?;
        let info: FileInfo = serde_json::from_value(body)?;
        Ok(self.info.insert(info))
    }

    /// The file has finished propagating to backing storage.
    pub fn is_on_storage(&mut self) -> Result<bool> {
        Ok(self.info()?.is_on_storage())
    }

    pub fn is_stored(&mut self) -> Result<bool> {
        Ok(self.info()?.is_stored())
    }

    pub fn is_removed(&mut self) -> Result<bool> {
        Ok(self.info()?.is_removed())
    }

    /// Mark the file as stored.
    ///
    /// With `wait`, polls until the file is both on storage and stored, then
    /// waits up to [`DEFAULT_TIMEOUT`] for it to become available on the CDN.
    /// Metadata is refreshed once more before returning either way.
    pub fn store(&mut self, opts: WaitOptions) -> Result<()> {
        self.client.make_request(Method::PUT, &self.storage_uri())?;

        if opts.wait {
            self.wait_until(opts.timeout, "timed out trying to store", |info| {
                info.is_on_storage() && info.is_stored()
            })?;
            self.ensure_on_cdn(DEFAULT_TIMEOUT)?;
        }
        self.refresh_info()?;
        Ok(())
    }

    #[deprecated(note = "use `store` instead")]
    pub fn keep(&mut self, opts: WaitOptions) -> Result<()> {
        warn!("keep() is deprecated, use store() instead");
        self.store(opts)
    }

    /// Delete the file; with `wait`, polls until the server reports it removed.
    pub fn delete(&mut self, opts: WaitOptions) -> Result<()> {
        self.client.make_request(Method::DELETE, &self.api_uri())?;

        if opts.wait {
            self.wait_until(opts.timeout, "timed out trying to delete", |info| {
                info.is_removed()
            })?;
        }
        self.refresh_info()?;
        Ok(())
    }

    pub fn ensure_on_storage(&mut self, timeout: Duration) -> Result<()> {
        self.wait_until(timeout, "timed out waiting for upload to storage", |info| {
            info.is_on_storage()
        })
    }

    /// Poll the CDN URL with HEAD requests until it answers `200 OK`.
    ///
    /// The file must already be on storage and stored; otherwise this fails
    /// without sending a probe.
    pub fn ensure_on_cdn(&mut self, timeout: Duration) -> Result<()> {
        if !self.is_on_storage()? {
            return Err(UcareError::invalid("file is not on storage yet"));
        }
        if !self.is_stored()? {
            return Err(UcareError::invalid("file is private"));
        }

        let url = self.cdn_url();
        let deadline = Deadline::after(timeout);
        loop {
            deadline.check("timed out waiting for file to appear on CDN")?;
            let status = self.client.probe(&url)?;
            if status == StatusCode::OK {
                return Ok(());
            }
            debug!(%url, %status, "file is not on CDN yet");
            deadline.pause();
        }
    }

    fn wait_until(
        &mut self,
        timeout: Duration,
        message: &str,
        done: impl Fn(&FileInfo) -> bool,
    ) -> Result<()> {
        let deadline = Deadline::after(timeout);
        while !done(self.info()?) {
            deadline.check(message)?;
            debug!(file_id = %self.file_id, "polling file metadata");
            self.refresh_info()?;
            deadline.pause();
        }
        Ok(())
    }

    /// A string that [`File::new`] accepts back.
    ///
    /// The URL when it is known without another request, the bare UUID otherwise.
    pub fn serialize(&self) -> String {
        if let Some(info) = &self.info {
            let url = self
                .cached_url
                .as_deref()
                .or(info.original_file_url.as_deref());
            if let Some(url) = url.filter(|url| !url.is_empty()) {
                return url.to_string();
            }
        }
        self.file_id.clone()
    }

    /// The URL the handle was built from, or the original file URL from metadata.
    pub fn url(&mut self) -> Result<Option<&str>> {
        if self.cached_url.is_some() {
            return Ok(self.cached_url.as_deref());
        }
        Ok(self.info()?.original_file_url.as_deref())
    }

    /// Last path segment of [`File::url`], empty when there is no URL.
    pub fn filename(&mut self) -> Result<String> {
        Ok(self
            .url()?
            .and_then(|url| url.rsplit('/').next())
            .unwrap_or_default()
            .to_string())
    }

    /// `<cdn_base><uuid>/` or `<cdn_base><uuid>/-/<effects>`.
    pub fn cdn_url(&self) -> String {
        let cdn_base = self.client.cdn_base();
        match &self.default_effects {
            Some(effects) => format!("{cdn_base}{}/-/{effects}", self.file_id),
            None => format!("{cdn_base}{}/", self.file_id),
        }
    }

    #[deprecated(note = "append a crop operation to `cdn_url` instead")]
    pub fn cropped(&self, width: Option<u32>, height: Option<u32>) -> Result<String> {
        warn!("cropped() is deprecated, use cdn_url with concatenated process command string");
        effects::crop_url(&self.cdn_url(), width, height)
    }

    #[deprecated(note = "append a resize operation to `cdn_url` instead")]
    pub fn resized(&self, width: Option<u32>, height: Option<u32>) -> Result<String> {
        warn!("resized() is deprecated, use cdn_url with concatenated process command string");
        effects::resize_url(&self.cdn_url(), width, height)
    }

    /// Resolve an accessor name such as `resized_300x200` or `cropped_100x100`.
    #[deprecated(note = "use `resized` or `cropped` directly")]
    #[allow(deprecated)]
    pub fn dimension_url(&self, name: &str) -> Result<String> {
        let request: DimensionRequest = name.parse()?;
        match request.kind {
            DimensionKind::Crop => self.cropped(request.width, request.height),
            DimensionKind::Resize => self.resized(request.width, request.height),
        }
    }
}

impl fmt::Display for File<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cdn_url())
    }
}

impl fmt::Debug for File<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("file_id", &self.file_id)
            .field("default_effects", &self.default_effects)
            .finish_non_exhaustive()
    }
}
