//! Handle for a file group.

use std::fmt;
use std::ops::{Bound, Range, RangeBounds};
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::{Result, UcareError};
use crate::file::File;
use crate::info::{FileInfo, GroupInfo};

static GROUP_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<group_id>[a-z0-9]{8}-(?:[a-z0-9]{4}-){3}[a-z0-9]{12}~(?P<files_qty>[0-9]+))")
        .unwrap()
});

/// A group of files identified by `<uuid>~<count>`.
pub struct FileGroup<'c> {
    group_id: String,
    files_qty: usize,
    info: Option<GroupInfo>,
    client: &'c dyn ApiClient,
}

impl<'c> FileGroup<'c> {
    pub fn new(cdn_url_or_group_id: &str, client: &'c dyn ApiClient) -> Result<Self> {
        let captures = GROUP_ID
            .captures(cdn_url_or_group_id)
            .ok_or_else(|| UcareError::invalid("Couldn't find group UUID"))?;

        let files_qty = captures["files_qty"]
            .parse::<usize>()
            .ok()
            .filter(|&qty| qty > 0)
            .ok_or_else(|| UcareError::invalid("Couldn't find group UUID"))?;

        Ok(Self {
            group_id: captures["group_id"].to_string(),
            files_qty,
            info: None,
            client,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Number of files encoded in the group id. Makes no request.
    pub fn len(&self) -> usize {
        self.files_qty
    }

    /// Always `false`; a group holds at least one file.
    pub fn is_empty(&self) -> bool {
        self.files_qty == 0
    }

    pub fn api_uri(&self) -> String {
        format!("/groups/{}/", self.group_id)
    }

    pub fn api_storage_uri(&self) -> String {
        format!("/groups/{}/storage/", self.group_id)
    }

    pub fn cdn_url(&self) -> String {
        format!("{}{}/", self.client.cdn_base(), self.group_id)
    }

    pub fn cached_info(&self) -> Option<&GroupInfo> {
        self.info.as_ref()
    }

    pub fn info(&mut self) -> Result<&GroupInfo> {
        if self.info.is_none() {
            self.refresh_info()?;
        }
        Ok(self.info.get_or_insert_default())
    }

    pub fn refresh_info(&mut self) -> Result<&GroupInfo> {
        let body = self.client.make_request(Method::GET, &self.api_uri())?;
        let info: GroupInfo = serde_json::from_value(body)?;
        Ok(self.info.insert(info))
    }

    pub fn is_stored(&mut self) -> Result<bool> {
        Ok(self.info()?.is_stored())
    }

    /// Store every file of the group.
    ///
    /// Does nothing when the group is already stored. Otherwise the response
    /// of the storage request becomes the cached metadata.
    /// Files do not appear on the CDN immediately.
    pub fn store(&mut self) -> Result<()> {
        if self.is_stored()? {
            return Ok(());
        }
        let body = self
            .client
            .make_request(Method::PUT, &self.api_storage_uri())?;
        self.info = Some(serde_json::from_value(body)?);
        Ok(())
    }

    /// File in slot `index`; `None` past the end or for a withheld slot.
    pub fn get(&mut self, index: usize) -> Result<Option<File<'c>>> {
        let client = self.client;
        let slot = self.info()?.files.get(index).cloned().flatten();
        slot.map(|info| File::from_info(info, client)).transpose()
    }

    /// Files in `range`, clamped to the slots the server returned.
    pub fn get_range(
        &mut self,
        range: impl RangeBounds<usize>,
    ) -> Result<Vec<Option<File<'c>>>> {
        let client = self.client;
        let files = &self.info()?.files;
        let range = clamp(range, files.len());
        load_files(&files[range], client)
    }

    /// All file slots in order.
    pub fn files(&mut self) -> Result<Vec<Option<File<'c>>>> {
        let client = self.client;
        load_files(&self.info()?.files, client)
    }
}

fn load_files<'c>(
    slots: &[Option<FileInfo>],
    client: &'c dyn ApiClient,
) -> Result<Vec<Option<File<'c>>>> {
    slots
        .iter()
        .map(|slot| {
            slot.clone()
                .map(|info| File::from_info(info, client))
                .transpose()
        })
        .collect()
}

fn clamp(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    let end = end.min(len);
    start.min(end)..end
}

impl fmt::Display for FileGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cdn_url())
    }
}

impl fmt::Debug for FileGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileGroup")
            .field("group_id", &self.group_id)
            .field("files_qty", &self.files_qty)
            .finish_non_exhaustive()
    }
}
