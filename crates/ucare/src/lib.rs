#![doc = include_str!("../README.md")]

mod client;
mod config;
mod effects;
mod error;
mod file;
mod group;
mod info;
mod poll;

pub use client::{ApiClient, Ucare};
pub use config::{
    DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_CDN_BASE, ENV_API_BASE, ENV_API_VERSION,
    ENV_CDN_BASE, ENV_PUBLIC_KEY, ENV_SECRET_KEY, UcareConfig,
};
pub use effects::{DimensionKind, DimensionRequest, crop_url, resize_url};
pub use error::{Result, UcareError};
pub use file::File;
pub use group::FileGroup;
pub use info::{FileInfo, GroupInfo};
pub use poll::{DEFAULT_TIMEOUT, Deadline, POLL_INTERVAL, WaitOptions};

pub use reqwest::{Method, StatusCode, header::HeaderMap};
