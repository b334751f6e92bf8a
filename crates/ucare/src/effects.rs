//! Crop and resize transformation URLs.
//!
//! Names like `resized_300x200`, `resized_300x`, `resized_x200` and
//! `cropped_300x200` are parsed into a [`DimensionRequest`] and turned into a
//! CDN transformation suffix.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::error::UcareError;

const RESIZED_PREFIX: &str = "resized_";
const CROPPED_PREFIX: &str = "cropped_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    Resize,
    Crop,
}

/// A parsed `resized_*` / `cropped_*` accessor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionRequest {
    pub kind: DimensionKind,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FromStr for DimensionRequest {
    type Err = UcareError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let (kind, dims) = if let Some(rest) = name.strip_prefix(RESIZED_PREFIX) {
            (DimensionKind::Resize, rest)
        } else if let Some(rest) = name.strip_prefix(CROPPED_PREFIX) {
            (DimensionKind::Crop, rest)
        } else {
            return Err(UcareError::invalid(format!(
                "unknown dimension accessor: {name}"
            )));
        };

        let (width, height) = dims.split_once('x').unwrap_or((dims, ""));
        Ok(Self {
            kind,
            width: parse_dimension(width, "width")?,
            height: parse_dimension(height, "height")?,
        })
    }
}

fn parse_dimension(s: &str, what: &str) -> Result<Option<u32>, UcareError> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<u32>()
        .map(|v| Some(v).filter(|&v| v > 0))
        .map_err(|e| UcareError::invalid(format!("invalid {what}, {e}")))
}

/// `<w>`, `x<h>` or `<w>x<h>`.
struct Dimensions(Option<u32>, Option<u32>);

impl Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(width) = self.0 {
            write!(f, "{width}")?;
        }
        if let Some(height) = self.1 {
            write!(f, "x{height}")?;
        }
        Ok(())
    }
}

/// `<cdn_url>-/crop/<w>x<h>/`; both sides are required.
pub fn crop_url(
    cdn_url: &str,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<String, UcareError> {
    match (nonzero(width), nonzero(height)) {
        (Some(w), Some(h)) => Ok(format!("{cdn_url}-/crop/{w}x{h}/")),
        _ => Err(UcareError::invalid("Need both width and height to crop")),
    }
}

/// `<cdn_url>-/resize/<dims>/`; at least one side is required.
pub fn resize_url(
    cdn_url: &str,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<String, UcareError> {
    let (width, height) = (nonzero(width), nonzero(height));
    if width.is_none() && height.is_none() {
        return Err(UcareError::invalid("Need width or height to resize"));
    }
    Ok(format!("{cdn_url}-/resize/{}/", Dimensions(width, height)))
}

fn nonzero(v: Option<u32>) -> Option<u32> {
    v.filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://ucarecdn.com/6c5e9526-b0fe-4739-8975-72e8d5ee6342/";

    #[test]
    fn test_parse_resize_both() {
        let req: DimensionRequest = "resized_300x200".parse().unwrap();
        assert_eq!(
            req,
            DimensionRequest {
                kind: DimensionKind::Resize,
                width: Some(300),
                height: Some(200),
            }
        );
    }

    #[test]
    fn test_parse_resize_one_side() {
        let req: DimensionRequest = "resized_300x".parse().unwrap();
        assert_eq!((req.width, req.height), (Some(300), None));

        let req: DimensionRequest = "resized_x200".parse().unwrap();
        assert_eq!((req.width, req.height), (None, Some(200)));

        let req: DimensionRequest = "resized_300".parse().unwrap();
        assert_eq!((req.width, req.height), (Some(300), None));
    }

    #[test]
    fn test_parse_crop() {
        let req: DimensionRequest = "cropped_x200".parse().unwrap();
        assert_eq!(req.kind, DimensionKind::Crop);
        assert_eq!((req.width, req.height), (None, Some(200)));
    }

    #[test]
    fn test_parse_invalid_components() {
        let err = "resized_abcx200".parse::<DimensionRequest>().unwrap_err();
        assert!(err.is_invalid_request());
        assert!(err.to_string().contains("invalid width"));

        let err = "cropped_100x2x".parse::<DimensionRequest>().unwrap_err();
        assert!(err.to_string().contains("invalid height"));
    }

    #[test]
    fn test_parse_unknown_prefix() {
        let err = "rotated_90".parse::<DimensionRequest>().unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_crop_url() {
        assert_eq!(
            crop_url(CDN, Some(300), Some(200)).unwrap(),
            format!("{CDN}-/crop/300x200/")
        );
        assert!(crop_url(CDN, None, Some(200)).unwrap_err().is_invalid_request());
        assert!(crop_url(CDN, Some(0), Some(200)).unwrap_err().is_invalid_request());
    }

    #[test]
    fn test_resize_url() {
        assert_eq!(
            resize_url(CDN, Some(300), Some(200)).unwrap(),
            format!("{CDN}-/resize/300x200/")
        );
        assert_eq!(
            resize_url(CDN, Some(300), None).unwrap(),
            format!("{CDN}-/resize/300/")
        );
        assert_eq!(
            resize_url(CDN, None, Some(200)).unwrap(),
            format!("{CDN}-/resize/x200/")
        );
        assert!(resize_url(CDN, None, None).unwrap_err().is_invalid_request());
    }
}
