//! Query and body parameter types for the photo endpoints.
//!
//! Bounds are declared with `validator` derives and checked by the extractors
//! before any default is applied, so cache keys always carry effective values.

use pixgrid_core::photo::{DEFAULT_COUNT, DEFAULT_PAGE, DEFAULT_PER_PAGE};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// `?count=&query=` for `GET /photos/random`.
#[derive(Debug, Deserialize, Validate)]
pub struct RandomPhotosParams {
    #[validate(range(min = 1, max = 30, message = "must be between 1 and 30"))]
    pub count: Option<u32>,
    pub query: Option<String>,
}

impl RandomPhotosParams {
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(DEFAULT_COUNT)
    }
}

/// `?page=&perPage=` shared by the paginated endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<u32>,
    #[serde(rename = "perPage")]
    #[validate(range(min = 1, max = 30, message = "must be between 1 and 30"))]
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }
}

/// `?query=&page=&perPage=` for `GET /photos/search`.
///
/// Paging fields are repeated rather than flattened from [`PageParams`]:
/// `serde(flatten)` loses the numeric typing of urlencoded values.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchPhotosParams {
    #[serde(default)]
    pub query: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<u32>,
    #[serde(rename = "perPage")]
    #[validate(range(min = 1, max = 30, message = "must be between 1 and 30"))]
    pub per_page: Option<u32>,
}

impl SearchPhotosParams {
    pub fn paging(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Body of `POST /photos/{id}/download`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPhotoRequest {
    #[validate(custom(function = "not_blank", message = "must not be empty"))]
    pub download_url: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let params = PageParams {
            page: None,
            per_page: None,
        };
        assert!(params.validate().is_ok());
        assert_eq!((params.page(), params.per_page()), (1, 10));

        let random = RandomPhotosParams {
            count: None,
            query: None,
        };
        assert_eq!(random.count(), 10);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let too_big = PageParams {
            page: Some(1),
            per_page: Some(31),
        };
        let errors = too_big.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("per_page"));

        let zero_page = PageParams {
            page: Some(0),
            per_page: None,
        };
        assert!(zero_page.validate().is_err());

        let zero_count = RandomPhotosParams {
            count: Some(0),
            query: None,
        };
        assert!(zero_count.validate().is_err());
    }

    #[test]
    fn blank_download_url_is_rejected() {
        let body = DownloadPhotoRequest {
            download_url: "   ".into(),
        };
        assert!(body.validate().is_err());
    }
}
