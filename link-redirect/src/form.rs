use std::num::NonZeroUsize;

use link_alloc::AllocatorConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::FormError;

/// The fields posted by the control panel form.
///
/// Everything is optional and textual so that a bad submission is reported
/// on the panel rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetForm {
    pub count_per: Option<String>,
    pub group_size: Option<String>,
    pub url_list: Option<String>,
}

impl SetForm {
    /// Turns the submission into a validated allocator configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field is missing or not a number, or the
    /// numbers do not describe whole groups.
    pub fn into_config(self) -> Result<AllocatorConfig, FormError> {
        let count_per: usize = parse_number("countPer", self.count_per)?;
        let group_size: NonZeroUsize = parse_number("groupSize", self.group_size)?;
        let url_list = self.url_list.ok_or(FormError::MissingField("urlList"))?;

        let urls = parse_url_list(&url_list);
        if urls.is_empty() {
            warn!("submitted configuration has no usable links");
        }

        Ok(AllocatorConfig::new(urls, count_per, group_size).validate()?)
    }
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<T, FormError> {
    let value = value.ok_or(FormError::MissingField(field))?;
    value
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidNumber { field, value })
}

/// Splits a newline separated list into absolute URLs.
///
/// Lines are trimmed and blank lines skipped. Lines that are not absolute URLs
/// are dropped with a warning. Accepted links are stored in their serialized
/// form, so hosts are punycoded and paths percent-encoded and every stored link
/// is a valid `Location` header value.
pub fn parse_url_list(list: &str) -> Vec<String> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match Url::parse(line) {
            Ok(url) => Some(String::from(url)),
            Err(err) => {
                warn!(line, error = %err, "dropping invalid link");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use link_alloc::ConfigError;

    use super::*;

    fn form(count: &str, group: &str, urls: &str) -> SetForm {
        SetForm {
            count_per: Some(count.to_string()),
            group_size: Some(group.to_string()),
            url_list: Some(urls.to_string()),
        }
    }

    #[test]
    fn it_parses_a_submission() {
        let config = form("4", "2", "http://a.example\r\n  https://b.example/x?y=1  \n")
            .into_config()
            .unwrap();

        assert_eq!(config.quota_per_url(), 4);
        assert_eq!(config.group_size().get(), 2);
        assert_eq!(config.urls(), ["http://a.example/", "https://b.example/x?y=1"]);
    }

    #[test]
    fn it_drops_invalid_lines() {
        let urls = parse_url_list("http://a.example\nnot a url\n/relative/path\n\nmailto:x@y.z\n");

        assert_eq!(urls, ["http://a.example/", "mailto:x@y.z"]);
    }

    #[test]
    fn it_stores_links_in_header_safe_form() {
        let urls = parse_url_list(concat!(
            "http://a.example/%01x\n",
            "http://a.example/\u{1}x\n",
            "http://bü.example/ü\n"
        ));

        assert_eq!(
            urls,
            [
                "http://a.example/%01x",
                "http://a.example/%01x",
                "http://xn--b-eha.example/%C3%BC"
            ]
        );
        for url in &urls {
            assert!(http::HeaderValue::from_str(url).is_ok(), "{url}");
        }
    }

    #[test]
    fn test_missing_fields() {
        let mut f = form("4", "2", "http://a");
        f.count_per = None;
        assert_eq!(
            f.into_config().unwrap_err(),
            FormError::MissingField("countPer")
        );

        let mut f = form("4", "2", "http://a");
        f.group_size = None;
        assert_eq!(
            f.into_config().unwrap_err(),
            FormError::MissingField("groupSize")
        );

        let mut f = form("4", "2", "http://a");
        f.url_list = None;
        assert_eq!(
            f.into_config().unwrap_err(),
            FormError::MissingField("urlList")
        );
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(
            form("four", "2", "http://a").into_config().unwrap_err(),
            FormError::InvalidNumber {
                field: "countPer",
                value: "four".to_string()
            }
        );
        assert_eq!(
            form("4", "0", "http://a").into_config().unwrap_err(),
            FormError::InvalidNumber {
                field: "groupSize",
                value: "0".to_string()
            }
        );
        assert!(matches!(
            form("-1", "1", "http://a").into_config(),
            Err(FormError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_uneven_groups_are_rejected() {
        assert_eq!(
            form("5", "2", "http://a").into_config().unwrap_err(),
            FormError::Config(ConfigError::UnevenGroups {
                group_size: 2,
                quota_per_url: 5
            })
        );
    }

    #[test]
    fn test_empty_list_is_accepted() {
        let config = form("3", "1", "garbage\n").into_config().unwrap();

        assert!(config.urls().is_empty());
        assert_eq!(config.capacity(), 0);
    }
}
