// src/utils/url.rs

//! Wiki URL construction helpers.

use url::Url;

use crate::error::Result;

/// Convert a page title to its URL form.
///
/// # Examples
/// ```
/// use itemwiki::utils::url::title_to_url;
///
/// assert_eq!(title_to_url("Dragon's Breath"), "Dragon%27s_Breath");
/// ```
pub fn title_to_url(title: &str) -> String {
    title.replace(' ', "_").replace('\'', "%27")
}

/// Convert a page identifier in URL form back to a readable title.
pub fn url_to_title(page: &str) -> String {
    page.replace("%27", "'").replace('_', " ")
}

/// Build `{base_url}/{path}?{params}` with properly encoded parameters.
pub fn with_query(base_url: &str, path: &str, params: &[(&str, &str)]) -> Result<String> {
    let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Ok(Url::parse_with_params(&endpoint, params)?.to_string())
}

/// URL of the MediaWiki action API.
pub fn api_php(base_url: &str, params: &[(&str, &str)]) -> Result<String> {
    with_query(base_url, "api.php", params)
}

/// URL of the special page that redirects to an uploaded file.
pub fn special_file_path(base_url: &str, image_url_name: &str) -> String {
    format!(
        "{}/wiki/Special:FilePath/{}",
        base_url.trim_end_matches('/'),
        image_url_name
    )
}

/// Host part of a URL, used to group cache files.
pub fn get_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_to_url() {
        assert_eq!(title_to_url("Amulet of Whispers"), "Amulet_of_Whispers");
        assert_eq!(title_to_url("Dragon's Breath"), "Dragon%27s_Breath");
        assert_eq!(title_to_url("Carsomyr"), "Carsomyr");
    }

    #[test]
    fn test_url_to_title() {
        assert_eq!(url_to_title("Dragon%27s_Breath_(item)"), "Dragon's Breath (item)");
        assert_eq!(url_to_title("Carsomyr"), "Carsomyr");
        assert_eq!(url_to_title(&title_to_url("Boots of Speed")), "Boots of Speed");
    }

    #[test]
    fn test_api_php_encodes_params() {
        let url = api_php(
            "https://example.fandom.com",
            &[("action", "query"), ("titles", "Dragon's Breath")],
        )
        .unwrap();
        assert!(url.starts_with("https://example.fandom.com/api.php?action=query&titles="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_special_file_path() {
        assert_eq!(
            special_file_path("https://example.fandom.com", "Carsomyr.png"),
            "https://example.fandom.com/wiki/Special:FilePath/Carsomyr.png"
        );
    }

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://Example.COM/api.php?x=1"),
            Some("example.com".to_string())
        );
        assert_eq!(get_domain("invalid-url"), None);
    }
}
