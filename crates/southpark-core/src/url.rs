//! URL helper functions
//!
//! Builds page, manifest-service and continuation URLs for a region.

use crate::region::RegionProfile;

/// Default manifest service endpoint
pub const MANIFEST_SERVICE: &str = "https://media.mtvnservices.com/pmt/e1/access/index.html";

/// Builds a full page URL from a site-relative path
///
/// # Example
/// ```
/// use southpark_core::url::build_page_url;
/// let url = build_page_url("https://www.southpark.de", "/seasons/south-park/x/staffel-1");
/// assert_eq!(url, "https://www.southpark.de/seasons/south-park/x/staffel-1");
/// ```
pub fn build_page_url(domain: &str, path: &str) -> String {
    format!("{}{}", domain, path)
}

/// Builds the manifest service query for one episode
///
/// The episode page URL is passed as `ref` so the service scopes the
/// answer to the right region.
///
/// # Example
/// ```
/// use southpark_core::{Region, url::build_manifest_url};
/// let profile = Region::De.profile();
/// let url = build_manifest_url("https://media.example/index.html", &profile, "abc", "/episodes/abc/x");
/// assert_eq!(
///     url,
///     "https://media.example/index.html?uri=mgid:arc:episode:southpark.intl:abc&configtype=edge&ref=https://www.southpark.de/episodes/abc/x"
/// );
/// ```
pub fn build_manifest_url(
    service: &str,
    profile: &RegionProfile,
    uuid: &str,
    episode_url: &str,
) -> String {
    format!(
        "{}?uri=mgid:arc:episode:{}:{}&configtype=edge&ref={}{}",
        service, profile.mediagen, uuid, profile.api_domain, episode_url
    )
}

/// Builds the URL of a "load more" continuation
///
/// Colons in the continuation path are percent-encoded, everything else
/// is kept as the site emitted it.
///
/// # Example
/// ```
/// use southpark_core::url::build_continuation_url;
/// let url = build_continuation_url("https://www.southpark.de", "/api/context/mgid:arc:season:1/episode/1");
/// assert_eq!(url, "https://www.southpark.de/api/context/mgid%3Aarc%3Aseason%3A1/episode/1");
/// ```
pub fn build_continuation_url(api_domain: &str, load_more: &str) -> String {
    format!("{}{}", api_domain, load_more.replace(':', "%3A"))
}
