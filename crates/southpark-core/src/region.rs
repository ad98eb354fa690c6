//! Regional site profiles
//!
//! Each supported site variant is a [`Region`]. Its [`RegionProfile`] holds
//! the domains and quirks needed to scrape it, including which episode list
//! [`Layout`] its season pages use.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Manifest namespace shared by every international site
const MEDIAGEN_INTL: &str = "southpark.intl";

/// Default path of the season index page
const SEASONS_URI: &str = "/seasons/south-park/";

/// Supported regional sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// English (North America)
    En,
    /// Spanish (North America)
    Es,
    /// German (Germany)
    De,
    /// Swedish (Sweden)
    Se,
    /// English (Europe)
    Eu,
    /// Portuguese (Brazil)
    Br,
    /// Spanish (Latin America)
    Lat,
}

/// How a season page lays out its episode list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Episodes live in the first `LineList` whose first item has a `url`;
    /// pagination comes from a separate `video-guide` list.
    LineList,
    /// Episodes and pagination both live in the `video-guide` `LineList`.
    VideoGuide,
}

/// Immutable per-region configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionProfile {
    /// Region this profile describes
    pub region: Region,
    /// Content language code
    pub language: String,
    /// Namespace used in manifest `mgid` references
    pub mediagen: String,
    /// Site root, e.g. `https://www.southpark.de`
    pub domain: String,
    /// Root used for API and continuation calls
    pub api_domain: String,
    /// Path of the season index page
    pub uri: String,
    /// Whether season links must be scraped from raw anchors
    pub html_links: bool,
    /// Whether the site shows ads (informational)
    pub has_ads: bool,
    /// Episode list layout of season pages
    pub layout: Layout,
}

impl Region {
    /// Every supported region, in CLI order
    pub const ALL: [Region; 7] = [
        Region::En,
        Region::Es,
        Region::De,
        Region::Se,
        Region::Eu,
        Region::Br,
        Region::Lat,
    ];

    /// Short region code, also used in catalog file names
    pub fn code(&self) -> &'static str {
        match self {
            Region::En => "en",
            Region::Es => "es",
            Region::De => "de",
            Region::Se => "se",
            Region::Eu => "eu",
            Region::Br => "br",
            Region::Lat => "lat",
        }
    }

    /// Episode list layout used by this region's season pages
    pub fn layout(&self) -> Layout {
        match self {
            Region::En | Region::Es | Region::Eu => Layout::LineList,
            Region::Se | Region::De | Region::Br | Region::Lat => Layout::VideoGuide,
        }
    }

    /// Build the site profile for this region
    pub fn profile(&self) -> RegionProfile {
        let (language, domain, api_domain, uri, html_links, has_ads) = match self {
            Region::En => (
                "en",
                "https://southparkstudios.com",
                "https://southparkstudios.com",
                SEASONS_URI,
                false,
                true,
            ),
            Region::Es => (
                "es",
                "https://southparkstudios.com",
                "https://southparkstudios.com",
                "/es/seasons/south-park/",
                false,
                true,
            ),
            Region::De => (
                "de",
                "https://www.southpark.de",
                "https://www.southpark.de",
                SEASONS_URI,
                true,
                false,
            ),
            Region::Se => (
                "se",
                "https://southparkstudios.nu",
                "https://www.southparkstudios.nu",
                SEASONS_URI,
                false,
                false,
            ),
            Region::Eu => (
                "en",
                "https://www.southparkstudios.com",
                "https://www.southparkstudios.com",
                SEASONS_URI,
                false,
                false,
            ),
            Region::Br => (
                "br",
                "https://www.southparkstudios.com.br",
                "https://www.southparkstudios.com.br",
                SEASONS_URI,
                true,
                false,
            ),
            Region::Lat => (
                "lat",
                "https://www.southpark.lat",
                "https://www.southpark.lat",
                SEASONS_URI,
                true,
                false,
            ),
        };

        RegionProfile {
            region: *self,
            language: language.to_string(),
            mediagen: MEDIAGEN_INTL.to_string(),
            domain: domain.to_string(),
            api_domain: api_domain.to_string(),
            uri: uri.to_string(),
            html_links,
            has_ads,
            layout: self.layout(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::InvalidRegion(s.to_string()))
    }
}

impl RegionProfile {
    /// Full URL of the season index page
    pub fn index_url(&self) -> String {
        format!("{}{}", self.domain, self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_codes_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_region_from_str_unknown() {
        let result = "xx".parse::<Region>();
        match result {
            Err(CatalogError::InvalidRegion(code)) => assert_eq!(code, "xx"),
            _ => panic!("Expected InvalidRegion error"),
        }
    }

    #[test]
    fn test_layout_families() {
        assert_eq!(Region::En.layout(), Layout::LineList);
        assert_eq!(Region::Es.layout(), Layout::LineList);
        assert_eq!(Region::Eu.layout(), Layout::LineList);
        assert_eq!(Region::De.layout(), Layout::VideoGuide);
        assert_eq!(Region::Se.layout(), Layout::VideoGuide);
        assert_eq!(Region::Br.layout(), Layout::VideoGuide);
        assert_eq!(Region::Lat.layout(), Layout::VideoGuide);
    }

    #[test]
    fn test_profile_values() {
        let se = Region::Se.profile();
        assert_eq!(se.domain, "https://southparkstudios.nu");
        assert_eq!(se.api_domain, "https://www.southparkstudios.nu");
        assert!(!se.html_links);

        let de = Region::De.profile();
        assert!(de.html_links);
        assert_eq!(de.index_url(), "https://www.southpark.de/seasons/south-park/");

        let es = Region::Es.profile();
        assert_eq!(
            es.index_url(),
            "https://southparkstudios.com/es/seasons/south-park/"
        );
        assert!(es.has_ads);

        // eu shares the english language code
        assert_eq!(Region::Eu.profile().language, "en");
    }

    #[test]
    fn test_all_profiles_use_intl_mediagen() {
        for region in Region::ALL {
            assert_eq!(region.profile().mediagen, "southpark.intl");
        }
    }
}
