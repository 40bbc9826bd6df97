//! Region mapping
//!
//! Maps an environment domain (e.g. `mypurecloud.ie`) to the deployment
//! region serving it. Lookup is total: a domain with no known region
//! resolves to [`Region::Unmapped`], whose hosts are derived from the
//! domain string itself.

use std::fmt;

/// Known deployment regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionHost {
    UsEast1,
    EuWest1,
    EuCentral1,
    ApNortheast1,
    ApSoutheast2,
    UsWest2,
    CaCentral1,
    ApNortheast2,
    EuWest2,
    ApSouth1,
    UsEast2,
    SaEast1,
    MeCentral1,
    ApNortheast3,
    EuCentral2,
    MxCentral1,
    ApSoutheast1,
}

impl RegionHost {
    /// Every known region, in declaration order
    pub const ALL: [RegionHost; 17] = [
        RegionHost::UsEast1,
        RegionHost::EuWest1,
        RegionHost::EuCentral1,
        RegionHost::ApNortheast1,
        RegionHost::ApSoutheast2,
        RegionHost::UsWest2,
        RegionHost::CaCentral1,
        RegionHost::ApNortheast2,
        RegionHost::EuWest2,
        RegionHost::ApSouth1,
        RegionHost::UsEast2,
        RegionHost::SaEast1,
        RegionHost::MeCentral1,
        RegionHost::ApNortheast3,
        RegionHost::EuCentral2,
        RegionHost::MxCentral1,
        RegionHost::ApSoutheast1,
    ];

    /// Environment domain served by this region
    pub fn domain(self) -> &'static str {
        match self {
            RegionHost::UsEast1 => "mypurecloud.com",
            RegionHost::EuWest1 => "mypurecloud.ie",
            RegionHost::EuCentral1 => "mypurecloud.de",
            RegionHost::ApNortheast1 => "mypurecloud.jp",
            RegionHost::ApSoutheast2 => "mypurecloud.com.au",
            RegionHost::UsWest2 => "usw2.pure.cloud",
            RegionHost::CaCentral1 => "cac1.pure.cloud",
            RegionHost::ApNortheast2 => "apne2.pure.cloud",
            RegionHost::EuWest2 => "euw2.pure.cloud",
            RegionHost::ApSouth1 => "aps1.pure.cloud",
            RegionHost::UsEast2 => "use2.us-gov-pure.cloud",
            RegionHost::SaEast1 => "sae1.pure.cloud",
            RegionHost::MeCentral1 => "mec1.pure.cloud",
            RegionHost::ApNortheast3 => "apne3.pure.cloud",
            RegionHost::EuCentral2 => "euc2.pure.cloud",
            RegionHost::MxCentral1 => "mxc1.pure.cloud",
            RegionHost::ApSoutheast1 => "apse1.pure.cloud",
        }
    }

    /// Region identifier, e.g. `us_east_1`
    pub fn name(self) -> &'static str {
        match self {
            RegionHost::UsEast1 => "us_east_1",
            RegionHost::EuWest1 => "eu_west_1",
            RegionHost::EuCentral1 => "eu_central_1",
            RegionHost::ApNortheast1 => "ap_northeast_1",
            RegionHost::ApSoutheast2 => "ap_southeast_2",
            RegionHost::UsWest2 => "us_west_2",
            RegionHost::CaCentral1 => "ca_central_1",
            RegionHost::ApNortheast2 => "ap_northeast_2",
            RegionHost::EuWest2 => "eu_west_2",
            RegionHost::ApSouth1 => "ap_south_1",
            RegionHost::UsEast2 => "us_east_2",
            RegionHost::SaEast1 => "sa_east_1",
            RegionHost::MeCentral1 => "me_central_1",
            RegionHost::ApNortheast3 => "ap_northeast_3",
            RegionHost::EuCentral2 => "eu_central_2",
            RegionHost::MxCentral1 => "mx_central_1",
            RegionHost::ApSoutheast1 => "ap_southeast_1",
        }
    }

    /// Find the region serving an exact domain
    pub fn from_domain(domain: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.domain() == domain)
    }

    pub fn api_host(self) -> String {
        api_host_for(self.domain())
    }

    pub fn login_host(self) -> String {
        login_host_for(self.domain())
    }
}

impl fmt::Display for RegionHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of resolving an environment domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// The domain belongs to a known region
    Known(RegionHost),
    /// No region is known for the domain; hosts are built from it directly
    Unmapped(String),
}

impl Region {
    /// Resolve an environment domain. Never fails.
    pub fn resolve(domain: &str) -> Self {
        match RegionHost::from_domain(domain) {
            Some(host) => Region::Known(host),
            None => Region::Unmapped(domain.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Region::Known(_))
    }

    pub fn domain(&self) -> &str {
        match self {
            Region::Known(host) => host.domain(),
            Region::Unmapped(domain) => domain,
        }
    }

    pub fn api_host(&self) -> String {
        api_host_for(self.domain())
    }

    pub fn login_host(&self) -> String {
        login_host_for(self.domain())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Known(host) => write!(f, "{host}"),
            Region::Unmapped(domain) => f.write_str(domain),
        }
    }
}

fn api_host_for(domain: &str) -> String {
    format!("https://api.{domain}")
}

fn login_host_for(domain: &str) -> String {
    format!("https://login.{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_regions() {
        assert_eq!(Region::resolve("mypurecloud.com"), Region::Known(RegionHost::UsEast1));
        assert_eq!(Region::resolve("mypurecloud.com.au"), Region::Known(RegionHost::ApSoutheast2));
        assert_eq!(
            Region::resolve("use2.us-gov-pure.cloud"),
            Region::Known(RegionHost::UsEast2)
        );
        assert_eq!(RegionHost::EuWest1.api_host(), "https://api.mypurecloud.ie");
        assert_eq!(RegionHost::EuWest1.login_host(), "https://login.mypurecloud.ie");
    }

    #[test]
    fn test_every_region_resolves_to_itself() {
        for host in RegionHost::ALL {
            assert_eq!(Region::resolve(host.domain()), Region::Known(host));
        }
    }

    #[test]
    fn test_unmapped_falls_back_to_input() {
        for domain in ["inindca.com", "", "MYPURECLOUD.COM", "mypurecloud.com."] {
            let region = Region::resolve(domain);
            assert!(!region.is_known());
            assert_eq!(region.domain(), domain);
            assert_eq!(region.to_string(), domain);
        }
        assert_eq!(Region::resolve("inindca.com").api_host(), "https://api.inindca.com");
    }

    #[test]
    fn test_display_uses_region_name() {
        assert_eq!(Region::resolve("euc2.pure.cloud").to_string(), "eu_central_2");
    }
}
