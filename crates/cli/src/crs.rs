//! Target CRS parsing and the metric-unit check.
//!
//! Crown radii are metres, so the output CRS must use metres too. Units are
//! looked up in a small table of common EPSG codes; anything else is unknown
//! and only accepted with `--assume-metric`.

use anyhow::{bail, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearUnit {
    Metre,
    Degree,
    Foot,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crs {
    pub authority: String,
    pub code: u32,
}

impl Crs {
    /// Parse `AUTH:CODE` (e.g. `EPSG:25832`); a bare number means EPSG.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (auth, code) = match s.split_once(':') {
            Some((a, c)) => (a.trim().to_ascii_uppercase(), c.trim()),
            None => ("EPSG".to_string(), s),
        };
        if auth.is_empty() {
            bail!("CRS {s:?} has an empty authority");
        }
        let code: u32 = code
            .parse()
            .map_err(|_| anyhow::anyhow!("CRS {s:?} has a non-numeric code"))?;
        Ok(Self {
            authority: auth,
            code,
        })
    }

    pub fn authid(&self) -> String {
        self.to_string()
    }

    /// OGC URN used in the GeoJSON `crs` member.
    pub fn urn(&self) -> String {
        format!("urn:ogc:def:crs:{}::{}", self.authority, self.code)
    }

    pub fn linear_unit(&self) -> LinearUnit {
        if self.authority != "EPSG" {
            return LinearUnit::Unknown;
        }
        match self.code {
            4326 | 4258 | 4269 | 4979 | 4167 | 4283 => LinearUnit::Degree,
            // WGS84 / UTM north and south
            32601..=32660 | 32701..=32760 => LinearUnit::Metre,
            // ETRS89 / UTM (zone-prefixed and plain variants)
            25828..=25838 | 3044..=3051 | 5649..=5653 => LinearUnit::Metre,
            // NAD83 / UTM
            26901..=26923 => LinearUnit::Metre,
            // DHDN Gauss-Krüger, MGI Austria, LV03/LV95, RD New, Lambert-93, BNG
            31466..=31469 | 31254..=31259 | 21781 | 2056 | 28992 | 2154 | 27700 => {
                LinearUnit::Metre
            }
            // Web Mercator, LAEA Europe, LCC Europe
            3857 | 900913 | 3035 | 3034 => LinearUnit::Metre,
            // NAD83 state plane (US survey feet)
            2222..=2289 => LinearUnit::Foot,
            _ => LinearUnit::Unknown,
        }
    }

    /// Fail unless the CRS uses metres. Unknown codes pass only with `assume_metric`.
    pub fn ensure_metric(&self, assume_metric: bool) -> Result<()> {
        match self.linear_unit() {
            LinearUnit::Metre => Ok(()),
            LinearUnit::Unknown if assume_metric => {
                tracing::warn!(crs = %self.authid(), "unit of CRS unknown; assuming metres");
                Ok(())
            }
            LinearUnit::Unknown => bail!(
                "Unit of CRS ({}) is unknown. Pass --assume-metric if it uses meters.",
                self.authid()
            ),
            LinearUnit::Degree | LinearUnit::Foot => bail!(
                "Selected CRS ({}) is not metric. Please choose one with meter units.",
                self.authid()
            ),
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}
