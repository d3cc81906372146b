//! Amateur radio band presets.
//!
//! Provides a [`Band`] enum covering the HF amateur bands plus 6 meters.
//! The emulator uses it to pick the frequency it reports in its `IF` status
//! reply, so a client band decoder can be exercised on any band without
//! retuning a real radio.
//!
//! # Example
//!
//! ```
//! use rigsim_core::Band;
//!
//! let band: Band = "20m".parse().unwrap();
//! assert_eq!(band.default_freq(), 14_175_000);
//! assert_eq!(Band::from_freq(14_175_000), Some(Band::Band20m));
//! ```

use std::fmt;
use std::str::FromStr;

/// An inclusive frequency range in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandRange {
    /// Lower bound of the range in hertz (inclusive).
    pub low_hz: u64,
    /// Upper bound of the range in hertz (inclusive).
    pub high_hz: u64,
}

impl BandRange {
    /// Create a new band range.
    pub const fn new(low_hz: u64, high_hz: u64) -> Self {
        BandRange { low_hz, high_hz }
    }

    /// Check whether a frequency (in hertz) falls within this range (inclusive).
    pub fn contains(&self, freq_hz: u64) -> bool {
        freq_hz >= self.low_hz && freq_hz <= self.high_hz
    }
}

impl fmt::Display for BandRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} Hz", self.low_hz, self.high_hz)
    }
}

/// Standard amateur radio band.
///
/// Band edges follow ITU Region 2 allocations where they differ between
/// regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 160 meters (1.8–2.0 MHz).
    Band160m,
    /// 80 meters (3.5–4.0 MHz).
    Band80m,
    /// 60 meters (5.3305–5.4035 MHz).
    Band60m,
    /// 40 meters (7.0–7.3 MHz).
    Band40m,
    /// 30 meters (10.1–10.15 MHz).
    Band30m,
    /// 20 meters (14.0–14.35 MHz).
    Band20m,
    /// 17 meters (18.068–18.168 MHz).
    Band17m,
    /// 15 meters (21.0–21.45 MHz).
    Band15m,
    /// 12 meters (24.89–24.99 MHz).
    Band12m,
    /// 10 meters (28.0–29.7 MHz).
    Band10m,
    /// 6 meters (50.0–54.0 MHz).
    Band6m,
}

/// All bands in frequency order, lowest first.
const ALL_BANDS: &[Band] = &[
    Band::Band160m,
    Band::Band80m,
    Band::Band60m,
    Band::Band40m,
    Band::Band30m,
    Band::Band20m,
    Band::Band17m,
    Band::Band15m,
    Band::Band12m,
    Band::Band10m,
    Band::Band6m,
];

impl Band {
    /// Returns the band containing the given frequency, or `None` if the
    /// frequency does not fall within any of the supported bands.
    pub fn from_freq(freq_hz: u64) -> Option<Band> {
        ALL_BANDS
            .iter()
            .copied()
            .find(|band| band.freq_range().contains(freq_hz))
    }

    /// Returns the frequency range (lower and upper edges) for this band.
    pub fn freq_range(&self) -> BandRange {
        match self {
            Band::Band160m => BandRange::new(1_800_000, 2_000_000),
            Band::Band80m => BandRange::new(3_500_000, 4_000_000),
            Band::Band60m => BandRange::new(5_330_500, 5_403_500),
            Band::Band40m => BandRange::new(7_000_000, 7_300_000),
            Band::Band30m => BandRange::new(10_100_000, 10_150_000),
            Band::Band20m => BandRange::new(14_000_000, 14_350_000),
            Band::Band17m => BandRange::new(18_068_000, 18_168_000),
            Band::Band15m => BandRange::new(21_000_000, 21_450_000),
            Band::Band12m => BandRange::new(24_890_000, 24_990_000),
            Band::Band10m => BandRange::new(28_000_000, 29_700_000),
            Band::Band6m => BandRange::new(50_000_000, 54_000_000),
        }
    }

    /// Frequency the emulator reports when this band is selected.
    ///
    /// A phone-segment frequency inside the band; 20m is 14.175 MHz, the
    /// frequency of the canned status reply.
    pub fn default_freq(&self) -> u64 {
        match self {
            Band::Band160m => 1_850_000,
            Band::Band80m => 3_750_000,
            Band::Band60m => 5_357_000,
            Band::Band40m => 7_150_000,
            Band::Band30m => 10_125_000,
            Band::Band20m => 14_175_000,
            Band::Band17m => 18_130_000,
            Band::Band15m => 21_300_000,
            Band::Band12m => 24_950_000,
            Band::Band10m => 28_500_000,
            Band::Band6m => 50_150_000,
        }
    }

    /// Returns the short band name (e.g. "20m").
    pub fn name(&self) -> &'static str {
        match self {
            Band::Band160m => "160m",
            Band::Band80m => "80m",
            Band::Band60m => "60m",
            Band::Band40m => "40m",
            Band::Band30m => "30m",
            Band::Band20m => "20m",
            Band::Band17m => "17m",
            Band::Band15m => "15m",
            Band::Band12m => "12m",
            Band::Band10m => "10m",
            Band::Band6m => "6m",
        }
    }

    /// Returns a slice of all bands in frequency order (lowest first).
    pub fn all() -> &'static [Band] {
        ALL_BANDS
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string cannot be parsed into a [`Band`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBandError(String);

impl fmt::Display for ParseBandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown band: '{}'", self.0)
    }
}

impl std::error::Error for ParseBandError {}

impl FromStr for Band {
    type Err = ParseBandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let digits = lower.strip_suffix('m').unwrap_or(&lower);
        ALL_BANDS
            .iter()
            .copied()
            .find(|band| band.name().trim_end_matches('m') == digits)
            .ok_or_else(|| ParseBandError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_freq_hf_bands() {
        assert_eq!(Band::from_freq(1_840_000), Some(Band::Band160m));
        assert_eq!(Band::from_freq(3_573_000), Some(Band::Band80m));
        assert_eq!(Band::from_freq(7_074_000), Some(Band::Band40m));
        assert_eq!(Band::from_freq(14_175_000), Some(Band::Band20m));
        assert_eq!(Band::from_freq(21_074_000), Some(Band::Band15m));
        assert_eq!(Band::from_freq(28_074_000), Some(Band::Band10m));
        assert_eq!(Band::from_freq(50_313_000), Some(Band::Band6m));
    }

    #[test]
    fn from_freq_band_edges() {
        assert_eq!(Band::from_freq(14_000_000), Some(Band::Band20m));
        assert_eq!(Band::from_freq(14_350_000), Some(Band::Band20m));
        assert_eq!(Band::from_freq(13_999_999), None);
        assert_eq!(Band::from_freq(14_350_001), None);
    }

    #[test]
    fn from_freq_out_of_band() {
        assert_eq!(Band::from_freq(0), None);
        assert_eq!(Band::from_freq(13_500_000), None);
        assert_eq!(Band::from_freq(144_174_000), None);
    }

    #[test]
    fn default_freq_is_inside_band() {
        for &band in Band::all() {
            assert_eq!(
                Band::from_freq(band.default_freq()),
                Some(band),
                "default frequency of {band} should fall inside it"
            );
        }
    }

    #[test]
    fn twenty_meters_matches_canned_reply() {
        assert_eq!(Band::Band20m.default_freq(), 14_175_000);
    }

    #[test]
    fn from_str_with_and_without_suffix() {
        assert_eq!("20m".parse::<Band>().unwrap(), Band::Band20m);
        assert_eq!("160M".parse::<Band>().unwrap(), Band::Band160m);
        assert_eq!("40".parse::<Band>().unwrap(), Band::Band40m);
        assert_eq!("6".parse::<Band>().unwrap(), Band::Band6m);
    }

    #[test]
    fn from_str_invalid() {
        assert!("99m".parse::<Band>().is_err());
        assert!("abc".parse::<Band>().is_err());
        assert!("".parse::<Band>().is_err());
        assert!("2m".parse::<Band>().is_err());
    }

    #[test]
    fn display_round_trip() {
        for &band in Band::all() {
            let parsed: Band = band.to_string().parse().expect("should round-trip");
            assert_eq!(band, parsed);
        }
    }

    #[test]
    fn all_in_frequency_order() {
        let bands = Band::all();
        for pair in bands.windows(2) {
            assert!(
                pair[1].freq_range().low_hz > pair[0].freq_range().high_hz,
                "{} should be higher than {}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn band_range_display() {
        let range = Band::Band20m.freq_range();
        assert_eq!(range.to_string(), "14000000-14350000 Hz");
    }
}
