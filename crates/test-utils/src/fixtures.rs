//! Common test fixtures: TLE sets and grid shapes.

/// Two-line element sets with valid checksums.
pub mod tle {
    /// The ISS set used in most SGP4 write-ups (epoch 2008-09-20).
    pub const ISS: &str = "ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
";

    /// GRACE-FO 1 style near-polar orbit (epoch 2024-04-09 12:00 UTC).
    pub const GRACE_FO_1: &str = "GRACE-FO 1
1 43476U 18047A   24100.50000000  .00001234  00000-0  45678-4 0  9990
2 43476  88.9950 120.1234 0018000 100.0000 260.3000 15.23500000321450
";

    /// ICESat-2 style orbit (epoch 2024-04-09 12:00 UTC).
    pub const ICESAT_2: &str = "ICESAT-2
1 43613U 18070A   24100.50000000  .00000800  00000-0  30000-4 0  9990
2 43613  92.0020 200.5000 0002500  90.0000 270.1000 15.28300000300007
";

    /// The ISS set without a name line.
    pub const ISS_TWO_LINE: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
";

    /// Last digit of line 1 altered.
    pub const BAD_CHECKSUM: &str = "ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2928
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
";

    /// Line 2 belongs to a different satellite.
    pub const MISMATCHED_CATALOG: &str = "MIXED
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 43476  88.9950 120.1234 0018000 100.0000 260.3000 15.23500000321450
";
}

/// Common grid shapes.
pub mod grid {
    /// GRACE JPL mascon grid: 0.5 degree, latitude ascending, 0..360 longitude.
    pub const GRACE_LAT_START: f64 = -89.75;
    pub const GRACE_LON_START: f64 = 0.25;
    pub const GRACE_RESOLUTION: f64 = 0.5;
    pub const GRACE_NLAT: usize = 360;
    pub const GRACE_NLON: usize = 720;

    /// ETOPO 2022 60 arc-second global grid.
    pub const ETOPO_60S_WIDTH: usize = 21600;
    pub const ETOPO_60S_HEIGHT: usize = 10800;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tle_lines_are_69_columns() {
        for text in [tle::ISS, tle::GRACE_FO_1, tle::ICESAT_2] {
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 3);
            assert_eq!(lines[1].len(), 69);
            assert_eq!(lines[2].len(), 69);
        }
    }
}
