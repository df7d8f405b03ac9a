const TAXABLE_MAXIMUM: [(u32, f64); 46] = [
    (1980, 25_900.0),
    (1981, 29_700.0),
    (1982, 32_400.0),
    (1983, 35_700.0),
    (1984, 37_800.0),
    (1985, 39_600.0),
    (1986, 42_000.0),
    (1987, 43_800.0),
    (1988, 45_000.0),
    (1989, 48_000.0),
    (1990, 51_300.0),
    (1991, 53_400.0),
    (1992, 55_500.0),
    (1993, 57_600.0),
    (1994, 60_600.0),
    (1995, 61_200.0),
    (1996, 62_700.0),
    (1997, 65_400.0),
    (1998, 68_400.0),
    (1999, 72_600.0),
    (2000, 76_200.0),
    (2001, 80_400.0),
    (2002, 84_900.0),
    (2003, 87_000.0),
    (2004, 87_900.0),
    (2005, 90_000.0),
    (2006, 94_200.0),
    (2007, 97_500.0),
    (2008, 102_000.0),
    (2009, 106_800.0),
    (2010, 106_800.0),
    (2011, 106_800.0),
    (2012, 110_100.0),
    (2013, 113_700.0),
    (2014, 117_000.0),
    (2015, 118_500.0),
    (2016, 118_500.0),
    (2017, 127_200.0),
    (2018, 128_400.0),
    (2019, 132_900.0),
    (2020, 137_700.0),
    (2021, 142_800.0),
    (2022, 147_000.0),
    (2023, 160_200.0),
    (2024, 168_600.0),
    (2025, 176_100.0),
];

pub fn taxable_maximum(year: u32) -> f64 {
    TAXABLE_MAXIMUM
        .iter()
        .find(|(y, _)| *y == year)
        .or_else(|| TAXABLE_MAXIMUM.last())
        .map_or(0.0, |(_, cap)| *cap)
}

pub fn cap_earnings(year: u32, earnings: f64) -> f64 {
    if !earnings.is_finite() {
        return 0.0;
    }
    earnings.clamp(0.0, taxable_maximum(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_years_are_contiguous() {
        assert!(TAXABLE_MAXIMUM.windows(2).all(|w| w[1].0 == w[0].0 + 1));
        assert!(TAXABLE_MAXIMUM.windows(2).all(|w| w[1].1 >= w[0].1));
    }

    #[test]
    fn known_years_return_their_cap() {
        assert_eq!(taxable_maximum(1980), 25_900.0);
        assert_eq!(taxable_maximum(2010), 106_800.0);
        assert_eq!(taxable_maximum(2025), 176_100.0);
    }

    #[test]
    fn years_outside_table_use_latest_cap() {
        assert_eq!(taxable_maximum(1975), 176_100.0);
        assert_eq!(taxable_maximum(2030), 176_100.0);
    }

    #[test]
    fn earnings_are_clipped() {
        assert_eq!(cap_earnings(2024, 250_000.0), 168_600.0);
        assert_eq!(cap_earnings(2024, 50_000.0), 50_000.0);
        assert_eq!(cap_earnings(2024, -10.0), 0.0);
        assert_eq!(cap_earnings(2024, f64::NAN), 0.0);
    }
}
