use serde::Serialize;

use super::types::{StressOverride, YearReturn};

const fn yr(year: u32, annual_return: f64) -> YearReturn {
    YearReturn {
        year,
        annual_return,
    }
}

pub const RETURN_DATA: [YearReturn; 25] = [
    yr(2000, -0.1014),
    yr(2001, -0.1304),
    yr(2002, -0.2337),
    yr(2003, 0.2638),
    yr(2004, 0.0899),
    yr(2005, 0.030),
    yr(2006, 0.1362),
    yr(2007, 0.0353),
    yr(2008, -0.3849),
    yr(2009, 0.2345),
    yr(2010, 0.1278),
    yr(2011, 0.0),
    yr(2012, 0.1341),
    yr(2013, 0.2960),
    yr(2014, 0.1139),
    yr(2015, -0.0073),
    yr(2016, 0.0954),
    yr(2017, 0.1942),
    yr(2018, -0.0624),
    yr(2019, 0.2888),
    yr(2020, 0.1626),
    yr(2021, 0.2689),
    yr(2022, -0.1944),
    yr(2023, 0.2423),
    yr(2024, 0.2331),
];

pub fn first_year() -> u32 {
    RETURN_DATA[0].year
}

pub fn last_year() -> u32 {
    RETURN_DATA[RETURN_DATA.len() - 1].year
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StressScenario {
    Tech,
    Gfc,
    Covid,
}

impl StressScenario {
    pub const ALL: [StressScenario; 3] = [
        StressScenario::Tech,
        StressScenario::Gfc,
        StressScenario::Covid,
    ];

    pub fn loss(self) -> f64 {
        match self {
            StressScenario::Tech => -0.83,
            StressScenario::Gfc => -0.57,
            StressScenario::Covid => -0.34,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StressScenario::Tech => "Tech Wreck: 2000-2002",
            StressScenario::Gfc => "Financial Crisis: 2007-2009",
            StressScenario::Covid => "COVID Crisis: 2020",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StressScenario::Tech => {
                "The NASDAQ 100 fell from 4,704.73 (March 27, 2000) to 795.25 (October 9, 2002), \
                 a loss of roughly 83% as the dot-com bubble burst."
            }
            StressScenario::Gfc => {
                "The S&P 500 fell from 1,565.15 (October 9, 2007) to 676.53 (March 9, 2009), \
                 shedding nearly 57%."
            }
            StressScenario::Covid => {
                "The S&P 500 fell from 3,386.15 (February 19, 2020) to 2,237.40 (March 23, 2020), \
                 a decline of around 34%."
            }
        }
    }
}

pub fn slice_returns(start_year: u32, end_year: u32) -> Vec<YearReturn> {
    let filtered: Vec<YearReturn> = RETURN_DATA
        .iter()
        .filter(|entry| entry.year >= start_year && entry.year <= end_year)
        .copied()
        .collect();
    if filtered.is_empty() {
        log::warn!(
            "no returns between {start_year} and {end_year}; using {}-{}",
            first_year(),
            last_year()
        );
        return RETURN_DATA.to_vec();
    }
    filtered
}

pub fn apply_stress(returns: &[YearReturn], stress: Option<StressOverride>) -> Vec<YearReturn> {
    let Some(stress) = stress else {
        return returns.to_vec();
    };
    if !returns.iter().any(|entry| entry.year == stress.target_year) {
        log::warn!(
            "stress year {} is outside the selected span; ignoring {:?}",
            stress.target_year,
            stress.scenario
        );
    }
    returns
        .iter()
        .map(|entry| {
            if entry.year == stress.target_year {
                yr(entry.year, stress.scenario.loss())
            } else {
                *entry
            }
        })
        .collect()
}
