use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("birth year {0} is outside 1937..=2010")]
    BirthYear(u32),

    #[error("PIA must be a finite amount >= 0, got {0}")]
    Pia(f64),

    #[error("COLA rate must be finite and > -100%, got {0}")]
    ColaRate(f64),

    #[error("claiming age {age} is outside 62..=70")]
    ClaimingAge { age: u32 },

    #[error(
        "claiming ages must satisfy 62 <= early ({early}) < suspension ({suspension}) < restart ({restart}) <= 70"
    )]
    ClaimingOrder {
        early: u32,
        suspension: u32,
        restart: u32,
    },

    #[error("longevity age {longevity} must be >= {required}")]
    Longevity { longevity: u32, required: u32 },

    #[error("age {age} is past the planning limit of {max}")]
    AgeLimit { age: u32, max: u32 },

    #[error("claiming month {0} must be 0..=11")]
    ClaimMonth(u32),

    #[error("initial balance must be a finite amount >= 0, got {0}")]
    InitialBalance(f64),

    #[error("withdrawal rate must be between 0% and 100%, got {0}")]
    WithdrawalRate(f64),
}

pub type CalcResult<T> = Result<T, ValidationError>;
