use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::backend::{
    EarningsEntry, OptimalStrategyResponse, PiaResponse, StrategyOption, classify_failure,
    pia_request,
};
use crate::core::{
    Claimant, ClaimingSchedule, FullRetirementAge, ProjectionInputs, ScheduleInputs,
    SequenceComparison, SequenceInputs, SequenceOrderCache, SequenceScenario,
    StartStopStartInputs, StrategyComparison, StressOverride, StressScenario, YearReturn,
    claiming_schedule, fra_years, full_retirement_age, run_projection, run_sequence_comparison,
    run_start_stop_start,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStressScenario {
    Tech,
    Gfc,
    Covid,
}

impl From<CliStressScenario> for StressScenario {
    fn from(value: CliStressScenario) -> Self {
        match value {
            CliStressScenario::Tech => StressScenario::Tech,
            CliStressScenario::Gfc => StressScenario::Gfc,
            CliStressScenario::Covid => StressScenario::Covid,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStressScenario {
    #[serde(alias = "techWreck", alias = "tech-wreck")]
    Tech,
    #[serde(alias = "financialCrisis", alias = "financial-crisis")]
    Gfc,
    Covid,
}

impl From<ApiStressScenario> for CliStressScenario {
    fn from(value: ApiStressScenario) -> Self {
        match value {
            ApiStressScenario::Tech => CliStressScenario::Tech,
            ApiStressScenario::Gfc => CliStressScenario::Gfc,
            ApiStressScenario::Covid => CliStressScenario::Covid,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ReplyKind {
    Pia,
    Strategy,
}

#[derive(Parser, Debug)]
#[command(
    name = "ssa-calc",
    about = "Social Security claiming strategies and sequence-of-returns risk"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value_t = 42,
        help = "Seed used when a return ordering is reshuffled"
    )]
    seed: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full retirement age for a birth year
    Fra(FraArgs),
    /// Compare start-stop-start with waiting until 70 and filing at 62
    StartStopStart(StartStopStartArgs),
    /// Benefit for every claiming month from 62 to 70
    Schedule(ScheduleArgs),
    /// Yearly benefits from 62 to 95 when claiming at 62, a preferred age, or 70
    Projection(ProjectionArgs),
    /// Run historical and shaped return sequences against a fixed withdrawal
    Sequence(SequenceArgs),
    /// Build a capped request body for the PIA-from-earnings backend
    PiaRequest(PiaRequestArgs),
    /// Read a saved response from the PIA or strategy backend
    BackendReply(BackendReplyArgs),
    /// Answer one request object, or an array of them, read as JSON
    Json(JsonArgs),
}

#[derive(Args, Debug, Clone)]
struct FraArgs {
    #[arg(long)]
    birth_year: u32,
}

#[derive(Args, Debug, Clone)]
struct StartStopStartArgs {
    #[arg(long, default_value_t = 3000.0, help = "Monthly PIA at full retirement age")]
    pia: f64,
    #[arg(long, default_value_t = 1960)]
    birth_year: u32,
    #[arg(long, default_value_t = 62)]
    early_filing_age: u32,
    #[arg(long, default_value_t = 67)]
    suspension_age: u32,
    #[arg(long, default_value_t = 70)]
    restart_age: u32,
    #[arg(long, default_value_t = 2.5, help = "Annual COLA in percent")]
    cola_rate: f64,
    #[arg(long, default_value_t = 95)]
    longevity_age: u32,
}

#[derive(Args, Debug, Clone)]
struct ScheduleArgs {
    #[arg(long, default_value_t = 3000.0, help = "Monthly PIA at full retirement age")]
    pia: f64,
    #[arg(long, default_value_t = 1960)]
    birth_year: u32,
    #[arg(long, default_value_t = 2.5, help = "Annual COLA in percent")]
    cola_rate: f64,
    #[arg(
        long,
        default_value_t = 85,
        help = "Age through which cumulative gains are counted"
    )]
    horizon_age: u32,
}

#[derive(Args, Debug, Clone)]
struct ProjectionArgs {
    #[arg(long, default_value_t = 4000.0, help = "Monthly PIA at full retirement age")]
    pia: f64,
    #[arg(long, default_value_t = 1965)]
    birth_year: u32,
    #[arg(long, default_value_t = 67)]
    claim_years: u32,
    #[arg(long, default_value_t = 0)]
    claim_months: u32,
    #[arg(long, help = "Adds a spouse to the household")]
    spouse_pia: Option<f64>,
    #[arg(long)]
    spouse_birth_year: Option<u32>,
    #[arg(long, default_value_t = 65)]
    spouse_claim_years: u32,
    #[arg(long, default_value_t = 0)]
    spouse_claim_months: u32,
    #[arg(long, default_value_t = 2.5, help = "Annual COLA in percent")]
    cola_rate: f64,
    #[arg(long, help = "Year from which only the larger spouse benefit is paid")]
    death_year: Option<u32>,
}

#[derive(Args, Debug, Clone)]
struct SequenceArgs {
    #[arg(long, default_value_t = 1_000_000.0)]
    initial_balance: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual withdrawal in percent of the initial balance"
    )]
    withdrawal_rate: f64,
    #[arg(long, default_value_t = 2000)]
    start_year: u32,
    #[arg(long, default_value_t = 2012)]
    end_year: u32,
    #[arg(long, value_enum, help = "Replace one year's return with a historical crash")]
    stress: Option<CliStressScenario>,
    #[arg(long, help = "Year replaced by --stress")]
    stress_year: Option<u32>,
    #[arg(long, default_value_t = false, help = "Shuffle the return order")]
    shuffle: bool,
}

#[derive(Args, Debug, Clone)]
struct PiaRequestArgs {
    #[arg(long)]
    birth_year: u32,
    #[arg(long, help = "JSON file holding [{year, earnings, is_projected}]")]
    earnings: PathBuf,
    #[arg(long, help = "Zero-earnings years from five years before this are kept")]
    current_year: u32,
}

#[derive(Args, Debug, Clone)]
struct BackendReplyArgs {
    #[arg(long, value_enum)]
    kind: ReplyKind,
    #[arg(long, help = "Saved response body")]
    body: Option<PathBuf>,
    #[arg(long, default_value_t = 200, help = "HTTP status of the response")]
    status: u16,
    #[arg(long, default_value_t = false, help = "No response arrived at all")]
    unreachable: bool,
}

#[derive(Args, Debug, Clone)]
struct JsonArgs {
    #[arg(long, help = "Request file; stdin when omitted")]
    input: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FraPayload {
    birth_year: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StartStopStartPayload {
    pia: Option<f64>,
    birth_year: Option<u32>,
    early_filing_age: Option<u32>,
    suspension_age: Option<u32>,
    restart_age: Option<u32>,
    cola_rate: Option<f64>,
    longevity_age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SchedulePayload {
    pia: Option<f64>,
    birth_year: Option<u32>,
    cola_rate: Option<f64>,
    horizon_age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    pia: Option<f64>,
    birth_year: Option<u32>,
    claim_years: Option<u32>,
    claim_months: Option<u32>,
    spouse_pia: Option<f64>,
    spouse_birth_year: Option<u32>,
    spouse_claim_years: Option<u32>,
    spouse_claim_months: Option<u32>,
    cola_rate: Option<f64>,
    death_year: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SequencePayload {
    initial_balance: Option<f64>,
    withdrawal_rate: Option<f64>,
    start_year: Option<u32>,
    end_year: Option<u32>,
    stress_scenario: Option<ApiStressScenario>,
    stress_year: Option<u32>,
    #[serde(alias = "randomize")]
    reshuffle: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
enum RequestPayload {
    Fra(FraPayload),
    #[serde(alias = "startStopStart")]
    StartStopStart(StartStopStartPayload),
    Schedule(SchedulePayload),
    #[serde(alias = "retirement")]
    Projection(ProjectionPayload),
    Sequence(SequencePayload),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Batch(Vec<RequestPayload>),
    Single(RequestPayload),
}

#[derive(Debug)]
enum ApiRequest {
    Fra(u32),
    StartStopStart(StartStopStartInputs),
    Schedule(ScheduleInputs),
    Projection(ProjectionInputs),
    Sequence {
        inputs: SequenceInputs,
        reshuffle: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FraResponse {
    birth_year: u32,
    fra: FullRetirementAge,
    fra_years: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StressResponse {
    scenario: StressScenario,
    label: &'static str,
    description: &'static str,
    target_year: u32,
    loss: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceChart {
    labels: Vec<String>,
    historical: Vec<f64>,
    strategy_one: Vec<f64>,
    strategy_two: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SequenceResponse {
    initial_balance: f64,
    withdrawal_rate: f64,
    annual_withdrawal: f64,
    stress: Option<StressResponse>,
    ordered_returns: Vec<YearReturn>,
    historical: SequenceScenario,
    strategy_one: SequenceScenario,
    strategy_two: SequenceScenario,
    chart: BalanceChart,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategyReply<'a> {
    best: Option<&'a StrategyOption>,
    strategy_count: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// One calculator session. The return-ordering cache lives here so that
/// separate sessions never see each other's shuffles.
pub struct Session {
    order_cache: SequenceOrderCache,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            order_cache: SequenceOrderCache::new(seed),
        }
    }

    /// Answers a JSON request object, or an array of them in order. Failed
    /// entries in an array become `{"error": ...}` objects.
    pub fn handle_json(&mut self, json: &str) -> Result<serde_json::Value, String> {
        let input = serde_json::from_str::<JsonInput>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        match input {
            JsonInput::Single(payload) => {
                let request = api_request_from_payload(payload)?;
                self.handle(request)
            }
            JsonInput::Batch(payloads) => {
                let mut responses = Vec::with_capacity(payloads.len());
                for payload in payloads {
                    let response = api_request_from_payload(payload)
                        .and_then(|request| self.handle(request))
                        .or_else(|error| to_json(ErrorResponse { error }))?;
                    responses.push(response);
                }
                Ok(serde_json::Value::Array(responses))
            }
        }
    }

    fn handle(&mut self, request: ApiRequest) -> Result<serde_json::Value, String> {
        match request {
            ApiRequest::Fra(birth_year) => to_json(fra_response(birth_year)),
            ApiRequest::StartStopStart(inputs) => {
                let comparison: StrategyComparison =
                    run_start_stop_start(&inputs).map_err(|e| e.to_string())?;
                to_json(comparison)
            }
            ApiRequest::Schedule(inputs) => {
                let schedule: ClaimingSchedule =
                    claiming_schedule(&inputs).map_err(|e| e.to_string())?;
                to_json(schedule)
            }
            ApiRequest::Projection(inputs) => {
                let report = run_projection(&inputs).map_err(|e| e.to_string())?;
                to_json(report)
            }
            ApiRequest::Sequence { inputs, reshuffle } => {
                let comparison = run_sequence_comparison(&inputs, &mut self.order_cache, reshuffle)
                    .map_err(|e| e.to_string())?;
                to_json(build_sequence_response(&inputs, comparison))
            }
        }
    }
}

/// Runs the parsed command line and returns the pretty-printed response.
pub fn run(cli: Cli) -> Result<String, String> {
    let mut session = Session::new(cli.seed);
    let response = match cli.command {
        Command::Fra(args) => to_json(fra_response(args.birth_year))?,
        Command::StartStopStart(args) => {
            session.handle(ApiRequest::StartStopStart(build_start_stop_start(args)?))?
        }
        Command::Schedule(args) => session.handle(ApiRequest::Schedule(build_schedule(args)?))?,
        Command::Projection(args) => {
            session.handle(ApiRequest::Projection(build_projection(args)?))?
        }
        Command::Sequence(args) => {
            let reshuffle = args.shuffle;
            let inputs = build_sequence(args)?;
            session.handle(ApiRequest::Sequence { inputs, reshuffle })?
        }
        Command::PiaRequest(args) => {
            let raw = fs::read_to_string(&args.earnings)
                .map_err(|e| format!("failed to read {}: {e}", args.earnings.display()))?;
            let history = serde_json::from_str::<Vec<EarningsEntry>>(&raw)
                .map_err(|e| format!("--earnings must hold an array of earnings rows: {e}"))?;
            to_json(pia_request(args.birth_year, &history, args.current_year))?
        }
        Command::BackendReply(args) => {
            let body = match &args.body {
                Some(path) => fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
                None => String::new(),
            };
            let status = (!args.unreachable).then_some(args.status);
            read_backend_reply(args.kind, status, &body)?
        }
        Command::Json(args) => {
            let raw = match &args.input {
                Some(path) => fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
                None => io::read_to_string(io::stdin())
                    .map_err(|e| format!("failed to read stdin: {e}"))?,
            };
            session.handle_json(&raw)?
        }
    };
    serde_json::to_string_pretty(&response).map_err(|e| format!("failed to render response: {e}"))
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| format!("failed to serialize response: {e}"))
}

fn fra_response(birth_year: u32) -> FraResponse {
    FraResponse {
        birth_year,
        fra: full_retirement_age(birth_year),
        fra_years: fra_years(birth_year),
    }
}

fn build_start_stop_start(args: StartStopStartArgs) -> Result<StartStopStartInputs, String> {
    if !args.cola_rate.is_finite() || args.cola_rate <= -100.0 {
        return Err("--cola-rate must be > -100".to_string());
    }
    if args.restart_age > 70 {
        return Err("--restart-age must be <= 70; delayed credits stop at 70".to_string());
    }
    if args.longevity_age < args.restart_age {
        return Err("--longevity-age must be >= --restart-age".to_string());
    }
    Ok(StartStopStartInputs {
        pia: args.pia,
        birth_year: args.birth_year,
        early_filing_age: args.early_filing_age,
        suspension_age: args.suspension_age,
        restart_age: args.restart_age,
        cola_rate: args.cola_rate / 100.0,
        longevity_age: args.longevity_age,
    })
}

fn build_schedule(args: ScheduleArgs) -> Result<ScheduleInputs, String> {
    if !args.cola_rate.is_finite() || args.cola_rate <= -100.0 {
        return Err("--cola-rate must be > -100".to_string());
    }
    Ok(ScheduleInputs {
        pia: args.pia,
        birth_year: args.birth_year,
        cola_rate: args.cola_rate / 100.0,
        horizon_age: args.horizon_age,
    })
}

fn build_projection(args: ProjectionArgs) -> Result<ProjectionInputs, String> {
    if !args.cola_rate.is_finite() || args.cola_rate <= -100.0 {
        return Err("--cola-rate must be > -100".to_string());
    }
    let spouse = match (args.spouse_pia, args.spouse_birth_year) {
        (Some(pia), Some(birth_year)) => Some(Claimant {
            pia,
            birth_year,
            preferred_years: args.spouse_claim_years,
            preferred_months: args.spouse_claim_months,
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err("--spouse-birth-year is required with --spouse-pia".to_string());
        }
        (None, Some(_)) => {
            return Err("--spouse-pia is required with --spouse-birth-year".to_string());
        }
    };
    if args.death_year.is_some() && spouse.is_none() {
        return Err("--death-year requires a spouse (--spouse-pia)".to_string());
    }
    Ok(ProjectionInputs {
        primary: Claimant {
            pia: args.pia,
            birth_year: args.birth_year,
            preferred_years: args.claim_years,
            preferred_months: args.claim_months,
        },
        spouse,
        cola_rate: args.cola_rate / 100.0,
        death_year: args.death_year,
    })
}

fn read_backend_reply(
    kind: ReplyKind,
    status: Option<u16>,
    body: &str,
) -> Result<serde_json::Value, String> {
    if !status.is_some_and(|code| (200..300).contains(&code)) {
        return Err(classify_failure(status, body).to_string());
    }
    match kind {
        ReplyKind::Pia => {
            let response = serde_json::from_str::<PiaResponse>(body)
                .map_err(|e| format!("Invalid PIA response: {e}"))?;
            to_json(response)
        }
        ReplyKind::Strategy => {
            let response = serde_json::from_str::<OptimalStrategyResponse>(body)
                .map_err(|e| format!("Invalid strategy response: {e}"))?;
            to_json(StrategyReply {
                best: response.best(),
                strategy_count: response.all_strategies.len(),
            })
        }
    }
}

fn build_sequence(args: SequenceArgs) -> Result<SequenceInputs, String> {
    let stress = match (args.stress, args.stress_year) {
        (Some(scenario), Some(target_year)) => Some(StressOverride {
            scenario: scenario.into(),
            target_year,
        }),
        (None, None) => None,
        (Some(_), None) => return Err("--stress-year is required with --stress".to_string()),
        (None, Some(_)) => return Err("--stress is required with --stress-year".to_string()),
    };
    if let Some(stress) = stress {
        let (first, last) = (
            args.start_year.min(args.end_year),
            args.start_year.max(args.end_year),
        );
        if !(first..=last).contains(&stress.target_year) {
            return Err("--stress-year must fall between --start-year and --end-year".to_string());
        }
    }
    Ok(SequenceInputs {
        initial_balance: args.initial_balance,
        withdrawal_rate: args.withdrawal_rate,
        start_year: args.start_year,
        end_year: args.end_year,
        stress,
    })
}

fn build_sequence_response(
    inputs: &SequenceInputs,
    comparison: SequenceComparison,
) -> SequenceResponse {
    let labels = std::iter::once("Start".to_string())
        .chain(
            comparison
                .ordered_returns
                .iter()
                .map(|entry| entry.year.to_string()),
        )
        .collect();
    let chart = BalanceChart {
        labels,
        historical: comparison.historical.balance_series(inputs.initial_balance),
        strategy_one: comparison.strategy_one.balance_series(inputs.initial_balance),
        strategy_two: comparison.strategy_two.balance_series(inputs.initial_balance),
    };
    let stress = inputs.stress.map(|stress| StressResponse {
        scenario: stress.scenario,
        label: stress.scenario.label(),
        description: stress.scenario.description(),
        target_year: stress.target_year,
        loss: stress.scenario.loss(),
    });
    SequenceResponse {
        initial_balance: inputs.initial_balance,
        withdrawal_rate: inputs.withdrawal_rate,
        annual_withdrawal: comparison.annual_withdrawal,
        stress,
        ordered_returns: comparison.ordered_returns,
        historical: comparison.historical,
        strategy_one: comparison.strategy_one,
        strategy_two: comparison.strategy_two,
        chart,
    }
}

fn default_start_stop_start_args() -> StartStopStartArgs {
    StartStopStartArgs {
        pia: 3_000.0,
        birth_year: 1960,
        early_filing_age: 62,
        suspension_age: 67,
        restart_age: 70,
        cola_rate: 2.5,
        longevity_age: 95,
    }
}

fn default_schedule_args() -> ScheduleArgs {
    ScheduleArgs {
        pia: 3_000.0,
        birth_year: 1960,
        cola_rate: 2.5,
        horizon_age: 85,
    }
}

fn default_projection_args() -> ProjectionArgs {
    ProjectionArgs {
        pia: 4_000.0,
        birth_year: 1965,
        claim_years: 67,
        claim_months: 0,
        spouse_pia: None,
        spouse_birth_year: None,
        spouse_claim_years: 65,
        spouse_claim_months: 0,
        cola_rate: 2.5,
        death_year: None,
    }
}

fn default_sequence_args() -> SequenceArgs {
    SequenceArgs {
        initial_balance: 1_000_000.0,
        withdrawal_rate: 0.0,
        start_year: 2000,
        end_year: 2012,
        stress: None,
        stress_year: None,
        shuffle: false,
    }
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<RequestPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: RequestPayload) -> Result<ApiRequest, String> {
    match payload {
        RequestPayload::Fra(payload) => {
            let Some(birth_year) = payload.birth_year else {
                return Err("birthYear is required".to_string());
            };
            Ok(ApiRequest::Fra(birth_year))
        }
        RequestPayload::StartStopStart(payload) => {
            let mut args = default_start_stop_start_args();
            if let Some(v) = payload.pia {
                args.pia = v;
            }
            if let Some(v) = payload.birth_year {
                args.birth_year = v;
            }
            if let Some(v) = payload.early_filing_age {
                args.early_filing_age = v;
            }
            if let Some(v) = payload.suspension_age {
                args.suspension_age = v;
            }
            if let Some(v) = payload.restart_age {
                args.restart_age = v;
            }
            if let Some(v) = payload.cola_rate {
                args.cola_rate = v;
            }
            if let Some(v) = payload.longevity_age {
                args.longevity_age = v;
            }
            Ok(ApiRequest::StartStopStart(build_start_stop_start(args)?))
        }
        RequestPayload::Schedule(payload) => {
            let mut args = default_schedule_args();
            if let Some(v) = payload.pia {
                args.pia = v;
            }
            if let Some(v) = payload.birth_year {
                args.birth_year = v;
            }
            if let Some(v) = payload.cola_rate {
                args.cola_rate = v;
            }
            if let Some(v) = payload.horizon_age {
                args.horizon_age = v;
            }
            Ok(ApiRequest::Schedule(build_schedule(args)?))
        }
        RequestPayload::Projection(payload) => {
            let mut args = default_projection_args();
            if let Some(v) = payload.pia {
                args.pia = v;
            }
            if let Some(v) = payload.birth_year {
                args.birth_year = v;
            }
            if let Some(v) = payload.claim_years {
                args.claim_years = v;
            }
            if let Some(v) = payload.claim_months {
                args.claim_months = v;
            }
            if let Some(v) = payload.spouse_pia {
                args.spouse_pia = Some(v);
            }
            if let Some(v) = payload.spouse_birth_year {
                args.spouse_birth_year = Some(v);
            }
            if let Some(v) = payload.spouse_claim_years {
                args.spouse_claim_years = v;
            }
            if let Some(v) = payload.spouse_claim_months {
                args.spouse_claim_months = v;
            }
            if let Some(v) = payload.cola_rate {
                args.cola_rate = v;
            }
            if let Some(v) = payload.death_year {
                args.death_year = Some(v);
            }
            Ok(ApiRequest::Projection(build_projection(args)?))
        }
        RequestPayload::Sequence(payload) => {
            let mut args = default_sequence_args();
            if let Some(v) = payload.initial_balance {
                args.initial_balance = v;
            }
            if let Some(v) = payload.withdrawal_rate {
                args.withdrawal_rate = v;
            }
            if let Some(v) = payload.start_year {
                args.start_year = v;
            }
            if let Some(v) = payload.end_year {
                args.end_year = v;
            }
            if let Some(v) = payload.stress_scenario {
                args.stress = Some(v.into());
            }
            if let Some(v) = payload.stress_year {
                args.stress_year = Some(v);
            }
            let reshuffle = payload.reshuffle.unwrap_or(false);
            Ok(ApiRequest::Sequence {
                inputs: build_sequence(args)?,
                reshuffle,
            })
        }
    }
}
