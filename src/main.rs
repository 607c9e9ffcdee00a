//! Actuarial Math CLI
//!
//! Command-line front end for the calculators. Inputs are given as on the
//! web forms: rates as whole percentages, lists as comma/space-delimited text.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use actuarial_math::{
    batch::evaluate_batch,
    bonds::{bond_price, BondSchedule},
    calculator::{evaluate, CalcRequest, Scalar},
    config::EngineConfig,
    loans::LoanSchedule,
    report::{write_bond_schedule, write_loan_schedule},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "actuarial_math", version, about = "Financial mathematics calculators")]
struct Cli {
    /// Print responses as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Effective rate and force of interest from a nominal rate
    Nominal {
        #[arg(long)]
        nominal_pct: String,
        #[arg(long)]
        m: String,
    },
    /// Present and accumulated value of cashflows
    Cashflows {
        #[arg(long)]
        cashflows: String,
        #[arg(long)]
        rate_pct: String,
    },
    /// a(n,i), ä(n,i), s(n,i)
    Annuity {
        #[arg(long)]
        n: String,
        #[arg(long)]
        rate_pct: String,
    },
    /// Continuous annuity at a force of interest
    ContinuousAnnuity {
        #[arg(long)]
        n: String,
        #[arg(long)]
        force_pct: String,
    },
    /// Annuity payable m times per year
    MthlyAnnuity {
        #[arg(long)]
        years: String,
        #[arg(long)]
        rate_pct: String,
        #[arg(long)]
        m: String,
    },
    /// Increasing and decreasing annuities
    Arithmetic {
        #[arg(long)]
        n: String,
        #[arg(long)]
        rate_pct: String,
        #[arg(long, default_value = "1")]
        step: String,
    },
    /// Geometrically growing annuity
    Geometric {
        #[arg(long)]
        n: String,
        #[arg(long)]
        rate_pct: String,
        #[arg(long)]
        growth_pct: String,
    },
    /// Level payment loan schedule
    Loan {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        rate_pct: String,
        #[arg(long)]
        term: String,
    },
    /// Outstanding loan balance at time t
    Balance {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        rate_pct: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        t: String,
    },
    /// Bond price, optionally with its book-value schedule
    Bond {
        #[arg(long)]
        face: String,
        #[arg(long)]
        redemption: String,
        #[arg(long)]
        coupon_pct: String,
        #[arg(long)]
        yield_pct: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        schedule: bool,
    },
    /// Accrued interest with dirty and clean price
    Accrued {
        #[arg(long)]
        face: String,
        #[arg(long)]
        coupon_pct: String,
        #[arg(long)]
        yield_pct: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        days: String,
        #[arg(long)]
        period: String,
    },
    /// Accrued interest using actual days between coupon dates (YYYY-MM-DD)
    AccruedDates {
        #[arg(long)]
        face: String,
        #[arg(long)]
        coupon_pct: String,
        #[arg(long)]
        yield_pct: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        last_coupon: NaiveDate,
        #[arg(long)]
        settlement: NaiveDate,
        #[arg(long)]
        next_coupon: NaiveDate,
    },
    /// Duration and convexity of cashflows
    Duration {
        #[arg(long)]
        cashflows: String,
        #[arg(long)]
        rate_pct: String,
    },
    /// Discount factors, forwards and par yield from spot rates
    Curve {
        #[arg(long)]
        spots_pct: String,
    },
    /// Redington immunization check
    Immunization {
        #[arg(long)]
        liabilities: String,
        #[arg(long)]
        assets: String,
        #[arg(long)]
        rate_pct: String,
    },
    /// Par swap rate and swap value
    Swap {
        #[arg(long)]
        discount_factors: String,
        #[arg(long, default_value = "")]
        accruals: String,
        #[arg(long)]
        fixed_rate_pct: String,
        #[arg(long)]
        notional: String,
    },
    /// Deferred perpetuity-immediate
    Perpetuity {
        #[arg(long)]
        rate_pct: String,
        #[arg(long)]
        deferral: String,
    },
    /// DV01 and dollar duration
    Dv01 {
        #[arg(long)]
        price: String,
        #[arg(long)]
        modified_duration: String,
    },
    /// Time-weighted return of sub-period returns
    Twr {
        #[arg(long)]
        returns_pct: String,
    },
    /// Internal rate of return of cashflows from time 0
    Irr {
        #[arg(long)]
        cashflows: String,
    },
    /// Evaluate a JSON array of requests in parallel
    Batch {
        /// Path to the requests file
        file: PathBuf,
    },
    /// Write a loan or bond schedule as CSV
    ExportSchedule {
        #[arg(value_enum)]
        kind: ScheduleKind,
        /// Loan amount or bond face value
        #[arg(long)]
        amount: f64,
        /// Loan rate or bond yield, in percent
        #[arg(long)]
        rate_pct: f64,
        /// Number of periods; fractional parts are dropped
        #[arg(long)]
        term: f64,
        /// Bond coupon rate in percent
        #[arg(long, default_value_t = 0.0)]
        coupon_pct: f64,
        /// Bond redemption value (defaults to the face value)
        #[arg(long)]
        redemption: Option<f64>,
        /// Output file; standard output when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScheduleKind {
    Loan,
    Bond,
}

impl Command {
    fn into_request(self) -> Option<CalcRequest> {
        let s = |text: String| Scalar::Text(text);
        let request = match self {
            Command::Nominal { nominal_pct, m } => CalcRequest::NominalRate {
                nominal_pct: s(nominal_pct),
                m: s(m),
            },
            Command::Cashflows { cashflows, rate_pct } => CalcRequest::CashflowValue {
                cashflows: cashflows.into(),
                rate_pct: s(rate_pct),
            },
            Command::Annuity { n, rate_pct } => CalcRequest::LevelAnnuity {
                n: s(n),
                rate_pct: s(rate_pct),
            },
            Command::ContinuousAnnuity { n, force_pct } => CalcRequest::ContinuousAnnuity {
                n: s(n),
                force_pct: s(force_pct),
            },
            Command::MthlyAnnuity { years, rate_pct, m } => CalcRequest::MthlyAnnuity {
                years: s(years),
                rate_pct: s(rate_pct),
                m: s(m),
            },
            Command::Arithmetic { n, rate_pct, step } => CalcRequest::ArithmeticAnnuity {
                n: s(n),
                rate_pct: s(rate_pct),
                step: s(step),
            },
            Command::Geometric {
                n,
                rate_pct,
                growth_pct,
            } => CalcRequest::GeometricAnnuity {
                n: s(n),
                rate_pct: s(rate_pct),
                growth_pct: s(growth_pct),
            },
            Command::Loan {
                principal,
                rate_pct,
                term,
            } => CalcRequest::LoanSchedule {
                principal: s(principal),
                rate_pct: s(rate_pct),
                term: s(term),
            },
            Command::Balance {
                principal,
                rate_pct,
                term,
                t,
            } => CalcRequest::LoanBalance {
                principal: s(principal),
                rate_pct: s(rate_pct),
                term: s(term),
                t: s(t),
            },
            Command::Bond {
                face,
                redemption,
                coupon_pct,
                yield_pct,
                term,
                schedule,
            } => CalcRequest::BondPrice {
                face: s(face),
                redemption: s(redemption),
                coupon_pct: s(coupon_pct),
                yield_pct: s(yield_pct),
                term: s(term),
                schedule,
            },
            Command::Accrued {
                face,
                coupon_pct,
                yield_pct,
                term,
                days,
                period,
            } => CalcRequest::AccruedInterest {
                face: s(face),
                coupon_pct: s(coupon_pct),
                yield_pct: s(yield_pct),
                term: s(term),
                days: s(days),
                period: s(period),
            },
            Command::AccruedDates {
                face,
                coupon_pct,
                yield_pct,
                term,
                last_coupon,
                settlement,
                next_coupon,
            } => CalcRequest::AccruedInterestDates {
                face: s(face),
                coupon_pct: s(coupon_pct),
                yield_pct: s(yield_pct),
                term: s(term),
                last_coupon,
                settlement,
                next_coupon,
            },
            Command::Duration { cashflows, rate_pct } => CalcRequest::Duration {
                cashflows: cashflows.into(),
                rate_pct: s(rate_pct),
            },
            Command::Curve { spots_pct } => CalcRequest::TermStructure {
                spots_pct: spots_pct.into(),
            },
            Command::Immunization {
                liabilities,
                assets,
                rate_pct,
            } => CalcRequest::Immunization {
                liabilities: liabilities.into(),
                assets: assets.into(),
                rate_pct: s(rate_pct),
            },
            Command::Swap {
                discount_factors,
                accruals,
                fixed_rate_pct,
                notional,
            } => CalcRequest::Swap {
                discount_factors: discount_factors.into(),
                accruals: accruals.into(),
                fixed_rate_pct: s(fixed_rate_pct),
                notional: s(notional),
            },
            Command::Perpetuity { rate_pct, deferral } => CalcRequest::DeferredPerpetuity {
                rate_pct: s(rate_pct),
                deferral: s(deferral),
            },
            Command::Dv01 {
                price,
                modified_duration,
            } => CalcRequest::Dv01 {
                price: s(price),
                modified_duration: s(modified_duration),
            },
            Command::Twr { returns_pct } => CalcRequest::TimeWeightedReturn {
                returns_pct: returns_pct.into(),
            },
            Command::Irr { cashflows } => CalcRequest::Irr {
                cashflows: cashflows.into(),
            },
            Command::Batch { .. } | Command::ExportSchedule { .. } => return None,
        };
        Some(request)
    }
}

fn export_schedule<W: io::Write>(
    kind: ScheduleKind,
    amount: f64,
    rate_pct: f64,
    periods: u32,
    coupon_pct: f64,
    redemption: Option<f64>,
    writer: W,
) -> Result<()> {
    let i = rate_pct / 100.0;
    match kind {
        ScheduleKind::Loan => {
            let schedule = LoanSchedule::build(amount, periods, i);
            write_loan_schedule(&schedule, writer)?;
        }
        ScheduleKind::Bond => {
            let r = coupon_pct / 100.0;
            let c = redemption.unwrap_or(amount);
            let price = bond_price(amount, c, r, i, periods as f64);
            let schedule = BondSchedule::build(price, amount, r, i, periods);
            write_bond_schedule(&schedule, writer)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref()).context("loading engine config")?;

    match cli.command {
        Command::Batch { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let requests: Vec<CalcRequest> =
                serde_json::from_str(&text).context("parsing batch requests")?;
            info!("loaded {} requests from {}", requests.len(), file.display());

            let outcomes = evaluate_batch(&requests, &config);
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }

        Command::ExportSchedule {
            kind,
            amount,
            rate_pct,
            term,
            coupon_pct,
            redemption,
            output,
        } => {
            let periods = Scalar::from(term).resolve_periods("term")?;
            let writer: Box<dyn io::Write> = match &output {
                Some(path) => Box::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                ),
                None => Box::new(io::stdout()),
            };
            export_schedule(kind, amount, rate_pct, periods, coupon_pct, redemption, writer)?;
            if let Some(path) = output {
                info!("schedule written to {}", path.display());
            }
        }

        command => {
            if let Some(request) = command.into_request() {
                let response = evaluate(&request, &config)?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    println!("{}", response.render(&config.display));
                }
            }
        }
    }

    Ok(())
}
