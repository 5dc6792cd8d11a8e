//! Financial projection CLI
//!
//! Command-line front end for the calculators. Missing arguments fall back to
//! the calculator defaults (built in, or loaded with `--defaults`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use finproj::amortization::{amortize, mortgage, LoanInput, MortgageInput};
use finproj::growth::{
    compound_interest, fixed_deposit, periodic_investment, CompoundInput, FixedDepositInput,
    PeriodicInvestmentInput,
};
use finproj::payoff::{compare_payoff, PayoffInput};
use finproj::rates::{convert, ConversionDirection, RateConversionInput};
use finproj::retirement::{simulate, DrawdownOutcome, RetirementInput};
use finproj::tax::{evaluate, TaxInput, TaxTables};
use finproj::{CalculatorDefaults, CompoundingFrequency, FilingStatus};

#[derive(Debug, Parser)]
#[command(name = "finproj", version, about = "Deterministic financial projection calculators")]
struct Cli {
    /// JSON file overriding the built-in calculator defaults
    #[arg(long, global = true)]
    defaults: Option<PathBuf>,

    /// Directory with brackets.csv and filing_parameters.csv
    #[arg(long, global = true)]
    tax_tables: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write the schedule rows to a CSV file (not available for convert;
    /// payoff writes both strategies)
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Level-payment loan or EMI schedule
    Loan {
        #[arg(long)]
        principal: Option<f64>,
        /// Annual rate in percent
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        months: Option<u32>,
        /// Due date of the first payment (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Mortgage with escrow and mortgage insurance
    Mortgage {
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        down: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        property_tax: Option<f64>,
        #[arg(long)]
        insurance: Option<f64>,
        #[arg(long)]
        hoa: Option<f64>,
        #[arg(long)]
        pmi_rate: Option<f64>,
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Lump-sum compound interest
    Compound {
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        frequency: Option<CompoundingFrequency>,
    },
    /// Fixed deposit with simple-interest comparison
    Fd {
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        months: Option<u32>,
        #[arg(long)]
        frequency: Option<CompoundingFrequency>,
    },
    /// Systematic monthly investment
    Sip {
        #[arg(long)]
        contribution: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
    },
    /// Federal, payroll and state tax estimate
    Tax {
        #[arg(long)]
        income: Option<f64>,
        #[arg(long)]
        status: Option<FilingStatus>,
        #[arg(long, default_value_t = 0.0)]
        itemized: f64,
        #[arg(long, default_value_t = 0.0)]
        credits: f64,
        #[arg(long)]
        state_rate: Option<f64>,
    },
    /// Retirement accumulation and drawdown
    Retirement {
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        retire_at: Option<u32>,
        #[arg(long)]
        savings: Option<f64>,
        #[arg(long)]
        contribution: Option<f64>,
        #[arg(long)]
        return_rate: Option<f64>,
        #[arg(long)]
        inflation: Option<f64>,
        #[arg(long)]
        income: Option<f64>,
    },
    /// Minimum-only vs. accelerated payoff
    Payoff {
        #[arg(long)]
        balance: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        minimum: Option<f64>,
        #[arg(long)]
        extra: Option<f64>,
    },
    /// APR to APY (or APY to APR with --to-apr)
    Convert {
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        to_apr: bool,
        #[arg(long, default_value = "monthly")]
        frequency: CompoundingFrequency,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    check_csv_supported(&cli)?;

    let defaults = match &cli.defaults {
        Some(path) => CalculatorDefaults::from_json_path(path)
            .with_context(|| format!("loading defaults from {}", path.display()))?,
        None => CalculatorDefaults::default(),
    };

    match &cli.command {
        Command::Loan { principal, rate, months, start } => {
            let d = &defaults.loan;
            let input = LoanInput {
                principal: principal.unwrap_or(d.principal),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                term_months: months.unwrap_or(d.term_months),
                start_date: *start,
            };
            input.validate()?;
            let result = amortize(&input);
            write_rows(&cli.csv, &result.entries)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Monthly payment: {:>14.2}", result.periodic_payment);
            println!("Total interest:  {:>14.2}", result.total_interest);
            println!("Total paid:      {:>14.2}", result.total_paid);
            println!("Interest share:  {:>13.2}%", result.interest_share_percent());
            println!();
            println!("{:>4} {:>14} {:>14} {:>14} {:>16}", "Year", "Paid", "Principal", "Interest", "Balance");
            for year in result.yearly_summary() {
                println!(
                    "{:>4} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
                    year.year, year.payment, year.principal, year.interest, year.closing_balance
                );
            }
        }
        Command::Mortgage {
            price,
            down,
            rate,
            years,
            property_tax,
            insurance,
            hoa,
            pmi_rate,
            start,
        } => {
            let d = &defaults.mortgage;
            let home_price = price.unwrap_or(d.home_price);
            let input = MortgageInput {
                home_price,
                down_payment: down.unwrap_or(home_price * d.down_payment_percent / 100.0),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                term_years: years.unwrap_or(d.term_years),
                property_tax_annual: property_tax.unwrap_or(d.property_tax_annual),
                insurance_annual: insurance.unwrap_or(d.insurance_annual),
                hoa_monthly: hoa.unwrap_or(d.hoa_monthly),
                pmi_rate_percent: pmi_rate.unwrap_or(d.pmi_rate_percent),
                start_date: *start,
            };
            input.validate()?;
            let result = mortgage(&input);
            write_rows(&cli.csv, &result.schedule)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Loan amount:        {:>12.2} ({:.2}% down)", result.loan_amount, result.down_payment_percent);
            println!("Principal+interest: {:>12.2}", result.monthly_payment);
            println!("Property tax:       {:>12.2}", result.monthly_property_tax);
            println!("Insurance:          {:>12.2}", result.monthly_insurance);
            println!("HOA:                {:>12.2}", result.monthly_hoa);
            println!("Mortgage insurance: {:>12.2}", result.initial_monthly_pmi);
            println!("Total monthly:      {:>12.2}", result.total_monthly_payment);
            match result.pmi_drop_off_period {
                Some(period) => println!("PMI drops off in month {}", period),
                None if result.pmi_required => println!("PMI never drops off"),
                None => println!("PMI not required"),
            }
            println!("Total interest:     {:>12.2}", result.total_interest);
            println!("Total cost:         {:>12.2}", result.total_cost);
        }
        Command::Compound { principal, rate, years, frequency } => {
            let d = &defaults.growth;
            let input = CompoundInput {
                principal: principal.unwrap_or(d.principal),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                years: years.unwrap_or(d.years),
                frequency: frequency.unwrap_or(d.frequency),
            };
            input.validate()?;
            let result = compound_interest(&input);
            write_rows(&cli.csv, &result.breakdown)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Final amount:   {:>14.2}", result.final_amount);
            println!("Total interest: {:>14.2}", result.total_interest);
        }
        Command::Fd { principal, rate, months, frequency } => {
            let d = &defaults.growth;
            let input = FixedDepositInput {
                principal: principal.unwrap_or(d.principal),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                tenure_months: months.unwrap_or(d.deposit_tenure_months),
                frequency: frequency.unwrap_or(CompoundingFrequency::Quarterly),
            };
            input.validate()?;
            let result = fixed_deposit(&input);
            write_rows(&cli.csv, &result.breakdown)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Maturity amount:     {:>14.2}", result.maturity_amount);
            println!("Interest earned:     {:>14.2}", result.interest_earned);
            println!("Simple interest:     {:>14.2}", result.simple_interest_earned);
            println!("Compounding benefit: {:>14.2}", result.compounding_benefit);
        }
        Command::Sip { contribution, rate, years } => {
            let d = &defaults.growth;
            let input = PeriodicInvestmentInput {
                monthly_contribution: contribution.unwrap_or(d.monthly_contribution),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                years: years.unwrap_or(d.years),
            };
            input.validate()?;
            let result = periodic_investment(&input);
            write_rows(&cli.csv, &result.breakdown)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Total invested:    {:>14.2}", result.total_invested);
            println!("Estimated returns: {:>14.2}", result.estimated_returns);
            println!("Maturity value:    {:>14.2}", result.maturity_value);
        }
        Command::Tax { income, status, itemized, credits, state_rate } => {
            let tables = load_tax_tables(cli.tax_tables.as_deref())?;
            let d = &defaults.tax;
            let input = TaxInput {
                gross_income: income.unwrap_or(d.gross_income),
                filing_status: status.unwrap_or(d.filing_status),
                itemized_deductions: *itemized,
                credits: *credits,
                state_tax_rate_percent: state_rate.unwrap_or(d.state_tax_rate_percent),
            };
            input.validate()?;
            let result = evaluate(&input, &tables);
            write_rows(&cli.csv, &result.brackets)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Taxable income: {:>12.2} (deduction {:.2})", result.taxable_income, result.deduction);
            for row in &result.brackets {
                println!("  {:>5.1}% on {:>12.2} = {:>10.2}", row.rate_percent, row.taxed_amount, row.tax);
            }
            println!("Federal tax:    {:>12.2}", result.federal_tax);
            println!("State tax:      {:>12.2}", result.state_tax);
            println!("Payroll tax:    {:>12.2}", result.payroll_tax);
            println!("Total tax:      {:>12.2}", result.total_tax);
            println!("Take-home pay:  {:>12.2} ({:.2}/month)", result.take_home_pay, result.monthly_take_home);
            println!("Effective rate: {:>11.2}%", result.effective_rate_percent);
            println!("Marginal rate:  {:>11.2}%", result.marginal_rate_percent);
        }
        Command::Retirement {
            age,
            retire_at,
            savings,
            contribution,
            return_rate,
            inflation,
            income,
        } => {
            let d = &defaults.retirement;
            let input = RetirementInput {
                current_age: age.unwrap_or(d.current_age),
                retirement_age: retire_at.unwrap_or(d.retirement_age),
                current_savings: savings.unwrap_or(d.current_savings),
                monthly_contribution: contribution.unwrap_or(d.monthly_contribution),
                expected_return_percent: return_rate.unwrap_or(d.expected_return_percent),
                inflation_percent: inflation.unwrap_or(d.inflation_percent),
                desired_monthly_income: income.unwrap_or(d.desired_monthly_income),
            };
            input.validate()?;
            let result = simulate(&input);
            write_rows(&cli.csv, &result.accumulation)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Years to retirement: {:>14}", result.years_to_retirement);
            println!("Retirement corpus:   {:>14.2}", result.retirement_corpus);
            println!("Total contributions: {:>14.2}", result.total_contributions);
            println!("Investment gains:    {:>14.2}", result.investment_gains);
            println!("Income needed/month: {:>14.2}", result.monthly_income_at_retirement);
            println!("Required corpus:     {:>14.2}", result.required_corpus);
            match result.outcome {
                DrawdownOutcome::Depleted { age, .. } => println!("Corpus runs out at age {}", age),
                DrawdownOutcome::Sustained { remaining_balance, .. } => {
                    println!("Corpus lasts the full horizon ({:.2} remaining)", remaining_balance)
                }
            }
        }
        Command::Payoff { balance, rate, minimum, extra } => {
            let d = &defaults.payoff;
            let input = PayoffInput {
                balance: balance.unwrap_or(d.balance),
                annual_rate_percent: rate.unwrap_or(d.annual_rate_percent),
                minimum_payment: minimum.unwrap_or(d.minimum_payment),
                extra_payment: extra.unwrap_or(d.extra_payment),
            };
            input.validate()?;
            let result = compare_payoff(&input);
            write_rows(&cli.csv, &result.rows())?;
            if cli.json {
                return print_json(&result);
            }
            for (label, sim) in [("Minimum only", &result.minimum_only), ("With extra", &result.accelerated)] {
                let status = if sim.paid_off { "" } else { " (not paid off)" };
                println!(
                    "{:<13} {:>4} months, interest {:>12.2}{}",
                    label, sim.months, sim.total_interest, status
                );
            }
            println!("Time saved:     {} months", result.months_saved);
            println!("Interest saved: {:.2}", result.interest_saved);
        }
        Command::Convert { rate, to_apr, frequency } => {
            let input = RateConversionInput {
                rate_percent: *rate,
                direction: if *to_apr {
                    ConversionDirection::ApyToApr
                } else {
                    ConversionDirection::AprToApy
                },
                frequency: *frequency,
            };
            input.validate()?;
            let result = convert(&input);
            if cli.json {
                return print_json(&result);
            }
            println!("{}", result.description);
        }
    }

    Ok(())
}

/// Reject `--csv` for subcommands that produce no rows
fn check_csv_supported(cli: &Cli) -> Result<()> {
    if cli.csv.is_some() && matches!(cli.command, Command::Convert { .. }) {
        bail!("--csv is not supported for convert, which produces a single rate");
    }
    Ok(())
}

fn load_tax_tables(path: Option<&Path>) -> Result<TaxTables> {
    match path {
        Some(dir) => TaxTables::load_from(dir)
            .with_context(|| format!("loading tax tables from {}", dir.display())),
        None => Ok(TaxTables::default_2024()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_rows<R: Serialize>(path: &Option<PathBuf>, rows: &[R]) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rejected_for_convert() {
        let cli = Cli::try_parse_from(["finproj", "convert", "--rate", "5", "--csv", "out.csv"])
            .unwrap();
        assert!(check_csv_supported(&cli).is_err());

        let cli = Cli::try_parse_from(["finproj", "convert", "--rate", "5"]).unwrap();
        assert!(check_csv_supported(&cli).is_ok());
    }

    #[test]
    fn test_csv_accepted_for_schedules() {
        let cli = Cli::try_parse_from(["finproj", "payoff", "--csv", "out.csv"]).unwrap();
        assert!(check_csv_supported(&cli).is_ok());
        assert_eq!(cli.csv, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
