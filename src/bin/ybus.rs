use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_complex::Complex64;
use ybus::debug::{format_complex, format_f64_vec, format_polar, format_triplets};
use ybus::{branch_flows, d_sbus_d_v, d_sbus_d_v_cart, load_case, make_ybus, Bus};

/// Bus admittance matrices and power injection derivatives.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bus admittance matrix
    Ybus(YbusArgs),

    /// Derivatives of bus power injections w.r.t. voltage
    Jac(JacArgs),

    /// Branch power flows at the case voltages
    Flows(CaseArgs),
}

#[derive(Args)]
struct CaseArgs {
    /// The input case (JSON, MATPOWER column layout, 0-based bus numbers)
    #[arg(required = true)]
    input: PathBuf,

    /// Print complex values in polar form (magnitude and angle in degrees).
    #[arg(long, default_value_t = false)]
    polar: bool,
}

#[derive(Args)]
struct YbusArgs {
    #[command(flatten)]
    case: CaseArgs,

    /// Also print the branch admittance matrices Yf and Yt.
    #[arg(long, default_value_t = false)]
    branch: bool,
}

#[derive(Args)]
struct JacArgs {
    #[command(flatten)]
    case: CaseArgs,

    /// Voltage coordinates to differentiate with respect to.
    #[arg(long, value_enum, default_value_t = Coords::Polar)]
    coords: Coords,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Coords {
    /// Magnitude and angle.
    Polar,
    /// Real and imaginary parts.
    Cartesian,
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_level(false)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(err) = execute(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(2);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let args = match &cli.command {
        Commands::Ybus(args) => &args.case,
        Commands::Jac(args) => &args.case,
        Commands::Flows(args) => args,
    };

    let case = load_case(&args.input)?;
    let bus = case.buses()?;
    let branch = case.branches()?;
    let gencost = case.gencosts()?;
    log::debug!("{} generator cost functions", gencost.len());

    let (y_bus, y_f, y_t) = make_ybus(case.base_mva, &bus, &branch)?;

    match &cli.command {
        Commands::Ybus(args) => {
            println!("Ybus:\n{}", format_triplets(&y_bus, args.case.polar));
            if args.branch {
                println!("Yf:\n{}", format_triplets(&y_f, args.case.polar));
                println!("Yt:\n{}", format_triplets(&y_t, args.case.polar));
            }
        }
        Commands::Jac(args) => {
            let v = voltages(&bus);
            let polar = args.case.polar;
            match args.coords {
                Coords::Polar => {
                    let (d_vm, d_va) = d_sbus_d_v(&y_bus, &v)?;
                    println!("dSbus/dVm:\n{}", format_triplets(&d_vm, polar));
                    println!("dSbus/dVa:\n{}", format_triplets(&d_va, polar));
                }
                Coords::Cartesian => {
                    let (d_vr, d_vi) = d_sbus_d_v_cart(&y_bus, &v)?;
                    println!("dSbus/dVr:\n{}", format_triplets(&d_vr, polar));
                    println!("dSbus/dVi:\n{}", format_triplets(&d_vi, polar));
                }
            }
        }
        Commands::Flows(args) => {
            let v = voltages(&bus);
            let (s_f, s_t) = branch_flows(case.base_mva, &branch, &y_f, &y_t, &v)?;
            let fmt = |z: &Complex64| {
                if args.polar {
                    format_polar(z)
                } else {
                    format_complex(z)
                }
            };
            for (l, br) in branch.iter().enumerate() {
                println!(
                    "{} {} -> {}: Sf = {} MVA, St = {} MVA",
                    l,
                    br.f_bus,
                    br.t_bus,
                    fmt(&s_f[l]),
                    fmt(&s_t[l])
                );
            }
            let losses: Vec<f64> = s_f.iter().zip(&s_t).map(|(f, t)| (f + t).re).collect();
            println!("losses (MW): {}", format_f64_vec(&losses));
        }
    }

    Ok(())
}

fn voltages(bus: &[Bus]) -> Vec<Complex64> {
    bus.iter().map(|b| b.v()).collect()
}
