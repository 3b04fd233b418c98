use anyhow::{format_err, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nlsys::debug::{format_f64_vec, format_mat};
use nlsys::math::{norm_inf, residual};
use nlsys::{
    newton, GaussOptBuilder, GaussPivot, LinearSolver, Mat, NewtonOptBuilder, PrintProgress,
    ProgressMonitor,
};
use std::time::Duration;

/// Dense linear and nonlinear system solvers.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a linear system given as augmented matrix rows
    Linear(LinearArgs),

    /// Find a root of a built-in nonlinear system with Newton's method
    Newton(NewtonArgs),
}

#[derive(Args)]
struct LinearArgs {
    /// Rows of the augmented matrix [A | b], each a comma-separated list
    #[arg(required = true, allow_hyphen_values = true)]
    rows: Vec<String>,

    /// Pivot magnitude at or below which the matrix is singular.
    #[arg(long)]
    pub pivot_tol: Option<f64>,
}

#[derive(Args)]
struct NewtonArgs {
    /// System of equations.
    #[arg(value_enum)]
    system: System,

    /// Initial guess as a comma-separated list.
    #[arg(short, long, allow_hyphen_values = true)]
    guess: Option<String>,

    /// Termination tolerance on the L1 norm of the Newton step.
    #[arg(long)]
    pub tol: Option<f64>,

    /// Maximum number of iterations.
    #[arg(long)]
    pub max_it: Option<usize>,

    /// Forward-difference step for the Jacobian estimate.
    #[arg(long)]
    pub step: Option<f64>,

    /// Pivot magnitude at or below which the Jacobian is singular.
    #[arg(long)]
    pub pivot_tol: Option<f64>,

    /// Wall-clock budget in milliseconds.
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Print the iterate after every step.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum System {
    /// x0^2 - 1 = 0
    Unit,
    /// x0^2 + x1^2 = 1, x0 = x1
    Circle,
    /// x0^2 + x1^2 + x2^2 = 1, 2x0^2 + x1^2 = 4x2, 3x0^2 - 4x1 + x2^2 = 3
    Sphere,
}

impl System {
    fn eval(self, x: &[f64]) -> Vec<f64> {
        match self {
            System::Unit => vec![x[0] * x[0] - 1.0],
            System::Circle => vec![x[0] * x[0] + x[1] * x[1] - 1.0, x[0] - x[1]],
            System::Sphere => vec![
                x[0] * x[0] + x[1] * x[1] + x[2] * x[2] - 1.0,
                2.0 * x[0] * x[0] + x[1] * x[1] - 4.0 * x[2],
                3.0 * x[0] * x[0] - 4.0 * x[1] + x[2] * x[2] - 3.0,
            ],
        }
    }

    fn dim(self) -> usize {
        match self {
            System::Unit => 1,
            System::Circle => 2,
            System::Sphere => 3,
        }
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_level(false)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(_) => {
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Linear(args) => linear(args),
        Commands::Newton(args) => nonlinear(args),
    }
}

fn linear(args: &LinearArgs) -> Result<()> {
    let rows = args
        .rows
        .iter()
        .map(|r| parse_list(r))
        .collect::<Result<Vec<Vec<f64>>>>()?;
    let aug = Mat::<f64>::from_rows(&rows)?;
    log::info!("[A | b]:\n{}", format_mat(&aug, true));

    let mut opt = GaussOptBuilder::default();
    if let Some(pivot_tol) = args.pivot_tol {
        opt.pivot_tol(pivot_tol);
    }
    let solver = GaussPivot::new(opt.build()?);

    let x = solver.solve(aug.clone())?;
    println!("x = {}", format_f64_vec(&x));
    log::info!("|Ax - b|_inf = {:e}", norm_inf(&residual(&aug, &x)));

    Ok(())
}

fn nonlinear(args: &NewtonArgs) -> Result<()> {
    let system = args.system;
    let x0 = match &args.guess {
        Some(guess) => parse_list(guess)?,
        None => vec![0.5; system.dim()],
    };
    if x0.len() != system.dim() {
        return Err(format_err!(
            "initial guess has {} values, system has {} unknowns",
            x0.len(),
            system.dim()
        ));
    }

    let mut opt = NewtonOptBuilder::default();
    if let Some(tol) = args.tol {
        opt.tolerance(tol);
    }
    if let Some(max_it) = args.max_it {
        opt.max_it(max_it);
    }
    if let Some(step) = args.step {
        opt.step(step);
    }
    if let Some(pivot_tol) = args.pivot_tol {
        opt.pivot_tol(pivot_tol);
    }
    if let Some(ms) = args.time_limit_ms {
        opt.time_limit(Duration::from_millis(ms));
    }
    let opt = opt.build()?;

    let lin_solver = GaussPivot::new(opt.gauss());
    let f = |x: &[f64]| system.eval(x);
    let progress = PrintProgress {};
    let progress = args.verbose.then_some(&progress as &dyn ProgressMonitor);

    let (x, its) = newton(&f, &x0, &lin_solver, &opt, progress)?;

    println!("Newton's method converged in {} iterations.", its);
    println!("x = {}", format_f64_vec(&x));
    log::info!("|F(x)|_inf = {:e}", norm_inf(&system.eval(&x)));

    Ok(())
}

fn parse_list(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|err| format_err!("invalid number {:?}: {}", v.trim(), err))
        })
        .collect()
}
