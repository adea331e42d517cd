//! Minimizes a function given as a list of minterms.
//!
//! ```bash
//! cargo run --example truth_table -- --vars a,b,c --minterms 0,1,2,5,6,7
//! ```
//!
//! Minterm indices are big-endian: the first variable is the most significant bit.

use clap::Parser;
use log::info;
use qm_rs::ast::{Expr, ExprAdapter};
use qm_rs::minimize::Minimizer;

#[derive(Parser)]
#[command(name = "truth_table")]
#[command(about = "Quine-McCluskey minimization of a sum of minterms")]
struct Args {
    /// Variable names, most significant first
    #[arg(long, value_delimiter = ',', default_value = "a,b,c")]
    vars: Vec<String>,

    /// Minterm indices where the function is true
    #[arg(short, long, value_delimiter = ',')]
    minterms: Vec<u64>,

    /// Print the full truth table of the result
    #[arg(short, long)]
    table: bool,
}

fn render(expr: &Expr<String>) -> String {
    match expr {
        Expr::Const(value) => value.to_string(),
        Expr::Var(name) => name.clone(),
        Expr::Not(a) => format!("!{}", render(a)),
        Expr::And(a, b) => format!("{} & {}", render(a), render(b)),
        Expr::Or(a, b) => format!("{} | {}", render(a), render(b)),
    }
}

fn minterm(vars: &[String], index: u64) -> Expr<String> {
    let n = vars.len();
    Expr::and_all(vars.iter().enumerate().map(|(i, name)| {
        let var = Expr::var(name.clone());
        if index >> (n - 1 - i) & 1 == 1 {
            var
        } else {
            !var
        }
    }))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Args::parse();
    let n = args.vars.len();
    if n == 0 || n > 16 {
        color_eyre::eyre::bail!("expected between 1 and 16 variables, got {}", n);
    }
    if let Some(&m) = args.minterms.iter().find(|&&m| m >> n != 0) {
        color_eyre::eyre::bail!("minterm {} is out of range for {} variables", m, n);
    }

    let f = Expr::or_all(args.minterms.iter().map(|&m| minterm(&args.vars, m)));
    info!("input has {} literals", f.literal_count());

    let time_simplify = std::time::Instant::now();
    let qm = Minimizer::new(ExprAdapter::new());
    let g = qm.simplify(&f);
    let time_simplify = time_simplify.elapsed();

    println!("f = {}", render(&g));
    info!("result has {} literals, simplified in {:.3?}", g.literal_count(), time_simplify);

    if args.table {
        for index in 0..1u64 << n {
            let value = g.eval(&|v: &String| {
                let i = args.vars.iter().position(|x| x == v).unwrap_or(0);
                index >> (n - 1 - i) & 1 == 1
            });
            println!("{:0width$b} {}", index, value as u8, width = n);
        }
    }

    Ok(())
}
