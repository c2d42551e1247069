#![allow(non_snake_case)]
use std::env;

pub mod Examples;
pub mod Utils;
pub mod numerical;
pub mod symbolic;

use crate::numerical::Theta_api::ThetaSolver;

fn print_help() {
    println!("USAGE: main [-h] [parameterFile] (default: data/data.toml)");
    println!("-h --help this help");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return;
    }
    let filename = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "data/data.toml".to_string());

    let mut solver = ThetaSolver::from_file(&filename);
    if solver.solve() {
        solver.print_solution();
    } else {
        println!("Error: the solver could not produce a solution.");
        return;
    }
    solver.compute_order();
}
