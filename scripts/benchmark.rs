// scripts/benchmark.rs
use fast_pde::engine::{price_grid, SchemeSelection};
use fast_pde::grid::GridData;
use fast_pde::math_utils::Timer;
use fast_pde::schemes::payoffs::OptionType;
use fast_pde::schemes::{PricingScheme, SchemeVariant};
use std::env;
use std::process::Command;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    time_steps: usize,
    price_steps: usize,
    time_ms: f64,
    cells_per_sec: f64,
    at_the_money: f64,
}

fn run_pricer_benchmarks(sizes: &[usize]) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    for &steps in sizes {
        println!("Timing pricers on a {}x{} grid...", steps, steps);

        let grid = match GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, steps, steps) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Skipping {}x{} grid: {}", steps, steps, e);
                continue;
            }
        };
        let cells = (steps * (steps + 1)) as f64;

        for variant in SchemeVariant::ALL {
            let mut timer = Timer::new();
            timer.start();
            let prices = match PricingScheme::new(variant, &grid) {
                Ok(scheme) => scheme.price(),
                Err(e) => {
                    eprintln!("Skipping {}: {}", variant, e);
                    continue;
                }
            };
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: variant.to_string(),
                time_steps: steps,
                price_steps: steps,
                time_ms,
                cells_per_sec: cells / (time_ms / 1000.0),
                at_the_money: prices.price_at_spot(100.0).unwrap_or(f64::NAN),
            });
        }
    }

    results
}

fn run_parallel_benchmark(steps: usize) -> Option<(f64, f64, f64)> {
    let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, steps, steps).ok()?;

    let mut timer = Timer::new();
    timer.start();
    let report = price_grid(&grid, SchemeSelection::ALL).ok()?;
    let time_ms = timer.elapsed_ms();

    Some((
        time_ms,
        report.max_abs_difference(OptionType::Call)?,
        report.max_abs_difference(OptionType::Put)?,
    ))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("fast-pde Benchmark Suite");
    println!("========================\n");

    let system_info = SystemInfo::gather();

    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!(
        "  Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    let sizes = [100, 250, 500, 1000, 2000];
    let results = run_pricer_benchmarks(&sizes);

    println!("\n{:=<86}", "");
    println!("PRICER TIMINGS (T=1, r=0.05, sigma=0.2, K=100, L=300)");
    println!("{:=<86}", "");
    println!(
        "{:<16} {:>8} {:>8} {:>12} {:>18} {:>14}",
        "Pricer", "M", "N", "Time (ms)", "Cells/sec", "V(S=100)"
    );
    println!("{:-<86}", "");

    for result in &results {
        println!(
            "{:<16} {:>8} {:>8} {:>12.2} {:>18.0} {:>14.6}",
            result.name,
            result.time_steps,
            result.price_steps,
            result.time_ms,
            result.cells_per_sec,
            result.at_the_money
        );
    }

    println!("{:=<86}", "");

    let steps = 1000;
    match run_parallel_benchmark(steps) {
        Some((time_ms, call_diff, put_diff)) => {
            println!(
                "\nAll four pricers in parallel on {}x{}: {:.2} ms",
                steps, steps, time_ms
            );
            println!("  Max |complete - reduced| call: {:.6}", call_diff);
            println!("  Max |complete - reduced| put:  {:.6}", put_diff);
        }
        None => eprintln!("\nParallel benchmark failed"),
    }

    println!("\nBenchmark complete!");
    println!("To reproduce: RUST_LOG=info cargo run --bin benchmark --release");
}
