use xmlbench::{generate_sample, Strategy};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

// DHAT reports one workload per run, so the strategy is chosen on the command line
fn main() {
    let name = std::env::args().nth(1).unwrap_or_else(|| "DOM".to_string());
    let strategy: Strategy = name.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });

    println!("Preparing data...");
    let data = generate_sample(xmlbench::MAX_SAMPLE_RECORDS);

    let _profiler = dhat::Profiler::new_heap();
    println!("Profiling {strategy}...");
    {
        let summary = strategy.parse(Some(&data)).unwrap();
        println!("{strategy} records: {}", summary.count);
    }
}
