//! Safe vanity address search CLI.
//!
//! Mines saltNonce until the CREATE2-derived Safe proxy address starts with
//! the requested prefix, then prints the deployment transaction.

use std::process;
use std::time::Duration;

use clap::Parser;

use vanity_safe::{
    message, Chain, Configuration, Creation, Prefix, SafeToL2Setup, SearchError, SearchWorker,
};

/// Safe Vanity Address Search
///
/// Searches for a saltNonce such that the Safe proxy deployed through
/// `createProxyWithNonce` lands on an address starting with the given
/// hex prefix.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address prefix to search for (hex digits, with or without 0x)
    #[arg(short, long)]
    prefix: String,

    /// Chain to deploy on: a known alias (eth, base, arb1, ...) or a
    /// numeric chain ID. Unknown chains require --factory, --init-code
    /// and --singleton.
    #[arg(short, long, default_value_t = Chain::ethereum())]
    chain: Chain,

    /// Override for the SafeProxyFactory address
    #[arg(long)]
    factory: Option<String>,

    /// Override for the SafeProxy creation code (hex)
    #[arg(long)]
    init_code: Option<String>,

    /// Override for the Safe singleton implementation address
    #[arg(long)]
    singleton: Option<String>,

    /// Owner address (repeat for each owner; order matters)
    #[arg(short, long = "owner", required = true)]
    owners: Vec<String>,

    /// Signature threshold
    #[arg(short, long, default_value = "1")]
    threshold: usize,

    /// Override for the fallback handler address
    #[arg(long)]
    fallback_handler: Option<String>,

    /// SafeToL2Setup contract address (requires --l2-singleton)
    #[arg(long, requires = "l2_singleton")]
    safe_to_l2_setup: Option<String>,

    /// SafeL2 singleton address (requires --safe-to-l2-setup)
    #[arg(long, requires = "safe_to_l2_setup")]
    l2_singleton: Option<String>,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "5")]
    report_interval: u64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let (config, prefix) = match parse_search(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    let num_workers = args.workers.unwrap_or_else(num_cpus::get);
    let worker = match SearchWorker::with_workers(&config, prefix.clone(), num_workers) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if !args.json {
        println!("Safe Vanity Address Search");
        println!("==========================");
        println!("Chain:      {}", args.chain);
        println!("Prefix:     0x{}", prefix.as_str());
        println!("Difficulty: {}", prefix.difficulty_description());
        println!("Workers:    {}", worker.num_workers());
        println!();
        println!("Searching... (Press Ctrl+C to stop)\n");
    }

    let cancel = worker.cancel_token();
    ctrlc::set_handler(move || {
        cancel.cancel("interrupted");
    })
    .expect("set Ctrl-C handler");

    let report_interval = Duration::from_secs(args.report_interval.max(1));
    let outcome = loop {
        match worker.wait_timeout(report_interval) {
            Some(outcome) => break outcome,
            None => {
                if !args.json {
                    print_progress(&worker);
                }
            }
        }
    };

    match outcome {
        Ok(creation) => {
            if args.json {
                let creation = message::Creation::from(&creation);
                println!("{}", serde_json::to_string_pretty(&creation).expect("serialize"));
            } else {
                print_result(&creation);
                print_stats(&worker);
            }
        }
        Err(SearchError::Cancelled(reason)) => {
            if !args.json {
                println!("\nStopped: {reason}");
                print_stats(&worker);
            }
            process::exit(130);
        }
        Err(e) => {
            eprintln!("Search failed: {e}");
            process::exit(1);
        }
    }
}

fn parse_search(args: &Args) -> Result<(Configuration, Prefix), String> {
    let address = |s: &str, what: &str| {
        s.parse()
            .map_err(|e| format!("invalid {what} address: {e}"))
    };

    let setup = match (&args.safe_to_l2_setup, &args.l2_singleton) {
        (Some(setup), Some(l2)) => Some(SafeToL2Setup {
            address: address(setup, "SafeToL2Setup")?,
            singleton_l2: address(l2, "L2 singleton")?,
        }),
        _ => None,
    };

    // Chain presets fill in the contract set; explicit flags override.
    let preset = args.chain.contracts();
    let missing = |flag: &str| format!("unsupported chain {}: {flag} must be specified", args.chain);

    let proxy_factory = match &args.factory {
        Some(s) => address(s, "factory")?,
        None => preset.as_ref().ok_or_else(|| missing("--factory"))?.proxy_factory,
    };
    let proxy_init_code = match &args.init_code {
        Some(s) => hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|e| format!("invalid init code: {e}"))?,
        None => {
            preset
                .as_ref()
                .ok_or_else(|| missing("--init-code"))?
                .proxy_init_code
                .clone()
        }
    };
    let singleton = match &args.singleton {
        Some(s) => address(s, "singleton")?,
        None => preset.as_ref().ok_or_else(|| missing("--singleton"))?.singleton,
    };
    let fallback_handler = match &args.fallback_handler {
        Some(s) => Some(address(s, "fallback handler")?),
        None => preset.as_ref().map(|c| c.fallback_handler),
    };

    let config = Configuration {
        proxy_factory,
        proxy_init_code,
        singleton,
        owners: args
            .owners
            .iter()
            .map(|owner| address(owner, "owner"))
            .collect::<Result<_, _>>()?,
        threshold: args.threshold,
        fallback_handler,
        setup,
    };

    let prefix = Prefix::parse(&args.prefix).map_err(|e| e.to_string())?;
    Ok((config, prefix))
}

fn print_result(creation: &Creation) {
    println!("=== Match ===");
    println!("Address:      {}", creation.creation_address);
    println!("Salt nonce:   {}", creation.salt_nonce_hex());
    println!("Tx to:        {}", creation.transaction.to);
    println!("Tx calldata:  0x{}", hex::encode(&creation.transaction.calldata));
    println!();
}

fn print_progress(worker: &SearchWorker) {
    println!(
        "[{:>4}s] Tried {} salts ({}/s)",
        worker.elapsed().as_secs(),
        format_number(worker.total_salts()),
        format_number(worker.salts_per_second() as u64)
    );
}

fn print_stats(worker: &SearchWorker) {
    println!("--- Statistics ---");
    println!("Total salts:  {}", format_number(worker.total_salts()));
    println!("Elapsed:      {:.2}s", worker.elapsed().as_secs_f64());
    println!(
        "Speed:        {}/s",
        format_number(worker.salts_per_second() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
