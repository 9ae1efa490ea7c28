use std::{env, fs, path::PathBuf};

use cubeshape::{ClaimsIdentity, CubeshapeConfig, QueryPipeline, QueryRequest};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("Usage: translate_request <request_json> [claims_json]");
    eprintln!("Example: cargo run --example translate_request -- request.json claims.json");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        usage();
        std::process::exit(1);
    }

    let request_path = PathBuf::from(args.remove(0));
    let request: QueryRequest = serde_json::from_str(&fs::read_to_string(request_path)?)?;

    let config = CubeshapeConfig::load_default();
    let identity = match args.first() {
        Some(path) => {
            let claims: Map<String, Value> = serde_json::from_str(&fs::read_to_string(path)?)?;
            Some(ClaimsIdentity::with_claim_names(claims, &config.identity))
        }
        None => None,
    };

    let pipeline = QueryPipeline::builtin(&config);
    let query = pipeline.prepare(
        &request,
        identity
            .as_ref()
            .map(|i| i as &dyn cubeshape::CallerIdentity),
    )?;
    println!("{}", serde_json::to_string_pretty(&query)?);
    Ok(())
}
