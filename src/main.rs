use std::error::Error;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use smol_profile_store::mappers::field_value_mapper;
use smol_profile_store::{AuthorKeyStore, ProfileField, ProfileStore, StoreError, StoreRegistry};


// Command line interface
#[derive(Parser, Debug)]
#[clap(name="smol-profile-store", about="Shared author key and profile state!")]
struct Opt {
    #[clap(short = 'l', long = "log", default_value = "debug")]
    log_level: String,

    /// Store state to load before any other write, as JSON keyed by store id
    #[clap(long = "state")]
    state: Option<String>,

    #[clap(short = 'k', long = "author-key")]
    author_key: Option<String>,

    /// Profile field assignment such as `login=octocat`, may be repeated
    #[clap(short = 's', long = "set")]
    sets: Vec<String>,

    /// Print a single profile field instead of the whole state
    #[clap(short = 'g', long = "get")]
    get: Option<String>,

    #[clap(long = "pretty")]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Fetch console arguments
    let opt = Opt::parse();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", format!("{},smol_profile_store={}", opt.log_level, opt.log_level));
    }
    // Enable console logging, keeping stdout for the state output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Setup stores
    let registry = StoreRegistry::new();
    let output = run(&opt, &registry)?;
    let rendered = if opt.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

// Apply the requested writes to `registry` and return what should be printed.
fn run(opt: &Opt, registry: &StoreRegistry) -> Result<Value, Box<dyn Error + Send + Sync>> {
    let author_key_store = registry.use_store::<AuthorKeyStore>()?;
    let profile_store = registry.use_store::<ProfileStore>()?;

    if let Some(state) = &opt.state {
        registry.hydrate(&serde_json::from_str(state)?)?;
    }
    if let Some(author_key) = &opt.author_key {
        author_key_store.set(author_key.as_str());
    }
    for assignment in &opt.sets {
        let (field, value) = parse_assignment(assignment)?;
        profile_store.set(field, field_value_mapper::from_arg(field, value)?)?;
    }
    log::info!("Stores ready: {:?}", registry.ids());

    let output = match &opt.get {
        Some(name) => field_value_mapper::to_json(&profile_store.get_by_name(name)?),
        None => registry.state()?,
    };
    Ok(output)
}

fn parse_assignment(assignment: &str) -> Result<(ProfileField, &str), StoreError> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| StoreError::InvalidAssignment(assignment.to_string()))?;
    Ok((name.trim().parse()?, value))
}
