use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use visitjson::{Aggregate, Config, Json};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Skip object keys the sample aggregate does not declare.
    #[arg(short, long, default_value = "false")]
    lenient: bool,

    #[arg(long, default_value_t = visitjson::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// JSON text to decode into a `Sample`.
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Aggregate, Default, Debug, Clone, PartialEq)]
struct Sample {
    b: bool,
    x: i32,
    y: f64,
    z: String,
    w: Vec<i32>,
}

#[derive(Aggregate, Default, Debug, Clone, PartialEq)]
struct Nested {
    text: String,
    agg: Sample,
}

fn main() -> ExitCode {
    init_tracing();
    let options = Args::parse();
    let config = if options.lenient {
        Config::lenient()
    } else {
        Config::default()
    }
    .with_max_depth(options.max_depth);

    let sample = Sample {
        b: true,
        x: 3,
        y: 2.5,
        z: "hello".to_owned(),
        w: vec![7, 11],
    };
    let nested = Nested {
        text: "complicated".to_owned(),
        agg: sample.clone(),
    };

    let mut ok = round_trip(&sample, &config);
    ok &= round_trip(&nested, &config);
    ok &= round_trip(&(7, 2.5, String::from("hello")), &config);
    ok &= round_trip(&vec![vec!['a', 'b'], vec![]], &config);

    if let Some(input) = options.input {
        match visitjson::from_str_with::<Sample>(&input, &config) {
            Ok(decoded) => {
                info!(?decoded, "decoded input");
                println!("{}", Json(&decoded));
            }
            Err(err) => {
                error!(offset = err.offset(), %err, "input rejected");
                ok = false;
            }
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn round_trip<T>(value: &T, config: &Config) -> bool
where
    T: visitjson::Classify + visitjson::Serialize + visitjson::Deserialize + Default + PartialEq + std::fmt::Debug,
{
    let text = visitjson::to_string(value);
    match visitjson::from_str_with::<T>(&text, config) {
        Ok(decoded) if decoded == *value => {
            info!(category = ?T::CATEGORY, %text, "round trip ok");
            true
        }
        Ok(decoded) => {
            error!(%text, ?decoded, "value changed across the round trip");
            false
        }
        Err(err) => {
            error!(%text, %err, "encoded text failed to decode");
            false
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
