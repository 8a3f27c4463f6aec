//! Operator CLI for enrolling and checking credential records by hand.
//! Records are read and printed as JSON in the same shape they are stored.

use std::env;
use std::process::ExitCode;

use saltpass_rs::{AlgorithmId, CredentialRecord, CredentialService, ServiceConfig, Verification};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zeroize::Zeroizing;

fn print_usage() {
    eprintln!("Commands:\n  enroll <plaintext>\n  verify <plaintext> <record-json>\n  needs-rehash <record-json>\n  algorithms\nConfig is read from $SALTPASS_CONFIG when set.");
}

fn parse_record(raw: &str) -> Option<CredentialRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            eprintln!("invalid record json: {err}");
            None
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saltpass_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config load failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(current_algorithm = %config.current_algorithm, "configuration loaded");
    let service = CredentialService::new(config);

    let command = args[1].clone();
    match command.as_str() {
        "enroll" => {
            if args.len() != 3 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let plaintext = Zeroizing::new(std::mem::take(&mut args[2]));
            let record = match service.enroll(&plaintext) {
                Ok(record) => record,
                Err(err) => {
                    eprintln!("enrollment failed: {err}");
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("record serialization failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        "verify" => {
            if args.len() != 4 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let plaintext = Zeroizing::new(std::mem::take(&mut args[2]));
            let Some(record) = parse_record(&args[3]) else {
                return ExitCode::FAILURE;
            };
            let outcome = service.verify_detailed(&plaintext, &record);
            match &outcome {
                Verification::Match => println!("match"),
                Verification::Mismatch => println!("no-match"),
                Verification::Corrupt(err) => println!("corrupt: {err}"),
                Verification::Unsupported(id) => println!("unsupported: {id:?}"),
                Verification::HashingFailed(err) => println!("error: {err}"),
            }
            if !outcome.is_match() {
                return ExitCode::FAILURE;
            }
        }
        "needs-rehash" => {
            if args.len() != 3 {
                print_usage();
                return ExitCode::FAILURE;
            }
            let Some(record) = parse_record(&args[2]) else {
                return ExitCode::FAILURE;
            };
            println!("{}", if service.needs_rehash(&record) { "yes" } else { "no" });
        }
        "algorithms" => {
            for id in AlgorithmId::ALL {
                let marker = if id == service.current_algorithm() {
                    " (current)"
                } else if service.config().is_retired(id) {
                    " (retired)"
                } else {
                    ""
                };
                println!("{id}{marker}");
            }
        }
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
