//! # PARC basic usage
//!
//! Encodes a handful of learner answers, evolves each one through the default
//! learning dynamics, and prints the state, the validator's verdict and the
//! diagnosis at every stage.
//!
//! Run with: `RUST_LOG=parc_core=debug cargo run --example basic_usage --features std`

use parc_core::{
    encode, update, validate, Diagnosis, DiagnosisThresholds, ParcConfig, ParcEngine, ParcError,
    UpdateParams, VectorRecord,
};

const ANSWERS: [&str; 4] = [
    "Congress makes laws because the bill is approved.",
    "The president is not bound by the law unless the court says so.",
    "It means the senate never votes on it, which is wrong.",
    "I don't know.",
];

fn main() -> Result<(), ParcError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== PARC state engine ===\n");

    let params = UpdateParams::default();
    let thresholds = DiagnosisThresholds::default();

    for answer in ANSWERS {
        let seeded = encode(answer, None);
        let evolved = update(seeded, 3, &params);
        let report = validate(&VectorRecord::from(evolved));

        println!("answer:    {:?}", answer);
        println!("  seeded:  {:?}", seeded.rounded(4));
        println!("  evolved: {:?}", evolved.rounded(4));
        println!("  valid:   {}", report.valid);
        println!("  reading: {}\n", Diagnosis::classify(&evolved, &thresholds));
    }

    // The same flow through a configured engine: faster learning, one step.
    let engine = ParcEngine::new(ParcConfig {
        dynamics: UpdateParams { gamma: 0.6, ..UpdateParams::default() },
        steps: 1,
        ..ParcConfig::default()
    })?;
    let v = engine.vector(ANSWERS[0], Some(0.9));
    println!("engine (gamma 0.6, 1 step): {}", v);
    println!("  reading: {}\n", engine.diagnose(&v));

    // A hand-written vector that breaks the fog rule.
    let report = validate(&VectorRecord::new(0.5, 0.3, 0.2, 0.5));
    println!("validate (0.5, 0.3, 0.2, 0.5): valid={} errors={:?}", report.valid, report.messages());

    Ok(())
}
