use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use malpred::config::load_config;
use malpred::encoding::{Symptom, SymptomSet};
use malpred::report::export_report;
use malpred::{ScreeningEngine, Submission};

/// Command-line form surface: one invocation is one submission.
#[derive(Parser, Debug)]
#[command(name = "malpred")]
#[command(about = "Predicts the likelihood of malaria from symptoms and vital signs")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Symptoms present, comma-separated (fever, cold, rigor, fatigue,
    /// headache, bitter-tongue, vomiting, diarrhea)
    #[arg(short, long, value_delimiter = ',')]
    symptoms: Vec<String>,

    /// Blood pressure as Systolic/Diastolic, e.g. 120/80
    #[arg(short, long, default_value = "")]
    bp: String,

    /// Temperature in °C
    #[arg(short, long, default_value = "37.0")]
    temperature: f64,

    /// Also export the report as a document
    #[arg(short, long)]
    export: bool,
}

fn parse_symptoms(names: &[String]) -> Result<SymptomSet, String> {
    let mut set = SymptomSet::none();
    for name in names {
        let symptom = match name.trim().to_lowercase().as_str() {
            "fever" => Symptom::Fever,
            "cold" => Symptom::Cold,
            "rigor" => Symptom::Rigor,
            "fatigue" => Symptom::Fatigue,
            "headache" => Symptom::Headache,
            "bitter-tongue" | "bitter_tongue" => Symptom::BitterTongue,
            "vomiting" => Symptom::Vomiting,
            "diarrhea" => Symptom::Diarrhea,
            other => return Err(format!("Unknown symptom: {}", other)),
        };
        set = set.with(symptom, true);
    }
    Ok(set)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = load_config(Path::new(&args.config))
        .map_err(|e| Box::<dyn Error>::from(e))?;

    println!("Loading model from {}", config.model.path);

    // Model load failure is fatal: no prediction may be attempted without it
    let engine = ScreeningEngine::from_config(&config)
        .map_err(|e| Box::<dyn Error>::from(e))?;

    println!("Model {} ready", engine.model_name());

    let submission = Submission {
        symptoms: parse_symptoms(&args.symptoms)?,
        blood_pressure: args.bp,
        temperature_c: args.temperature,
    };

    let report = engine
        .screen(&submission)
        .map_err(|e| Box::<dyn Error>::from(e))?;

    println!();
    for line in report.lines() {
        println!("{}", line);
    }

    if args.export {
        // Export failure must not hide the prediction we just printed
        match export_report(&report, &config.report.output_dir, config.report.lines_per_page) {
            Ok(path) => println!("\nReport exported to {}", path.display()),
            Err(e) => eprintln!("\n{}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_symptoms() {
        let set = parse_symptoms(&["fever".to_string(), "bitter-tongue".to_string()]).unwrap();
        assert!(set.is_present(Symptom::Fever));
        assert!(set.is_present(Symptom::BitterTongue));
        assert!(!set.is_present(Symptom::Cold));
    }

    #[test]
    fn rejects_unknown_symptom() {
        assert!(parse_symptoms(&["sneezing".to_string()]).is_err());
    }
}
