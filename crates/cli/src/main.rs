use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use metarisk_core::{
    engine_config_from_env_value, AssessmentResult, ClinicalData, RawPatientInput, RiskEngine,
    Sex,
};
use metarisk_store::{FileAssessmentStore, RecordId, DEFAULT_PAGE_LIMIT};
use metarisk_types::CustomerId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ASSESSMENT_DATA_DIR: &str = "assessment_data";

#[derive(Parser)]
#[command(name = "metarisk")]
#[command(about = "MetaRisk chronic-disease risk calculator")]
struct Cli {
    /// Assessment store directory (default: $ASSESSMENT_DATA_DIR or ./assessment_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a patient described by command-line flags
    Assess {
        #[command(flatten)]
        input: InputArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assess a patient record read from a JSON or YAML file
    AssessFile {
        path: PathBuf,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assess a patient record from a file and store the result
    SaveFile {
        path: PathBuf,
        /// Customer the assessment belongs to
        #[arg(long)]
        customer: Option<String>,
    },
    /// Print a stored assessment as JSON
    Show {
        assessment_id: String,
    },
    /// List a customer's stored assessments, newest first
    List {
        customer_id: String,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        skip: usize,
    },
    /// Render and store the health guide for an assessment
    Guide {
        assessment_id: String,
    },
}

/// Every field of the patient form as a flag.
#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Age in years, 0-120
    #[arg(long)]
    age: Option<i64>,
    /// male or female
    #[arg(long)]
    sex: Option<Sex>,
    /// Height in cm
    #[arg(long)]
    height: Option<f64>,
    /// Weight in kg
    #[arg(long)]
    weight: Option<f64>,
    /// Waist circumference in cm
    #[arg(long)]
    waist: Option<f64>,
    /// Derived from height and weight when omitted
    #[arg(long)]
    bmi: Option<f64>,
    #[arg(long)]
    systolic_bp: Option<f64>,
    #[arg(long)]
    diastolic_bp: Option<f64>,
    #[arg(long)]
    heart_rate: Option<f64>,
    /// mg/dL
    #[arg(long)]
    fasting_glucose: Option<f64>,
    /// Percent
    #[arg(long)]
    hba1c: Option<f64>,
    #[arg(long)]
    total_cholesterol: Option<f64>,
    #[arg(long)]
    ldl_cholesterol: Option<f64>,
    #[arg(long)]
    hdl_cholesterol: Option<f64>,
    #[arg(long)]
    triglycerides: Option<f64>,
    #[arg(long)]
    creatinine: Option<f64>,
    #[arg(long)]
    has_diabetes: bool,
    #[arg(long)]
    has_hypertension: bool,
    #[arg(long)]
    has_heart_disease: bool,
    #[arg(long)]
    has_stroke: bool,
    #[arg(long)]
    family_history_diabetes: bool,
    #[arg(long)]
    family_history_heart_disease: bool,
    #[arg(long)]
    family_history_stroke: bool,
    #[arg(long)]
    smoker: bool,
    #[arg(long)]
    smoking_years: Option<u32>,
    #[arg(long)]
    smokes_per_day: Option<u32>,
    /// Standard drinks per week
    #[arg(long)]
    alcohol: Option<f64>,
    /// Minutes of moderate exercise per week
    #[arg(long)]
    exercise_minutes: Option<u32>,
    #[arg(long)]
    on_hypertension_meds: bool,
    #[arg(long)]
    on_diabetes_meds: bool,
    /// Any lipid-lowering therapy
    #[arg(long)]
    on_statins: bool,
}

impl From<InputArgs> for RawPatientInput {
    fn from(args: InputArgs) -> Self {
        Self {
            age: args.age,
            sex: args.sex,
            clinical: ClinicalData {
                height: args.height,
                weight: args.weight,
                waist: args.waist,
                bmi: args.bmi,
                systolic_bp: args.systolic_bp,
                diastolic_bp: args.diastolic_bp,
                heart_rate: args.heart_rate,
                fasting_glucose: args.fasting_glucose,
                hba1c: args.hba1c,
                total_cholesterol: args.total_cholesterol,
                ldl_cholesterol: args.ldl_cholesterol,
                hdl_cholesterol: args.hdl_cholesterol,
                triglycerides: args.triglycerides,
                creatinine: args.creatinine,
                has_diabetes: args.has_diabetes,
                has_hypertension: args.has_hypertension,
                has_heart_disease: args.has_heart_disease,
                has_stroke: args.has_stroke,
                family_history_diabetes: args.family_history_diabetes,
                family_history_heart_disease: args.family_history_heart_disease,
                family_history_stroke: args.family_history_stroke,
                is_smoker: args.smoker,
                smoking_years: args.smoking_years,
                smokes_per_day: args.smokes_per_day,
                alcohol_units_per_week: args.alcohol,
                exercise_minutes_per_week: args.exercise_minutes,
                on_hypertension_meds: args.on_hypertension_meds,
                on_diabetes_meds: args.on_diabetes_meds,
                on_lipid_lowering_meds: args.on_statins,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metarisk=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        std::env::var("ASSESSMENT_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_ASSESSMENT_DATA_DIR.into())
            .into()
    });

    match cli.command {
        Some(Commands::Assess { input, json }) => {
            let result = engine()?.assess(&input.into())?;
            print_result(&result, json)?;
        }
        Some(Commands::AssessFile { path, json }) => {
            let raw = read_input_file(&path)?;
            let result = engine()?.assess(&raw)?;
            print_result(&result, json)?;
        }
        Some(Commands::SaveFile { path, customer }) => {
            let customer = customer
                .map(CustomerId::new)
                .transpose()
                .context("invalid customer id")?;
            let raw = read_input_file(&path)?;
            let result = engine()?.assess(&raw)?;

            std::fs::create_dir_all(&data_dir)?;
            let stored = FileAssessmentStore::open(&data_dir)?.save(result, customer)?;
            println!("Saved assessment with ID: {}", stored.assessment_id);
            print!("{}", summary(&stored.output_data));
        }
        Some(Commands::Show { assessment_id }) => {
            let id = RecordId::parse(&assessment_id)?;
            let stored = FileAssessmentStore::open(&data_dir)?.load(&id)?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        Some(Commands::List {
            customer_id,
            limit,
            skip,
        }) => {
            let customer = CustomerId::new(&customer_id).context("invalid customer id")?;
            let page = FileAssessmentStore::open(&data_dir)?
                .list_for_customer(&customer, limit, skip)?;
            if page.items.is_empty() {
                println!("No assessments found.");
            } else {
                for stored in &page.items {
                    println!(
                        "ID: {}, Assessed: {}, Overall: {} ({})",
                        stored.assessment_id,
                        stored.assessed_at.to_rfc3339(),
                        stored.output_data.overall_level,
                        stored.output_data.overall_score
                    );
                }
                println!(
                    "Showing {} of {} (skip {})",
                    page.items.len(),
                    page.total,
                    page.skip
                );
            }
        }
        Some(Commands::Guide { assessment_id }) => {
            let id = RecordId::parse(&assessment_id)?;
            let guide = FileAssessmentStore::open(&data_dir)?.create_guide(&id)?;
            print!("{}", guide.content);
        }
        None => {
            println!("Use 'metarisk --help' for commands");
        }
    }

    Ok(())
}

fn engine() -> anyhow::Result<RiskEngine> {
    let cfg = engine_config_from_env_value(std::env::var("METARISK_CALCULATION_VERSION").ok())?;
    Ok(RiskEngine::new(cfg))
}

/// Reads a patient record; `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
fn read_input_file(path: &Path) -> anyhow::Result<RawPatientInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let raw = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?
    };
    Ok(raw)
}

fn print_result(result: &AssessmentResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", summary(result));
    }
    Ok(())
}

/// One line per disease plus the overall verdict and metabolic syndrome status.
fn summary(result: &AssessmentResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Overall: {} ({}/100)\n",
        result.overall_level, result.overall_score
    ));
    for disease in result.disease_results() {
        let ten_year = disease
            .ten_year_risk
            .map(|risk| format!(", 10-year risk {risk:.1}%"))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}: {} ({}/100{})\n",
            disease.disease.label(),
            disease.level,
            disease.score,
            ten_year
        ));
    }

    let metabolic = &result.metabolic_syndrome;
    out.push_str(&format!(
        "Metabolic syndrome: {} ({}/5 criteria met)\n",
        if metabolic.is_metabolic_syndrome {
            "yes"
        } else {
            "no"
        },
        metabolic.criteria_met
    ));
    if !metabolic.missing_values.is_empty() {
        out.push_str(&format!(
            "  Not evaluated: {}\n",
            metabolic.missing_labels().join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use metarisk_core::{assess, Disease};
    use std::io::Write;

    #[test]
    fn flags_map_onto_patient_input() {
        let cli = Cli::try_parse_from([
            "metarisk",
            "assess",
            "--age",
            "58",
            "--sex",
            "female",
            "--systolic-bp",
            "150",
            "--smoker",
            "--on-statins",
            "--alcohol",
            "21",
        ])
        .unwrap();

        let Some(Commands::Assess { input, json }) = cli.command else {
            panic!("expected assess command");
        };
        assert!(!json);

        let raw = RawPatientInput::from(input);
        assert_eq!(raw.age, Some(58));
        assert_eq!(raw.sex, Some(Sex::Female));
        assert_eq!(raw.clinical.systolic_bp, Some(150.0));
        assert!(raw.clinical.is_smoker);
        assert!(raw.clinical.on_lipid_lowering_meds);
        assert_eq!(raw.clinical.alcohol_units_per_week, Some(21.0));
        assert!(!raw.clinical.has_diabetes);
    }

    #[test]
    fn rejects_unknown_sex() {
        assert!(Cli::try_parse_from(["metarisk", "assess", "--age", "40", "--sex", "x"]).is_err());
    }

    #[test]
    fn reads_yaml_and_json_files() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "age: 45\nsex: male\nwaist: 96\nisSmoker: true").unwrap();
        let raw = read_input_file(yaml.path()).unwrap();
        assert_eq!(raw.age, Some(45));
        assert_eq!(raw.clinical.waist, Some(96.0));
        assert!(raw.clinical.is_smoker);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"age": 30, "sex": "female", "hba1c": 6.0}}"#).unwrap();
        let raw = read_input_file(json.path()).unwrap();
        assert_eq!(raw.sex, Some(Sex::Female));
        assert_eq!(raw.clinical.hba1c, Some(6.0));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, "{{not json").unwrap();
        let err = read_input_file(json.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn summary_lists_every_disease() {
        let result = assess(&RawPatientInput::new(40, Sex::Male)).unwrap();
        let text = summary(&result);
        assert!(text.starts_with("Overall: "));
        for disease in Disease::ALL {
            assert!(text.contains(disease.label()), "missing {disease}");
        }
        assert!(text.contains("Not evaluated: "));
    }
}
