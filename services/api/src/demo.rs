use crate::infra::{
    default_catalog, load_catalog, InMemoryElectionNotifier, InMemoryElectionRepository,
};
use chrono::SecondsFormat;
use clap::Args;
use module_election::config::CatalogConfig;
use module_election::error::AppError;
use module_election::workflows::election::{
    ElectionService, ElectionStatus, ElectionSubmission, EnrollmentMode, InMemoryModuleCatalog,
    Student, StudentId, ValidationSetting,
};
use std::path::PathBuf;
use std::sync::Arc;

type DemoService =
    ElectionService<InMemoryModuleCatalog, InMemoryElectionRepository, InMemoryElectionNotifier>;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Module catalog CSV export (defaults to the bundled catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Election document (JSON) holding the student, module identifiers, and settings
    #[arg(long)]
    pub(crate) election: PathBuf,
    /// Print the full status as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the part-time portion of the demo.
    #[arg(long)]
    pub(crate) skip_part_time: bool,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs {
        catalog,
        election,
        json,
    } = args;

    let catalog = load_catalog(&CatalogConfig {
        module_csv: catalog,
    })?;
    let raw = std::fs::read_to_string(&election)?;
    let submission: ElectionSubmission = serde_json::from_str(&raw)?;
    let student = submission.student.id.0.clone();

    let status = service(catalog).preview(submission)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Election of student {student}");
        render_status(&status);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let notifier = Arc::new(InMemoryElectionNotifier::default());
    let service = ElectionService::new(
        Arc::new(default_catalog()?),
        Arc::new(InMemoryElectionRepository::default()),
        notifier.clone(),
    );

    println!("Module election demo");
    println!("\nFull-time election");
    let full_time = student("ft-2024-017", EnrollmentMode::FullTime, false);
    submit(&service, full_time.clone(), FULL_TIME_ELECTION, ValidationSetting::default());

    println!("\nFull-time election without an interdisciplinary module");
    let incomplete: Vec<&str> = FULL_TIME_ELECTION
        .iter()
        .copied()
        .filter(|id| !id.starts_with("t.BA.WU."))
        .collect();
    submit(&service, full_time, &incomplete, ValidationSetting::default());

    if !args.skip_part_time {
        println!("\nPart-time election, first round");
        submit(
            &service,
            student("pt-2023-104", EnrollmentMode::PartTime, false),
            PART_TIME_FIRST_ROUND,
            ValidationSetting::default(),
        );

        println!("\nPart-time election, second round");
        submit(
            &service,
            student("pt-2023-104", EnrollmentMode::PartTime, true),
            PART_TIME_SECOND_ROUND,
            ValidationSetting {
                elected_context_modules_in_first_election: 2,
                ..ValidationSetting::default()
            },
        );
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications");
        for event in events {
            println!("- [{}] student {}", event.template, event.student_id.0);
        }
    }

    Ok(())
}

const FULL_TIME_ELECTION: &[&str] = &[
    "t.BA.WM.AI1-EN.19HS",
    "t.BA.WM.AI2-EN.20FS",
    "t.BA.WM.SE1.19HS",
    "t.BA.WM.SE2.20FS",
    "t.BA.WM.ISE-EN.19HS",
    "t.BA.WM.ML-EN.20FS",
    "t.BA.WM.CLD-EN.19HS",
    "t.BA.WV.DB.19HS",
    "t.BA.WVK.SOE.19HS",
    "t.BA.XXK.ENG.19HS",
    "t.BA.WV.ETHIK.20FS",
    "t.BA.WU.PSY.19HS",
];

const PART_TIME_FIRST_ROUND: &[&str] = &[
    "t.BA.WV.DB.19HS",
    "t.BA.WM.ML-EN.20FS",
    "t.BA.WVK.SOE.19HS",
    "t.BA.XXK.ENG.19HS",
];

const PART_TIME_SECOND_ROUND: &[&str] = &[
    "t.BA.WM.AI1-EN.19HS",
    "t.BA.WM.AI2-EN.20FS",
    "t.BA.WM.PSIT3.19HS",
    "t.BA.WM.PSIT4.20FS",
    "t.BA.WM.ISE-EN.19HS",
    "t.BA.WM.CLD-EN.19HS",
    "t.BA.WU.ECO.20FS",
    "t.BA.WVK.LAW.20FS",
];

fn service(catalog: InMemoryModuleCatalog) -> DemoService {
    ElectionService::new(
        Arc::new(catalog),
        Arc::new(InMemoryElectionRepository::default()),
        Arc::new(InMemoryElectionNotifier::default()),
    )
}

fn student(id: &str, enrollment: EnrollmentMode, second_election: bool) -> Student {
    Student {
        id: StudentId(id.to_string()),
        enrollment,
        international_profile: enrollment == EnrollmentMode::FullTime,
        repeating: false,
        second_election,
        dispensation_credits: 0,
    }
}

fn submit(service: &DemoService, student: Student, module_ids: &[&str], setting: ValidationSetting) {
    let submission = ElectionSubmission {
        student,
        module_ids: module_ids.iter().map(|id| id.to_string()).collect(),
        setting,
    };

    match service.submit(submission) {
        Ok(record) => {
            println!(
                "  Stored {} modules at {}",
                record.module_ids.len(),
                record
                    .validated_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
            );
            render_status(&record.status);
        }
        Err(err) => println!("  Submission rejected: {}", err),
    }
}

fn render_status(status: &ElectionStatus) {
    println!("  {}", status.summary());
    for element in status.elements() {
        println!("  - {}", element.summary());
    }
    for warning in &status.warnings {
        println!("  ! {}", warning);
    }
}
