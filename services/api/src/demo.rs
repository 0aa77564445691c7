use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;

use muster::analytics::{self, RosterFilter, RosterSummary};
use muster::assessment;
use muster::error::AppError;
use muster::planning::{EnrollmentOutcome, PlanningService};
use muster::roster::{PersonnelRecord, RandomFieldSampler, RosterImporter, RosterIngest};

use crate::infra::InMemoryPlanningRepository;

/// Bundled roster export used when no CSV is supplied. The short row and the
/// spelled-out headers exercise the anomaly reporting and header aliasing on
/// every demo run.
const SAMPLE_ROSTER: &str = "\
id,Name,Rank,Branch,Specialization,Years of Service,Age,Training Score,Medical Status,Mission Readiness,Skill Level,Leadership Potential,Last Deployment
PER0001,Ana Rivera,Sergeant,Army,Signals,8,29,84,Fit,Ready,Advanced,High,2024-11-02
PER0002,Jonas Okafor,Corporal,Army,Logistics,4,26,62,Fit,Training,Intermediate,Medium,2023-03-18
PER0003,Mei Tanaka,Captain,Air Force,Cyber Operations,12,36,91,Fit,Ready,Expert,High,2025-01-20
PER0004,Luis Ortega,Private,Army,Infantry,2,22,55,Limited Duty,Training,Beginner,Low,
PER0005,Sara Lindqvist,Major,Navy,Medical,17,43,78,Fit,Ready,Advanced,Medium,2022-08-30
PER0006,Dmitri Volkov,Sergeant,Army,Signals,11,38,69,Under Review,Not Ready,Intermediate,Low,2021-05-11
PER0007,Leila Haddad,Lieutenant,Air Force,Intelligence,6,31,88,Fit,Ready,Advanced,High,2024-06-05
PER0008,Tom Becker,Corporal,Marines,Infantry
PER0009,Grace Chen,Specialist,Army,Cyber Operations,3,25,73,Fit,Training,Intermediate,Medium,2024-02-14
PER0010,Henrik Olsen,Sergeant,Navy,Logistics,14,41,66,Fit,Ready,Intermediate,Low,2020-10-01
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional roster CSV to ingest instead of the bundled sample
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Override the reporting date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include a per-person assessment listing in the output
    #[arg(long)]
    pub(crate) list_personnel: bool,
    /// Skip the planning portion of the demo
    #[arg(long)]
    pub(crate) skip_planning: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RosterReportArgs {
    /// Roster CSV export to ingest
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Reporting date for time-based recommendations (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Substring filter over name, id, and specialization
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact-match rank filter ("all" disables it)
    #[arg(long)]
    pub(crate) rank: Option<String>,
    /// Exact-match specialization filter ("all" disables it)
    #[arg(long)]
    pub(crate) specialization: Option<String>,
    /// Include a per-person assessment listing in the output
    #[arg(long)]
    pub(crate) list_personnel: bool,
}

pub(crate) fn run_roster_report(args: RosterReportArgs) -> Result<(), AppError> {
    let RosterReportArgs {
        csv,
        today,
        search,
        rank,
        specialization,
        list_personnel,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let ingest = RosterImporter::from_path(csv, &mut RandomFieldSampler)?;
    let filter = RosterFilter {
        search,
        rank,
        specialization,
        ..RosterFilter::default()
    }
    .normalized();

    let summary = analytics::summarize(&ingest.records, &filter, today);
    render_roster_report(&summary, &ingest, today, list_personnel, &filter);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster_csv,
        today,
        list_personnel,
        skip_planning,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Personnel readiness demo");
    let ingest = match roster_csv {
        Some(path) => {
            println!("Data source: {}", path.display());
            RosterImporter::from_path(path, &mut RandomFieldSampler)?
        }
        None => {
            println!("Data source: bundled sample roster");
            RosterImporter::from_text(SAMPLE_ROSTER, &mut RandomFieldSampler)?
        }
    };

    let filter = RosterFilter::default();
    let summary = analytics::summarize(&ingest.records, &filter, today);
    render_roster_report(&summary, &ingest, today, list_personnel, &filter);

    if skip_planning {
        return Ok(());
    }

    println!("\nPlanning demo");
    let repository = Arc::new(InMemoryPlanningRepository::default());
    let planning = PlanningService::new(repository);

    let program = match planning.create_program(
        "Core Skills Refresher".to_string(),
        "core skills training".to_string(),
        3,
    ) {
        Ok(program) => program,
        Err(err) => {
            println!("  Planning store unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "- Created program {} '{}' (capacity {})",
        program.id.0, program.name, program.capacity
    );

    let candidates = match planning.program_candidates(&program.id, &ingest.records, &filter, today, 8)
    {
        Ok(candidates) => candidates,
        Err(err) => {
            println!("  Candidate ranking unavailable: {err}");
            return Ok(());
        }
    };
    println!("  Enrollment candidates (neediest first):");
    for candidate in &candidates {
        println!(
            "    - {} {} | {} | training {:.0} | readiness {}",
            candidate.personnel_id,
            candidate.name,
            candidate.specialization,
            candidate.training_score,
            candidate.readiness_score
        );
    }

    // One more enrollment than capacity, to show the at-capacity outcome.
    for candidate in candidates.iter().take(program.capacity + 1) {
        let outcome = match planning.enroll_in_program(&program.id, &candidate.personnel_id) {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("  Enrollment unavailable: {err}");
                return Ok(());
            }
        };
        let note = match outcome {
            EnrollmentOutcome::Enrolled { remaining } => {
                format!("enrolled ({remaining} seat(s) left)")
            }
            EnrollmentOutcome::AlreadyEnrolled => "already enrolled".to_string(),
            EnrollmentOutcome::AtCapacity => "rejected: at capacity".to_string(),
        };
        println!("  Enroll {} -> {}", candidate.personnel_id, note);
    }

    let mission = match planning.create_mission(
        "Signals Sweep".to_string(),
        "restore signals coverage in the northern sector".to_string(),
        2,
    ) {
        Ok(mission) => mission,
        Err(err) => {
            println!("  Planning store unavailable: {err}");
            return Ok(());
        }
    };
    println!(
        "- Created mission {} '{}' (capacity {})",
        mission.id.0, mission.name, mission.capacity
    );

    let candidates = match planning.mission_candidates(&mission.id, &ingest.records, &filter, today, 5)
    {
        Ok(candidates) => candidates,
        Err(err) => {
            println!("  Candidate ranking unavailable: {err}");
            return Ok(());
        }
    };
    println!("  Assignment candidates (most capable first):");
    for candidate in &candidates {
        println!(
            "    - {} {} | {} | readiness {}",
            candidate.personnel_id, candidate.name, candidate.specialization,
            candidate.readiness_score
        );
    }

    Ok(())
}

fn render_roster_report(
    summary: &RosterSummary,
    ingest: &RosterIngest,
    today: NaiveDate,
    list_personnel: bool,
    filter: &RosterFilter,
) {
    println!("\nRoster report (evaluated {today})");
    println!("Population: {}", summary.population);

    if ingest.anomalies.is_empty() {
        println!("Ingestion anomalies: none");
    } else {
        println!("Ingestion anomalies:");
        for anomaly in &ingest.anomalies {
            println!("- row {}: {}", anomaly.row, anomaly.kind.describe());
        }
    }

    println!("\nRank distribution");
    for entry in &summary.ranks {
        println!("- {}: {} ({:.1}%)", entry.value, entry.count, entry.pct);
    }

    println!("\nReadiness score bands");
    for band in &summary.readiness_score_bands {
        println!("- {}: {} ({:.1}%)", band.band, band.count, band.pct);
    }

    println!("\nAttrition risk");
    for tier in &summary.risk_tiers {
        println!("- {}: {} ({:.1}%)", tier.tier_label, tier.count, tier.pct);
    }

    println!("\nTop training recommendations");
    for entry in &summary.top_recommendations {
        println!(
            "- {}: {} ({:.1}% of population)",
            entry.recommendation, entry.count, entry.pct
        );
    }

    println!("\nTop specializations");
    for entry in &summary.top_specializations {
        println!("- {}: {}", entry.specialization, entry.count);
    }

    if list_personnel {
        println!("\nPer-person assessments");
        for record in ingest
            .records
            .iter()
            .filter(|record| filter.matches(record))
        {
            render_personnel_line(record, today);
        }
    }
}

fn render_personnel_line(record: &PersonnelRecord, today: NaiveDate) {
    let assessment = assessment::assess(record, today);
    println!(
        "- {} {} | {} | readiness {} | attrition {} | {}",
        record.id,
        record.name,
        record.rank,
        assessment.readiness_score,
        assessment.attrition_risk.label(),
        assessment.recommendations.join(", ")
    );
}
