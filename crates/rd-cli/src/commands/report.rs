use rd_core::entities::{ReportScores, ReportTexts};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ReportCommands::Create {
            sub_project_id,
            company_id,
            overall,
            quality,
            timeliness,
            communication,
            strengths,
            improvements,
            recommendations,
            feedback,
        } => {
            let scores = ReportScores {
                overall_rating: *overall,
                quality_rating: *quality,
                timeliness_rating: *timeliness,
                communication_rating: *communication,
            };
            let texts = ReportTexts {
                strengths: strengths.clone(),
                areas_for_improvement: improvements.clone(),
                recommendations: recommendations.clone(),
                general_feedback: feedback.clone(),
            };
            let report = svc
                .create_report(&ctx.actor, sub_project_id, company_id, scores, texts)
                .await?;
            output(&report, flags.format)
        }
        ReportCommands::List { sub_project_id } => {
            output(&svc.list_reports(sub_project_id).await?, flags.format)
        }
        ReportCommands::Get {
            sub_project_id,
            company_id,
        } => output(&svc.get_report(sub_project_id, company_id).await?, flags.format),
        ReportCommands::Eligible {
            sub_project_id,
            company_id,
        } => output(
            &svc.report_eligibility(sub_project_id, company_id).await?,
            flags.format,
        ),
    }
}
