//! Report gate and evaluation store.
//!
//! A report may be filed for a (sub-project, company) pair once every task of
//! the sub-project is completed. Reports are write-once; the schema rejects
//! updates and deletes.

use chrono::Utc;
use libsql::Connection;
use rd_core::entities::{EvaluationReport, ReportScores, ReportTexts};
use rd_core::enums::{AuditAction, EntityType};
use rd_core::errors::CoreError;
use rd_core::events::WorkflowEvent;
use rd_core::ids::PREFIX_REPORT;
use rd_core::responses::EligibilityResponse;

use super::assignment::{is_actively_assigned, task_completion};
use super::audit::{AuditRecord, append_audit};
use super::company::fetch_company;
use super::optional_text;
use super::sub_project::fetch_sub_project;
use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{get_opt_string, parse_datetime};
use crate::next_id;
use crate::service::RdService;

const SELECT_COLS: &str = "id, sub_project_id, company_id, overall_rating, quality_rating, \
     timeliness_rating, communication_rating, strengths, areas_for_improvement, \
     recommendations, general_feedback, created_by, created_at";

fn get_rating(row: &libsql::Row, idx: i32) -> Result<i32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    i32::try_from(raw).map_err(|_| DatabaseError::Query(format!("rating out of range: {raw}")))
}

fn row_to_report(row: &libsql::Row) -> Result<EvaluationReport, DatabaseError> {
    Ok(EvaluationReport {
        id: row.get(0)?,
        sub_project_id: row.get(1)?,
        company_id: row.get(2)?,
        scores: ReportScores {
            overall_rating: get_rating(row, 3)?,
            quality_rating: get_rating(row, 4)?,
            timeliness_rating: get_rating(row, 5)?,
            communication_rating: get_rating(row, 6)?,
        },
        texts: ReportTexts {
            strengths: get_opt_string(row, 7)?,
            areas_for_improvement: get_opt_string(row, 8)?,
            recommendations: get_opt_string(row, 9)?,
            general_feedback: get_opt_string(row, 10)?,
        },
        created_by: row.get(11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

async fn fetch_report(
    conn: &Connection,
    sub_project_id: &str,
    company_id: &str,
) -> Result<Option<EvaluationReport>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM evaluation_reports
                 WHERE sub_project_id = ?1 AND company_id = ?2"
            ),
            [sub_project_id, company_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_report(&row)?)),
        None => Ok(None),
    }
}

fn duplicate(sub_project_id: &str, company_id: &str) -> DatabaseError {
    CoreError::DuplicateReport {
        sub_project_id: sub_project_id.to_string(),
        company_id: company_id.to_string(),
    }
    .into()
}

fn normalize(texts: ReportTexts) -> ReportTexts {
    ReportTexts {
        strengths: optional_text(texts.strengths.as_deref()),
        areas_for_improvement: optional_text(texts.areas_for_improvement.as_deref()),
        recommendations: optional_text(texts.recommendations.as_deref()),
        general_feedback: optional_text(texts.general_feedback.as_deref()),
    }
}

impl RdService {
    /// Gate state for a company in a sub-project, with the counts behind it.
    pub async fn report_eligibility(
        &self,
        sub_project_id: &str,
        company_id: &str,
    ) -> Result<EligibilityResponse, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_sub_project(conn, sub_project_id).await?;
        fetch_company(conn, company_id).await?;
        let completion = task_completion(conn, sub_project_id).await?;
        Ok(EligibilityResponse {
            sub_project_id: sub_project_id.to_string(),
            company_id: company_id.to_string(),
            eligible: completion.is_report_eligible(),
            completion,
        })
    }

    /// True iff the sub-project has at least one task and all are completed.
    pub async fn is_report_eligible(
        &self,
        sub_project_id: &str,
        company_id: &str,
    ) -> Result<bool, DatabaseError> {
        Ok(self
            .report_eligibility(sub_project_id, company_id)
            .await?
            .eligible)
    }

    /// File the evaluation report for a company.
    ///
    /// Checks run in order: scores, existence of sub-project and company, an
    /// active assignment of the company, the gate, then uniqueness. A concurrent insert that slips past the
    /// uniqueness read is caught by the UNIQUE constraint and reported the same way.
    pub async fn create_report(
        &self,
        actor: &str,
        sub_project_id: &str,
        company_id: &str,
        scores: ReportScores,
        texts: ReportTexts,
    ) -> Result<EvaluationReport, DatabaseError> {
        scores.validate()?;
        let texts = normalize(texts);
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<EvaluationReport, DatabaseError> = async {
            fetch_sub_project(&tx, sub_project_id).await?;
            fetch_company(&tx, company_id).await?;
            if !is_actively_assigned(&tx, sub_project_id, company_id).await? {
                return Err(CoreError::NotAssigned {
                    sub_project_id: sub_project_id.to_string(),
                    company_id: company_id.to_string(),
                }
                .into());
            }

            let completion = task_completion(&tx, sub_project_id).await?;
            if !completion.is_report_eligible() {
                return Err(CoreError::GateNotSatisfied {
                    sub_project_id: sub_project_id.to_string(),
                    completed: completion.completed,
                    total: completion.total,
                }
                .into());
            }
            if fetch_report(&tx, sub_project_id, company_id).await?.is_some() {
                return Err(duplicate(sub_project_id, company_id));
            }

            let report = EvaluationReport {
                id: next_id(&tx, PREFIX_REPORT).await?,
                sub_project_id: sub_project_id.to_string(),
                company_id: company_id.to_string(),
                scores,
                texts,
                created_by: actor.to_string(),
                created_at: now,
            };
            tx.execute(
                &format!(
                    "INSERT INTO evaluation_reports ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                libsql::params![
                    report.id.as_str(),
                    sub_project_id,
                    company_id,
                    i64::from(report.scores.overall_rating),
                    i64::from(report.scores.quality_rating),
                    i64::from(report.scores.timeliness_rating),
                    i64::from(report.scores.communication_rating),
                    report.texts.strengths.as_deref(),
                    report.texts.areas_for_improvement.as_deref(),
                    report.texts.recommendations.as_deref(),
                    report.texts.general_feedback.as_deref(),
                    actor,
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate(sub_project_id, company_id)
                } else {
                    e.into()
                }
            })?;

            append_audit(
                &tx,
                AuditRecord {
                    actor_id: actor,
                    entity_type: EntityType::EvaluationReport,
                    entity_id: &report.id,
                    action: AuditAction::Created,
                    detail: None,
                    at: now,
                },
            )
            .await?;
            Ok(report)
        }
        .await;
        let report = tx.finish(result).await?;

        tracing::info!(
            report_id = %report.id,
            sub_project_id,
            company_id,
            actor,
            "evaluation report created"
        );
        self.emit(WorkflowEvent::ReportCreated {
            report_id: report.id.clone(),
            sub_project_id: report.sub_project_id.clone(),
            company_id: report.company_id.clone(),
            actor_id: actor.to_string(),
            at: now,
        });
        Ok(report)
    }

    /// Reports of a sub-project in filing order.
    pub async fn list_reports(
        &self,
        sub_project_id: &str,
    ) -> Result<Vec<EvaluationReport>, DatabaseError> {
        let _read = self.db().read().await;
        let conn = self.db().conn();
        fetch_sub_project(conn, sub_project_id).await?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM evaluation_reports WHERE sub_project_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [sub_project_id],
            )
            .await?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            reports.push(row_to_report(&row)?);
        }
        Ok(reports)
    }

    pub async fn get_report(
        &self,
        sub_project_id: &str,
        company_id: &str,
    ) -> Result<EvaluationReport, DatabaseError> {
        let _read = self.db().read().await;
        fetch_report(self.db().conn(), sub_project_id, company_id)
            .await?
            .ok_or_else(|| {
                CoreError::not_found(
                    EntityType::EvaluationReport,
                    format!("{sub_project_id}/{company_id}"),
                )
                .into()
            })
    }
}
