//! Shared test utilities for rd-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use rd_core::entities::{Company, Project, SubProject, Task};
    use rd_core::enums::TaskStatus;

    use crate::repos::company::NewCompany;
    use crate::repos::project::NewProject;
    use crate::repos::sub_project::NewSubProject;
    use crate::repos::task::NewTask;
    use crate::service::RdService;

    pub const ACTOR: &str = "usr-test";

    /// In-memory service with a fresh schema.
    pub async fn test_service() -> RdService {
        RdService::new_local(":memory:").await.unwrap()
    }

    pub async fn seed_project(svc: &RdService) -> Project {
        svc.create_project(ACTOR, NewProject::named("Export readiness 2024"))
            .await
            .unwrap()
    }

    pub async fn seed_sub_project(svc: &RdService) -> SubProject {
        let project = seed_project(svc).await;
        svc.create_sub_project(ACTOR, &project.id, NewSubProject::named("Market entry"))
            .await
            .unwrap()
    }

    pub async fn seed_company(svc: &RdService, name: &str) -> Company {
        svc.register_company(ACTOR, NewCompany::named(name))
            .await
            .unwrap()
    }

    /// Register a company and assign it to the sub-project.
    pub async fn seed_assigned_company(
        svc: &RdService,
        sub_project_id: &str,
        name: &str,
    ) -> Company {
        let company = seed_company(svc, name).await;
        svc.assign_companies(ACTOR, sub_project_id, &[company.id.clone()])
            .await
            .unwrap();
        company
    }

    pub async fn seed_task(svc: &RdService, sub_project_id: &str, title: &str) -> Task {
        svc.create_task(ACTOR, sub_project_id, NewTask::titled(title))
            .await
            .unwrap()
    }

    /// Drive a task through review to completion.
    pub async fn complete_task(svc: &RdService, task_id: &str) -> Task {
        svc.transition_task(ACTOR, task_id, TaskStatus::InReview)
            .await
            .unwrap();
        svc.transition_task(ACTOR, task_id, TaskStatus::Completed)
            .await
            .unwrap()
    }
}
