//! Dashboard counts.
//!
//! ```text
//! GET /api/v1/dashboard/stats
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DashboardStats, DepartmentCounts, PriorityCounts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DepartmentCountsResponse {
    pub admin: u64,
    pub finance: u64,
    pub hr: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountsResponse {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

/// Counts over every ticket the caller can see. Each breakdown sums to
/// `total`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub on_hold: u64,
    pub cancelled: u64,
    pub closed: u64,
    pub by_department: DepartmentCountsResponse,
    pub by_priority: PriorityCountsResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: StatsResponse,
}

impl From<DepartmentCounts> for DepartmentCountsResponse {
    fn from(value: DepartmentCounts) -> Self {
        Self {
            admin: value.admin,
            finance: value.finance,
            hr: value.hr,
        }
    }
}

impl From<PriorityCounts> for PriorityCountsResponse {
    fn from(value: PriorityCounts) -> Self {
        Self {
            low: value.low,
            medium: value.medium,
            high: value.high,
        }
    }
}

impl From<DashboardStats> for StatsResponse {
    fn from(value: DashboardStats) -> Self {
        Self {
            total: value.total,
            open: value.open,
            in_progress: value.in_progress,
            on_hold: value.on_hold,
            cancelled: value.cancelled,
            closed: value.closed,
            by_department: value.by_department.into(),
            by_priority: value.by_priority.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Ticket counts", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardStats"
)]
#[get("/dashboard/stats")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let actor = state.require_actor(&session).await?;
    let stats = state.tickets_query.dashboard_stats(&actor).await?;
    Ok(web::Json(DashboardResponse {
        stats: stats.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTicketQuery;
    use crate::domain::{Error, Role};
    use crate::inbound::http::test_utils::{login_as, test_session_middleware};
    use crate::inbound::http::users::login;
    use crate::test_support::TestWorld;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn sample_stats() -> DashboardStats {
        DashboardStats {
            total: 4,
            open: 2,
            in_progress: 1,
            on_hold: 0,
            cancelled: 0,
            closed: 1,
            by_department: DepartmentCounts {
                admin: 4,
                finance: 0,
                hr: 0,
            },
            by_priority: PriorityCounts {
                low: 1,
                medium: 1,
                high: 2,
            },
        }
    }

    async fn call_with(query: MockTicketQuery) -> actix_web::dev::ServiceResponse {
        let world = TestWorld::new();
        world.seed_user("admin.manager", Role::Admin).await;
        let mut state = world.http_state();
        state.tickets_query = Arc::new(query);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(login).service(dashboard_stats)),
        )
        .await;
        let cookie = login_as(&app, "admin.manager").await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await
    }

    #[rstest]
    #[actix_web::test]
    async fn stats_are_wrapped_in_camel_case() {
        let mut query = MockTicketQuery::new();
        query
            .expect_dashboard_stats()
            .withf(|actor| actor.role() == Role::Admin)
            .times(1)
            .return_once(|_| Ok(sample_stats()));

        let response = call_with(query).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["stats"]["total"], 4);
        assert_eq!(body["stats"]["inProgress"], 1);
        assert_eq!(
            body["stats"]["byPriority"],
            json!({ "low": 1, "medium": 1, "high": 2 })
        );
        assert_eq!(body["stats"]["byDepartment"]["admin"], 4);
    }

    #[rstest]
    #[actix_web::test]
    async fn unavailable_store_maps_to_503() {
        let mut query = MockTicketQuery::new();
        query
            .expect_dashboard_stats()
            .return_once(|_| Err(Error::service_unavailable("ticket repository unavailable")));

        let response = call_with(query).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
