//! Read-only category taxonomy.
//!
//! ```text
//! GET /api/v1/taxonomy
//! ```

use std::sync::OnceLock;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Department;
use crate::domain::taxonomy::categories;
use crate::inbound::http::schemas::DepartmentSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = "IT Assets")]
    pub name: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentTaxonomy {
    #[schema(value_type = DepartmentSchema)]
    pub department: Department,
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaxonomyResponse {
    pub departments: Vec<DepartmentTaxonomy>,
}

fn taxonomy() -> &'static TaxonomyResponse {
    static TAXONOMY: OnceLock<TaxonomyResponse> = OnceLock::new();
    TAXONOMY.get_or_init(|| TaxonomyResponse {
        departments: Department::ALL
            .into_iter()
            .map(|department| DepartmentTaxonomy {
                department,
                categories: categories(department)
                    .iter()
                    .map(|category| CategoryResponse {
                        name: category.name.to_owned(),
                        subcategories: category
                            .subcategories
                            .iter()
                            .map(|sub| (*sub).to_owned())
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Categories and subcategories offered per department.
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy",
    responses((status = 200, description = "Ticket taxonomy", body = TaxonomyResponse)),
    tags = ["tickets"],
    operation_id = "taxonomy",
    security([])
)]
#[get("/taxonomy")]
pub async fn get_taxonomy() -> web::Json<&'static TaxonomyResponse> {
    web::Json(taxonomy())
}
