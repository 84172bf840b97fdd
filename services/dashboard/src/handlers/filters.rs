//! Selector options for the period filter.

use axum::{
    extract::{Query, State},
    response::Json,
};
use estoque_analytics::{available_months, available_years};
use estoque_models::month_label;
use estoque_utils::parse_year;
use serde::{Deserialize, Serialize};

use super::is_all_selection;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    /// Most recent first.
    pub years: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct MonthsQuery {
    pub year: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MonthOption {
    pub number: u32,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MonthsResponse {
    pub year: Option<i32>,
    pub months: Vec<MonthOption>,
}

/// GET /api/v1/filters/years
pub async fn get_years(State(state): State<AppState>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: available_years(&state.inventory),
    })
}

/// GET /api/v1/filters/months?year=2024
///
/// Without a year only "all" applies, so the list is empty.
pub async fn get_months(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> ApiResult<Json<MonthsResponse>> {
    let year = match query.year.as_deref() {
        Some(value) if !is_all_selection(value) => Some(parse_year(value)?),
        _ => None,
    };

    let months = available_months(&state.inventory, year)
        .into_iter()
        .filter_map(|number| month_label(number).map(|label| MonthOption { number, label }))
        .collect();

    Ok(Json(MonthsResponse { year, months }))
}
