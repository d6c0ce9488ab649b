//! Invoice preview and summary endpoints.
//!
//! Both load the caller's entries and client registry under the lock, then
//! select and aggregate outside of it.

use crate::db::clients::Clients;
use crate::db::entries::Entries;
use crate::libs::entry::WorkEntry;
use crate::libs::invoice::{build_invoice, Invoice};
use crate::libs::period::{filter_by_period, parse_reference, Period, PeriodKind};
use crate::libs::rate::RateBook;
use crate::libs::summary::{aggregate, Summary};
use crate::libs::validate::{lenient_number, period_bound};
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    #[serde(default, alias = "startDate")]
    pub from: Option<String>,
    #[serde(default, alias = "endDate")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePreview {
    pub user_id: String,
    #[serde(flatten)]
    pub invoice: Invoice,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    #[serde(default)]
    pub period: Option<PeriodKind>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// Rate for entries that resolve to none.
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(flatten)]
    pub summary: Summary,
}

pub async fn invoice_preview(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<Json<InvoicePreview>> {
    let Json(request) = body?;
    let period = Period::new(period_bound("from", request.from)?, period_bound("to", request.to)?);
    let (entries, rates) = load_ledger(&state, &auth.user_id, None)?;

    let selected = filter_by_period(&entries, &period);
    let invoice = build_invoice(selected, &rates, request.hourly_rate, period);

    Ok(Json(InvoicePreview {
        user_id: auth.user_id,
        invoice,
    }))
}

pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> ApiResult<Json<SummaryResponse>> {
    let Query(query) = query?;

    let reference = match query.reference.as_deref() {
        Some(value) => parse_reference(value).map_err(|_| ApiError::BadRequest(format!("reference must be formatted as YYYY-MM-DD, got '{}'", value)))?,
        None => Local::now().date_naive(),
    };
    let from = period_bound("from", query.from)?;
    let to = period_bound("to", query.to)?;
    let period = Period::resolve(query.period.unwrap_or(PeriodKind::Custom), reference, from, to);

    let (entries, rates) = load_ledger(&state, &auth.user_id, query.hourly_rate)?;
    let summary = aggregate(filter_by_period(&entries, &period), &rates);

    Ok(Json(SummaryResponse {
        from: period.from,
        to: period.to,
        summary,
    }))
}

/// Entries and rate registry of `user_id`. A positive `fallback` replaces
/// the configured fallback rate.
fn load_ledger(state: &AppState, user_id: &str, fallback: Option<f64>) -> ApiResult<(Vec<WorkEntry>, RateBook)> {
    let (entries, clients) = {
        let conn = state.db.lock();
        (Entries::new(&conn).list_by_user(user_id)?, Clients::new(&conn).list_by_user(user_id)?)
    };
    let fallback = fallback.filter(|r| r.is_finite() && *r > 0.0).unwrap_or(state.settings.fallback_rate);
    Ok((entries, RateBook::new(clients).with_fallback(fallback)))
}
