use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::BarbacoaError;
use crate::models::{Barbacoa, BarbacoaRecord, Expense, ExpenseRecord, Participant, PartnerMap};
use crate::services::{BarbacoaService, RosterService, SettlementEngine};
use crate::storage::Storage;

use super::dto::{AjustesResponse, SettleRequest, SettleResponse};
use super::error::Result;

/// Shared by every request; only the store is shared state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    /// Fall back to the roster's partners when a request carries none
    pub partner_priority: bool,
}

impl AppState {
    pub fn new(storage: Arc<Storage>, partner_priority: bool) -> Self {
        Self {
            storage,
            partner_priority,
        }
    }

    fn roster_partners(&self) -> Result<PartnerMap> {
        if self.partner_priority {
            Ok(RosterService::new(&self.storage).partner_map()?)
        } else {
            Ok(PartnerMap::new())
        }
    }
}

fn to_expenses(records: Vec<ExpenseRecord>) -> std::result::Result<Vec<Expense>, BarbacoaError> {
    records.into_iter().map(Expense::try_from).collect()
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "barbacoa",
    }))
}

/// POST /settle
pub async fn settle(
    State(state): State<AppState>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<SettleResponse>> {
    let (records, partners) = request.into_parts();
    let expenses = to_expenses(records)?;
    let partners = match partners {
        Some(partners) => partners,
        None => state.roster_partners()?,
    };

    let transfers = SettlementEngine::with_partners(partners).settle(&expenses);
    Ok(Json(SettleResponse::from(transfers.as_slice())))
}

/// POST /calcular_ajustes
///
/// Bare expense array in, `{"ajustes": [{deudor, acreedor, pago}]}` out.
pub async fn calcular_ajustes(
    State(state): State<AppState>,
    Json(records): Json<Vec<ExpenseRecord>>,
) -> Result<Json<AjustesResponse>> {
    let expenses = to_expenses(records)?;
    let partners = state.roster_partners()?;

    let transfers = SettlementEngine::with_partners(partners).settle(&expenses);
    Ok(Json(AjustesResponse::from(transfers.as_slice())))
}

/// GET /barbacoas
pub async fn list_barbacoas(State(state): State<AppState>) -> Result<Json<Vec<BarbacoaRecord>>> {
    let barbacoas = BarbacoaService::new(&state.storage).list()?;
    Ok(Json(barbacoas.iter().map(BarbacoaRecord::from).collect()))
}

/// GET /barbacoas/:name
pub async fn get_barbacoa(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BarbacoaRecord>> {
    let barbacoa = BarbacoaService::new(&state.storage)
        .find(&name)?
        .ok_or_else(|| BarbacoaError::barbacoa_not_found(name.trim()))?;
    Ok(Json(BarbacoaRecord::from(&barbacoa)))
}

/// POST /barbacoas
pub async fn create_barbacoa(
    State(state): State<AppState>,
    Json(record): Json<BarbacoaRecord>,
) -> Result<impl IntoResponse> {
    let barbacoa = Barbacoa::try_from(record)?;
    let saved = BarbacoaService::new(&state.storage).save(barbacoa)?;
    Ok((StatusCode::CREATED, Json(BarbacoaRecord::from(&saved))))
}

/// DELETE /barbacoas/:name
pub async fn delete_barbacoa(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BarbacoaRecord>> {
    let deleted = BarbacoaService::new(&state.storage).delete(&name)?;
    Ok(Json(BarbacoaRecord::from(&deleted)))
}

/// GET /cuadrilla
pub async fn list_roster(State(state): State<AppState>) -> Result<Json<Vec<Participant>>> {
    Ok(Json(RosterService::new(&state.storage).list()?))
}
