//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

use crate::models::{ExpenseRecord, PartnerMap, Transfer, TransferRecord};

/// Body of `POST /settle`
///
/// Either a bare array of expenses or an object that may also carry the
/// partner map. Without partners the server falls back to the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettleRequest {
    Expenses(Vec<ExpenseRecord>),
    WithPartners {
        #[serde(alias = "gastos")]
        expenses: Vec<ExpenseRecord>,
        #[serde(default, alias = "parejas", skip_serializing_if = "Option::is_none")]
        partners: Option<PartnerMap>,
    },
}

impl SettleRequest {
    pub fn into_parts(self) -> (Vec<ExpenseRecord>, Option<PartnerMap>) {
        match self {
            Self::Expenses(expenses) => (expenses, None),
            Self::WithPartners { expenses, partners } => (expenses, partners),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleResponse {
    pub transfers: Vec<TransferRecord>,
}

impl From<&[Transfer]> for SettleResponse {
    fn from(transfers: &[Transfer]) -> Self {
        Self {
            transfers: transfers.iter().map(TransferRecord::from).collect(),
        }
    }
}

/// Transfer in the shape `POST /calcular_ajustes` has always answered with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ajuste {
    pub deudor: String,
    pub acreedor: String,
    pub pago: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AjustesResponse {
    pub ajustes: Vec<Ajuste>,
}

impl From<&[Transfer]> for AjustesResponse {
    fn from(transfers: &[Transfer]) -> Self {
        Self {
            ajustes: transfers
                .iter()
                .map(|t| Ajuste {
                    deudor: t.debtor.clone(),
                    acreedor: t.creditor.clone(),
                    pago: t.amount.to_decimal(),
                })
                .collect(),
        }
    }
}
