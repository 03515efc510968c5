//! Quote records.
//!
//! A quote wraps the quotation service's response: the branch and
//! distributor that requested it plus one or more quotations, each with its
//! detail-requests and coverage lines. The console never writes quotes.

use serde::{Deserialize, Serialize};

use super::entity::{string_or_number, Entity, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "response_body")]
    pub body: QuoteBody,
    #[serde(rename = "message_error", default)]
    pub error_message: Option<String>,
    #[serde(rename = "es_dato_valido", default)]
    pub is_valid: bool,
}

impl Quote {
    pub fn first_quotation(&self) -> Option<&Quotation> {
        self.body.quotations.first()
    }

    /// The detail-request the quotes table displays and sorts on
    pub fn first_request(&self) -> Option<&DetailRequest> {
        self.first_quotation().and_then(|q| q.detail_requests.first())
    }
}

impl Entity for Quote {
    const RESOURCE: Resource = Resource::Quotes;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteBody {
    #[serde(rename = "id_convenio", default)]
    pub agreement_id: String,
    #[serde(rename = "suc_clave", default)]
    pub branch_key: String,
    #[serde(rename = "suc_nombre", default)]
    pub branch_name: String,
    #[serde(rename = "distribuidor_clave", default)]
    pub distributor_key: String,
    #[serde(rename = "distribuidor_nombre", default)]
    pub distributor_name: String,
    #[serde(rename = "distribuidor_email", default)]
    pub distributor_email: String,
    #[serde(rename = "cotizaciones", default)]
    pub quotations: Vec<Quotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "plan_comercial", default)]
    pub commercial_plan: String,
    #[serde(rename = "prima_neta", default)]
    pub net_premium: f64,
    #[serde(rename = "iva_notal", default)]
    pub tax: f64,
    #[serde(rename = "prima_total", default)]
    pub total_premium: f64,
    #[serde(rename = "det_solicitudes", default)]
    pub detail_requests: Vec<DetailRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRequest {
    #[serde(deserialize_with = "string_or_number", default)]
    pub id: String,
    #[serde(default)]
    pub plan: String,
    #[serde(rename = "renovacion", default)]
    pub renewal: i64,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "paquete", default)]
    pub package: String,
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "ini_vig_reportada", default)]
    pub start_date: String,
    #[serde(rename = "fin_vig_reportada", default)]
    pub end_date: Option<String>,
    #[serde(rename = "plazo_reportado", default)]
    pub term: i64,
    #[serde(rename = "tipo_vig", default)]
    pub term_kind: i64,
    #[serde(rename = "sum_aseg_4", default)]
    pub insured_amount: f64,
    #[serde(rename = "sum_aseg_5", default)]
    pub insured_amount_5: Option<f64>,
    #[serde(rename = "sum_aseg_6", default)]
    pub insured_amount_6: Option<f64>,
    #[serde(rename = "coberturas", default)]
    pub coverages: Vec<Coverage>,
}

/// One coverage line of a detail-request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(rename = "clave_cobertura", default)]
    pub key: Option<String>,
    #[serde(rename = "prima", default)]
    pub premium: Option<f64>,
}
