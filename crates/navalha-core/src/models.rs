use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BARBER: &str = "barbeiro";
pub const ROLE_RECEPTIONIST: &str = "recepcionista";

pub const STATUS_SCHEDULED: &str = "agendado";
pub const STATUS_CONFIRMED: &str = "confirmado";
pub const STATUS_IN_PROGRESS: &str = "em_andamento";
pub const STATUS_DONE: &str = "concluido";
pub const STATUS_CANCELLED: &str = "cancelado";

pub const APPOINTMENT_STATUSES: [&str; 5] = [
    STATUS_SCHEDULED,
    STATUS_CONFIRMED,
    STATUS_IN_PROGRESS,
    STATUS_DONE,
    STATUS_CANCELLED,
];

/// The backend carries money as decimal reais; the client keeps centavos.
pub(crate) mod reais {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(centavos: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*centavos as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok((amount * 100.0).round() as i64)
    }
}

pub(crate) mod reais_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        centavos: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match centavos {
            Some(value) => serializer.serialize_some(&(*value as f64 / 100.0)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        let amount = Option::<f64>::deserialize(deserializer)?;
        Ok(amount.map(|value| (value * 100.0).round() as i64))
    }
}

pub fn format_brl(centavos: i64) -> String {
    format!("R$ {:.2}", centavos as f64 / 100.0)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Service {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco", with = "reais")]
    pub price_centavos: i64,
    #[serde(rename = "duracao_minutos")]
    pub duration_minutes: i64,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "preco", with = "reais")]
    pub price_centavos: i64,
    #[serde(rename = "duracao_minutos")]
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "preco",
        with = "reais_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_centavos: Option<i64>,
    #[serde(rename = "duracao_minutos", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(rename = "ativo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Barber {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slot {
    #[serde(rename = "datetime")]
    pub iso_date_time: String,
    #[serde(rename = "formatted_time")]
    pub display_label: String,
    pub available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetails {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "aceite_lgpd")]
    pub lgpd_consent: bool,
}

impl ClientDetails {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
            && self.lgpd_consent
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "cliente")]
    pub client: ClientDetails,
    #[serde(rename = "barbeiro_id")]
    pub barber_id: i64,
    #[serde(rename = "servico_id")]
    pub service_id: i64,
    #[serde(rename = "data_hora")]
    pub date_time: String,
    #[serde(rename = "observacoes")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub appointment_id: Option<i64>,
    #[serde(rename = "cliente_nome", default)]
    pub client_name: Option<String>,
    #[serde(rename = "barbeiro_nome", default)]
    pub barber_name: Option<String>,
    #[serde(rename = "servico_nome", default)]
    pub service_name: Option<String>,
    #[serde(rename = "data_hora", default)]
    pub date_time: Option<String>,
    #[serde(rename = "valor", default)]
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "barbeiro_id")]
    pub barber_id: i64,
    #[serde(rename = "servico_id")]
    pub service_id: i64,
    #[serde(rename = "data_hora")]
    pub date_time: String,
    pub status: String,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDraft {
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "barbeiro_id")]
    pub barber_id: i64,
    #[serde(rename = "servico_id")]
    pub service_id: i64,
    #[serde(rename = "data_hora")]
    pub date_time: String,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentUpdate {
    #[serde(rename = "data_hora", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientRecord {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "aceite_lgpd", default)]
    pub lgpd_consent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "aceite_lgpd")]
    pub lgpd_consent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientUpdate {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ativo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffUser {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethod {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleItemDraft {
    #[serde(rename = "servico_id")]
    pub service_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "preco_unitario", with = "reais")]
    pub unit_price_centavos: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleDraft {
    #[serde(rename = "cliente_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(rename = "itens")]
    pub items: Vec<SaleItemDraft>,
    #[serde(rename = "desconto", with = "reais")]
    pub discount_centavos: i64,
    #[serde(rename = "metodo_pagamento")]
    pub payment_method: String,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    #[serde(rename = "servico_id")]
    pub service_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "preco_unitario", with = "reais")]
    pub unit_price_centavos: i64,
    #[serde(rename = "subtotal", with = "reais")]
    pub subtotal_centavos: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(rename = "vendedor_id")]
    pub seller_id: i64,
    #[serde(rename = "cliente_id", default)]
    pub client_id: Option<i64>,
    #[serde(rename = "total", with = "reais")]
    pub total_centavos: i64,
    #[serde(rename = "desconto", with = "reais")]
    pub discount_centavos: i64,
    #[serde(rename = "metodo_pagamento")]
    pub payment_method: String,
    #[serde(rename = "criado_em")]
    pub created_at: String,
    #[serde(rename = "itens", default)]
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CashStatus {
    pub has_open_cash: bool,
    #[serde(default)]
    pub cash_register_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CashRegister {
    pub id: i64,
    #[serde(rename = "operador_id")]
    pub operator_id: i64,
    #[serde(rename = "valor_inicial", with = "reais")]
    pub opening_centavos: i64,
    #[serde(rename = "valor_final", default, with = "reais_opt")]
    pub closing_centavos: Option<i64>,
    #[serde(rename = "valor_vendas_dinheiro", default, with = "reais_opt")]
    pub cash_sales_centavos: Option<i64>,
    #[serde(rename = "valor_vendas_cartao", default, with = "reais_opt")]
    pub card_sales_centavos: Option<i64>,
    #[serde(rename = "valor_vendas_pix", default, with = "reais_opt")]
    pub pix_sales_centavos: Option<i64>,
    pub status: String,
    #[serde(rename = "data_abertura")]
    pub opened_at: String,
    #[serde(rename = "data_fechamento", default)]
    pub closed_at: Option<String>,
}

impl CashRegister {
    pub fn sales_total_centavos(&self) -> i64 {
        self.cash_sales_centavos.unwrap_or(0)
            + self.card_sales_centavos.unwrap_or(0)
            + self.pix_sales_centavos.unwrap_or(0)
    }

    pub fn expected_closing_centavos(&self) -> i64 {
        self.opening_centavos + self.cash_sales_centavos.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashOpenDraft {
    #[serde(rename = "valor_inicial", with = "reais")]
    pub opening_centavos: i64,
    #[serde(rename = "observacoes_abertura", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashCloseDraft {
    #[serde(rename = "valor_final", with = "reais")]
    pub closing_centavos: i64,
    #[serde(
        rename = "observacoes_fechamento",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardStats {
    #[serde(rename = "agendamentos_hoje")]
    pub appointments_today: i64,
    #[serde(rename = "faturamento_mes", with = "reais")]
    pub month_revenue_centavos: i64,
    #[serde(rename = "clientes_total")]
    pub total_clients: i64,
    #[serde(rename = "agendamentos_pendentes")]
    pub pending_appointments: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuickStats {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "total_sales", with = "reais")]
    pub total_sales_centavos: i64,
    pub total_appointments: i64,
    pub new_clients: i64,
    pub sales_trend: f64,
    #[serde(rename = "avg_ticket", with = "reais")]
    pub avg_ticket_centavos: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: String,
}
