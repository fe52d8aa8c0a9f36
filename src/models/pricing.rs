// src/models/pricing.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Enums (como chegam do formulário) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum AdjustmentKind {
    #[default]
    None,
    Surcharge, // Acréscimo
    Discount,  // Desconto
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum AdjustmentMode {
    #[default]
    Flat,       // Integral (R$)
    Percentage, // Porcentagem sobre o valor base
}

/// Valor do ajuste, já com o modo embutido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentAmount {
    Flat(Decimal),
    Percentage(Decimal),
}

/// Ajuste final do orçamento. "Nenhum" não carrega valor, então um valor
/// solto sem tipo não tem como ser representado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjustment {
    #[default]
    None,
    Surcharge(AdjustmentAmount),
    Discount(AdjustmentAmount),
}

impl Adjustment {
    pub fn from_parts(kind: AdjustmentKind, mode: AdjustmentMode, value: Decimal) -> Self {
        let amount = match mode {
            AdjustmentMode::Flat => AdjustmentAmount::Flat(value),
            AdjustmentMode::Percentage => AdjustmentAmount::Percentage(value),
        };
        match kind {
            AdjustmentKind::None => Adjustment::None,
            AdjustmentKind::Surcharge => Adjustment::Surcharge(amount),
            AdjustmentKind::Discount => Adjustment::Discount(amount),
        }
    }

    pub fn kind(&self) -> AdjustmentKind {
        match self {
            Adjustment::None => AdjustmentKind::None,
            Adjustment::Surcharge(_) => AdjustmentKind::Surcharge,
            Adjustment::Discount(_) => AdjustmentKind::Discount,
        }
    }
}

/// Valores padrão da empresa (registro de configurações).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingDefaults {
    #[schema(example = "30.00")]
    pub fuel_per_day: Decimal,
    #[schema(example = "10.00")]
    pub toll_per_day: Decimal,
    #[schema(example = "25.00")]
    pub meal_per_person: Decimal,
    #[schema(example = "50.00")]
    pub hourly_rate: Decimal,
}

/// Entradas da calculadora. Efêmero, nunca persistido como tal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingInputs {
    pub daily_hours: String, // "HH:MM"
    pub headcount: u32,
    pub hourly_rate: Decimal,
    pub number_of_days: u32,
    pub fuel_per_day: Decimal,
    pub toll_per_day: Decimal,
    pub meal_per_person: Decimal,
    pub adjustment: Adjustment,
}

impl PricingInputs {
    pub const DEFAULT_DAILY_HOURS: &'static str = "08:00";

    /// Estado inicial da calculadora: 08:00, 1 funcionário, 1 dia, sem ajuste.
    pub fn from_defaults(defaults: &PricingDefaults) -> Self {
        Self {
            daily_hours: Self::DEFAULT_DAILY_HOURS.to_string(),
            headcount: 1,
            hourly_rate: defaults.hourly_rate,
            number_of_days: 1,
            fuel_per_day: defaults.fuel_per_day,
            toll_per_day: defaults.toll_per_day,
            meal_per_person: defaults.meal_per_person,
            adjustment: Adjustment::None,
        }
    }
}

// Valores intermediários exibidos ao lado do total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub decimal_hours: Decimal,
    pub daily_labor_cost: Decimal,
    pub total_labor_cost: Decimal,
    pub transport_cost: Decimal,
    pub meal_cost: Decimal,
    pub base_service_value: Decimal,
    pub adjustment_delta: Decimal,
    pub total: Decimal,
}

// --- Payload / Resposta da API ---

/// Todo campo é opcional: ausente = valor padrão da sessão (não mexido).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuoteRequest {
    #[schema(example = "08:30")]
    pub daily_hours: Option<String>,
    #[schema(example = 2)]
    pub headcount: Option<u32>,
    #[schema(example = "50.00")]
    pub hourly_rate: Option<Decimal>,
    #[schema(example = 5)]
    pub number_of_days: Option<u32>,
    pub fuel_per_day: Option<Decimal>,
    pub toll_per_day: Option<Decimal>,
    pub meal_per_person: Option<Decimal>,
    pub adjustment_kind: Option<AdjustmentKind>,
    pub adjustment_mode: Option<AdjustmentMode>,
    pub adjustment_value: Option<Decimal>,
    // Total de um orçamento clonado
    #[schema(example = "4450.00")]
    pub initial_total: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    pub total: Decimal,
    pub seeded_from_clone: bool,
    pub breakdown: PricingBreakdown,
    pub defaults: PricingDefaults,
}
