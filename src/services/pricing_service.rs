// src/services/pricing_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        money::{check_amount, check_magnitude},
    },
    db::SettingsStore,
    models::pricing::{
        Adjustment, AdjustmentAmount, AdjustmentKind, AdjustmentMode, PricingBreakdown,
        PricingDefaults, PricingInputs, PricingQuote, PricingQuoteRequest,
    },
};

const MINUTES_PER_HOUR: u32 = 60;

pub const MAX_HEADCOUNT: u32 = 10_000;
pub const MAX_NUMBER_OF_DAYS: u32 = 3_650;

/// "HH:MM" -> horas decimais. Sem ":" (ou com partes inválidas) vale 0.
pub fn parse_daily_hours(raw: &str) -> Decimal {
    let Some((hours, minutes)) = raw.trim().split_once(':') else {
        return Decimal::ZERO;
    };
    // "08:30:00" -> considera só horas e minutos
    let minutes = minutes.split(':').next().unwrap_or_default();

    match (hours.trim().parse::<u32>(), minutes.trim().parse::<u32>()) {
        (Ok(h), Ok(m)) => Decimal::from(h) + Decimal::from(m) / Decimal::from(MINUTES_PER_HOUR),
        _ => Decimal::ZERO,
    }
}

fn overflow(step: &str) -> AppError {
    AppError::InvalidInput(format!("valores grandes demais para calcular ({})", step))
}

/// Calcula todos os passos do orçamento. A ordem das operações é fixa.
/// Estouro de `Decimal` em qualquer passo vira `InvalidInput`.
pub fn compute_breakdown(inputs: &PricingInputs) -> Result<PricingBreakdown, AppError> {
    let headcount = Decimal::from(inputs.headcount);
    let days = Decimal::from(inputs.number_of_days);

    // 1. Valor do Dia
    let decimal_hours = parse_daily_hours(&inputs.daily_hours);
    let daily_labor_cost = decimal_hours
        .checked_mul(inputs.hourly_rate)
        .and_then(|v| v.checked_mul(headcount))
        .ok_or_else(|| overflow("valor do dia"))?;

    // 2. Mão de Obra Total
    let total_labor_cost = daily_labor_cost
        .checked_mul(days)
        .ok_or_else(|| overflow("mão de obra"))?;

    // 3. Logística
    let transport_cost = inputs
        .fuel_per_day
        .checked_add(inputs.toll_per_day)
        .and_then(|v| v.checked_mul(days))
        .ok_or_else(|| overflow("transporte"))?;
    let meal_cost = inputs
        .meal_per_person
        .checked_mul(headcount)
        .and_then(|v| v.checked_mul(days))
        .ok_or_else(|| overflow("alimentação"))?;

    // 4. Valor do Serviço Base
    let base_service_value = total_labor_cost
        .checked_add(transport_cost)
        .and_then(|v| v.checked_add(meal_cost))
        .ok_or_else(|| overflow("valor base"))?;

    // 5. Ajustes (sem clamp: desconto maior que a base fica negativo)
    let delta_of = |amount: &AdjustmentAmount| match amount {
        AdjustmentAmount::Flat(value) => Some(*value),
        AdjustmentAmount::Percentage(pct) => pct
            .checked_mul(base_service_value)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED)),
    };
    let (adjustment_delta, total) = match &inputs.adjustment {
        Adjustment::None => (Decimal::ZERO, Some(base_service_value)),
        Adjustment::Surcharge(amount) => {
            let delta = delta_of(amount).ok_or_else(|| overflow("ajuste"))?;
            (delta, base_service_value.checked_add(delta))
        }
        Adjustment::Discount(amount) => {
            let delta = delta_of(amount).ok_or_else(|| overflow("ajuste"))?;
            (delta, base_service_value.checked_sub(delta))
        }
    };
    let total = total.ok_or_else(|| overflow("total"))?;

    Ok(PricingBreakdown {
        decimal_hours,
        daily_labor_cost,
        total_labor_cost,
        transport_cost,
        meal_cost,
        base_service_value,
        adjustment_delta,
        total,
    })
}

pub fn compute_total(inputs: &PricingInputs) -> Result<Decimal, AppError> {
    Ok(compute_breakdown(inputs)?.total)
}

/// Valores monetários não podem ser negativos (o total pode) nem passar do
/// que a coluna guarda; quantidade de funcionários e de dias tem teto.
pub fn validate_inputs(inputs: &PricingInputs) -> Result<(), AppError> {
    let adjustment_value = match inputs.adjustment {
        Adjustment::None => Decimal::ZERO,
        Adjustment::Surcharge(AdjustmentAmount::Flat(v) | AdjustmentAmount::Percentage(v))
        | Adjustment::Discount(AdjustmentAmount::Flat(v) | AdjustmentAmount::Percentage(v)) => v,
    };

    let fields = [
        ("hourlyRate", inputs.hourly_rate),
        ("fuelPerDay", inputs.fuel_per_day),
        ("tollPerDay", inputs.toll_per_day),
        ("mealPerPerson", inputs.meal_per_person),
        ("adjustmentValue", adjustment_value),
    ];
    for (name, value) in fields {
        check_amount(name, value)?;
    }

    if inputs.headcount > MAX_HEADCOUNT {
        return Err(AppError::InvalidInput(format!("headcount acima de {}", MAX_HEADCOUNT)));
    }
    if inputs.number_of_days > MAX_NUMBER_OF_DAYS {
        return Err(AppError::InvalidInput(format!("numberOfDays acima de {}", MAX_NUMBER_OF_DAYS)));
    }
    Ok(())
}

pub fn validate_defaults(defaults: &PricingDefaults) -> Result<(), AppError> {
    validate_inputs(&PricingInputs::from_defaults(defaults))
}

/// Uma sessão da calculadora. Começa nos padrões da empresa e, se veio de um
/// orçamento clonado, reporta o total original até o primeiro input mudar.
#[derive(Debug, Clone)]
pub struct PricingSession {
    inputs: PricingInputs,
    initial_total: Option<Decimal>,
    dirty: bool,
    adjustment_kind: AdjustmentKind,
    adjustment_mode: AdjustmentMode,
    adjustment_value: Decimal,
}

impl PricingSession {
    pub fn new(defaults: &PricingDefaults) -> Self {
        Self {
            inputs: PricingInputs::from_defaults(defaults),
            initial_total: None,
            dirty: false,
            adjustment_kind: AdjustmentKind::None,
            adjustment_mode: AdjustmentMode::Flat,
            adjustment_value: Decimal::ZERO,
        }
    }

    pub fn cloned_from(defaults: &PricingDefaults, initial_total: Decimal) -> Self {
        Self {
            initial_total: Some(initial_total),
            ..Self::new(defaults)
        }
    }

    pub fn inputs(&self) -> &PricingInputs {
        &self.inputs
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// O total clonado só vale enquanto nada foi editado (e se for diferente de zero).
    pub fn reports_initial_total(&self) -> bool {
        !self.dirty && self.initial_total.is_some_and(|t| !t.is_zero())
    }

    pub fn total(&self) -> Result<Decimal, AppError> {
        match self.initial_total {
            Some(initial) if self.reports_initial_total() => Ok(initial),
            _ => compute_total(&self.inputs),
        }
    }

    pub fn set_daily_hours(&mut self, value: impl Into<String>) {
        self.inputs.daily_hours = value.into();
        self.dirty = true;
    }

    pub fn set_headcount(&mut self, value: u32) {
        self.inputs.headcount = value;
        self.dirty = true;
    }

    pub fn set_hourly_rate(&mut self, value: Decimal) {
        self.inputs.hourly_rate = value;
        self.dirty = true;
    }

    pub fn set_number_of_days(&mut self, value: u32) {
        self.inputs.number_of_days = value;
        self.dirty = true;
    }

    pub fn set_fuel_per_day(&mut self, value: Decimal) {
        self.inputs.fuel_per_day = value;
        self.dirty = true;
    }

    pub fn set_toll_per_day(&mut self, value: Decimal) {
        self.inputs.toll_per_day = value;
        self.dirty = true;
    }

    pub fn set_meal_per_person(&mut self, value: Decimal) {
        self.inputs.meal_per_person = value;
        self.dirty = true;
    }

    pub fn set_adjustment_kind(&mut self, kind: AdjustmentKind) {
        self.adjustment_kind = kind;
        self.rebuild_adjustment();
    }

    pub fn set_adjustment_mode(&mut self, mode: AdjustmentMode) {
        self.adjustment_mode = mode;
        self.rebuild_adjustment();
    }

    pub fn set_adjustment_value(&mut self, value: Decimal) {
        self.adjustment_value = value;
        self.rebuild_adjustment();
    }

    fn rebuild_adjustment(&mut self) {
        self.inputs.adjustment =
            Adjustment::from_parts(self.adjustment_kind, self.adjustment_mode, self.adjustment_value);
        self.dirty = true;
    }
}

#[derive(Clone)]
pub struct PricingService {
    settings: Arc<dyn SettingsStore>,
}

impl PricingService {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Padrões lidos uma vez no início da sessão; sobrescritas não são salvas.
    pub async fn load_defaults(&self) -> Result<PricingDefaults, AppError> {
        Ok(self.settings.get().await?.pricing)
    }

    pub async fn quote(&self, request: &PricingQuoteRequest) -> Result<PricingQuote, AppError> {
        let defaults = self.load_defaults().await?;
        let session = Self::session_for(&defaults, request);

        validate_inputs(session.inputs())?;

        let breakdown = compute_breakdown(session.inputs())?;
        let seeded_from_clone = session.reports_initial_total();
        let total = session.total()?;
        check_magnitude("total", total)?;

        if total.is_sign_negative() && !total.is_zero() {
            tracing::warn!(
                "⚠️ Orçamento com total negativo ({}): desconto maior que o valor base {}",
                total,
                breakdown.base_service_value
            );
        }

        Ok(PricingQuote {
            total,
            seeded_from_clone,
            breakdown,
            defaults,
        })
    }

    // Cada campo presente no request conta como uma edição do usuário.
    fn session_for(defaults: &PricingDefaults, request: &PricingQuoteRequest) -> PricingSession {
        let mut session = match request.initial_total {
            Some(initial) => PricingSession::cloned_from(defaults, initial),
            None => PricingSession::new(defaults),
        };

        if let Some(v) = &request.daily_hours {
            session.set_daily_hours(v.clone());
        }
        if let Some(v) = request.headcount {
            session.set_headcount(v);
        }
        if let Some(v) = request.hourly_rate {
            session.set_hourly_rate(v);
        }
        if let Some(v) = request.number_of_days {
            session.set_number_of_days(v);
        }
        if let Some(v) = request.fuel_per_day {
            session.set_fuel_per_day(v);
        }
        if let Some(v) = request.toll_per_day {
            session.set_toll_per_day(v);
        }
        if let Some(v) = request.meal_per_person {
            session.set_meal_per_person(v);
        }
        if let Some(v) = request.adjustment_kind {
            session.set_adjustment_kind(v);
        }
        if let Some(v) = request.adjustment_mode {
            session.set_adjustment_mode(v);
        }
        if let Some(v) = request.adjustment_value {
            session.set_adjustment_value(v);
        }

        session
    }
}
