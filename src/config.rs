// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{FinanceRepository, MemoryStore, ProposalRepository, SettingsRepository},
    services::{DashboardService, FinanceService, PricingService, ProposalService, SettingsService},
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROPOSAL_ICON_URL: &str = "https://i.ibb.co/FbCJhRsZ/icone-Orcamento-Trans-JPS.png";

/// Configuração do processo, lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub bind_addr: String,
    pub proposal_icon_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(3),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            proposal_icon_url: Some(DEFAULT_PROPOSAL_ICON_URL.to_string()),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // .env é opcional: em produção as variáveis vêm do ambiente
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.db_max_connections,
        };
        let db_acquire_timeout = match env::var("DB_ACQUIRE_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse()?),
            Err(_) => defaults.db_acquire_timeout,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            db_max_connections,
            db_acquire_timeout,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            // PROPOSAL_ICON_URL="" desliga o ícone
            proposal_icon_url: match env::var("PROPOSAL_ICON_URL") {
                Ok(url) if url.trim().is_empty() => None,
                Ok(url) => Some(url),
                Err(_) => defaults.proposal_icon_url,
            },
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub i18n_store: I18nStore,
    pub pricing_service: PricingService,
    pub proposal_service: ProposalService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("⚠️ DATABASE_URL não definida: usando armazenamento em memória (dados não persistem)");
            return Ok(Self::in_memory(MemoryStore::new(), config.proposal_icon_url.clone()));
        };

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!().run(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        // --- Monta o gráfico de dependências ---
        let proposals = Arc::new(ProposalRepository::new(db_pool.clone()));
        let movements = Arc::new(FinanceRepository::new(db_pool.clone()));
        let settings = Arc::new(SettingsRepository::new(db_pool));

        Ok(Self {
            i18n_store: I18nStore::new(),
            pricing_service: PricingService::new(settings.clone()),
            proposal_service: ProposalService::new(proposals, config.proposal_icon_url.clone()),
            finance_service: FinanceService::new(movements.clone()),
            dashboard_service: DashboardService::new(movements, settings.clone()),
            settings_service: SettingsService::new(settings),
        })
    }

    /// Todos os serviços sobre o mesmo `MemoryStore` (modo local e testes).
    pub fn in_memory(store: MemoryStore, proposal_icon_url: Option<String>) -> Self {
        let store = Arc::new(store);

        Self {
            i18n_store: I18nStore::new(),
            pricing_service: PricingService::new(store.clone()),
            proposal_service: ProposalService::new(store.clone(), proposal_icon_url),
            finance_service: FinanceService::new(store.clone()),
            dashboard_service: DashboardService::new(store.clone(), store.clone()),
            settings_service: SettingsService::new(store),
        }
    }
}
