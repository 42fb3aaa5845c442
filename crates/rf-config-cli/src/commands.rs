//! Command execution against a `GameConfigService`

use anyhow::{Context, Result};
use rf_game_config::{
    ConfigStore, ErrorResponse, GameConfigError, GameConfigService, RawGameConfig, RawUpdateRequest,
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::{Commands, read_input};

/// What a command produced
#[derive(Debug)]
pub enum Output {
    /// Success envelope, printed as JSON
    Json(Value),
    /// Plain text, printed as is
    Text(String),
    /// Structured failure from the service
    Failed(ErrorResponse),
}

impl Output {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn render(&self) -> Result<String> {
        match self {
            Self::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            Self::Text(text) => Ok(text.clone()),
            Self::Failed(response) => Ok(serde_json::to_string_pretty(response)?),
        }
    }
}

fn success<T: Serialize>(data: T) -> Result<Output> {
    Ok(Output::Json(json!({ "status": "success", "data": data })))
}

fn outcome<T: Serialize>(result: Result<T, GameConfigError>) -> Result<Output> {
    match result {
        Ok(data) => success(data),
        Err(err) => Ok(Output::Failed(err.to_response())),
    }
}

/// Run one command; service failures become `Output::Failed`, I/O and
/// malformed request documents become `Err`
pub async fn execute<S: ConfigStore>(
    service: &GameConfigService<S>,
    command: Commands,
) -> Result<Output> {
    match command {
        Commands::Create { input } => {
            let raw = parse_fields(&read_input(&input)?)?;
            outcome(service.create_game_config(&raw).await)
        }
        Commands::Update { id, input } => {
            let body = read_input(&input)?;
            let (id, raw) = match id {
                Some(id) => (id, parse_fields(&body)?),
                None => {
                    let request = RawUpdateRequest::from_json(&body)
                        .context("Update request needs an `id` or `objectId` field")?;
                    (request.id, request.fields)
                }
            };
            outcome(service.update_game_config(&id, &raw).await)
        }
        Commands::Get { id } => outcome(service.get_game_config(&id).await),
        Commands::Find { game_name } => {
            let result = service.fetch_game_rtp_data(&game_name).await;
            match result {
                Ok(records) if records.is_empty() => Ok(Output::Failed(ErrorResponse {
                    status: "error".to_string(),
                    code: 404,
                    message: format!("No records found for Game Name: {game_name}"),
                    field: None,
                    reason: None,
                })),
                other => outcome(other),
            }
        }
        Commands::Check { input } => {
            let raw = parse_fields(&read_input(&input)?)?;
            outcome(service.validator().validate(&raw).map_err(GameConfigError::from))
        }
        Commands::ShowConfig => {
            let text = service.validator().config().to_toml()?;
            Ok(Output::Text(text))
        }
    }
}

fn parse_fields(body: &str) -> Result<RawGameConfig> {
    RawGameConfig::from_json(body).context("Request is not a JSON object of game config fields")
}
