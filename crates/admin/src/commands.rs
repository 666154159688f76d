use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::{Value, json};

use hackerlearn_admin::CatalogClient;
use hackerlearn_core::{ChapterId, CourseId, LessonId};
use hackerlearn_gateway::{ApiResponse, ClientConfig, GatewayMethod, GatewayRequest, TokenStore};
use hackerlearn_metrics::{ApiCheckClient, GoRuntimeSnapshot};

use crate::{Commands, TokenAction};

/// Returns `Ok(false)` when the backend reported a failure.
pub async fn run(command: Commands) -> anyhow::Result<bool> {
    let config = ClientConfig::from_env().context("invalid configuration")?;
    let store: Arc<dyn TokenStore> = Arc::new(config.token_store()?);

    match command {
        Commands::Token { action } => token(store.as_ref(), action).await,
        Commands::Metrics { api } => metrics(&config, &api).await,
        Commands::Call {
            method,
            endpoint,
            body,
        } => {
            let method: GatewayMethod = method.parse()?;
            let request = call_request(endpoint, body.as_deref())?;
            let client = catalog(&config, store)?;
            emit(client.gateway().call::<Value>(method, request).await)
        }
        Commands::Majors => emit(catalog(&config, store)?.list_majors().await),
        Commands::Courses { page } => emit(catalog(&config, store)?.course_page(page).await),
        Commands::Chapters { course } => {
            let id = CourseId::new(course)?;
            emit(catalog(&config, store)?.list_chapters(&id).await)
        }
        Commands::Lessons { chapter } => {
            let id = ChapterId::new(chapter)?;
            emit(catalog(&config, store)?.list_lessons(&id).await)
        }
        Commands::Flashcards { lesson } => {
            let id = LessonId::new(lesson)?;
            emit(catalog(&config, store)?.list_flashcards(&id).await)
        }
    }
}

/// Process exit status for a command outcome: 0 ok, 1 failed call, 2 local error.
pub fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn call_request(endpoint: String, body: Option<&str>) -> anyhow::Result<GatewayRequest> {
    let request = GatewayRequest::new(endpoint);
    match body {
        None => Ok(request),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--body is not valid JSON")?;
            Ok(request.with_json(&value)?)
        }
    }
}

fn catalog(config: &ClientConfig, store: Arc<dyn TokenStore>) -> anyhow::Result<CatalogClient> {
    Ok(CatalogClient::from_config(config, store)?)
}

fn emit<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<bool> {
    print_json(&response)?;
    Ok(response.is_success())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{out}");
    Ok(())
}

async fn token(store: &dyn TokenStore, action: TokenAction) -> anyhow::Result<bool> {
    match action {
        TokenAction::Set { token } => {
            if token.trim().is_empty() {
                bail!("token must not be blank");
            }
            store.save(&token).await?;
            tracing::info!("access token stored");
        }
        TokenAction::Clear => {
            store.clear().await?;
            tracing::info!("access token cleared");
        }
        TokenAction::Show => {
            let token = store.load().await?;
            print_json(&json!({
                "present": token.is_some(),
                "preview": token.as_deref().map(preview),
            }))?;
        }
    }
    Ok(true)
}

/// First few characters only; the token itself never hits stdout.
fn preview(token: &str) -> String {
    let head: String = token.chars().take(6).collect();
    format!("{head}…")
}

async fn metrics(config: &ClientConfig, api: &str) -> anyhow::Result<bool> {
    let client = ApiCheckClient::new(config)?;
    let set = client
        .fetch(api)
        .await
        .with_context(|| format!("failed to fetch metrics for {api}"))?;

    print_json(&json!({
        "api": api,
        "go_runtime": GoRuntimeSnapshot::from_metrics(&set),
        "samples": set.samples(),
    }))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use hackerlearn_gateway::GatewayError;

    use crate::Cli;

    #[test]
    fn preview_shows_only_the_head() {
        assert_eq!(preview("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbG…");
        assert_eq!(preview("abc"), "abc…");
    }

    #[test]
    fn call_body_must_be_a_json_object() {
        let err = call_request("/chapter".into(), Some("[1, 2]")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatewayError>(),
            Some(GatewayError::InvalidBody(_))
        ));
        assert_eq!(exit_status(&Err(err)), 2);

        let err = call_request("/chapter".into(), Some("{not json")).unwrap_err();
        assert!(err.to_string().contains("--body"));

        let req = call_request("/chapter".into(), Some(r#"{"name":"Ch1"}"#)).unwrap();
        assert_eq!(req.endpoint(), "/chapter");
        assert_eq!(req.body().and_then(|b| b.get("name")), Some(&json!("Ch1")));
        assert!(call_request("/course/all".into(), None).unwrap().body().is_none());
    }

    #[test]
    fn exit_status_follows_outcome() {
        assert_eq!(exit_status(&Ok(true)), 0);
        assert_eq!(exit_status(&Ok(false)), 1);
    }

    #[test]
    fn call_command_parses() {
        let cli = Cli::try_parse_from([
            "hackerlearn-admin",
            "call",
            "post-public",
            "/chapter",
            "--body",
            r#"{"name":"Ch1"}"#,
        ])
        .unwrap();
        match cli.command {
            Commands::Call { method, endpoint, body } => {
                assert_eq!(method.parse::<GatewayMethod>().unwrap(), GatewayMethod::PostPublic);
                assert_eq!(endpoint, "/chapter");
                assert!(body.is_some());
            }
            _ => panic!("expected the call command"),
        }
        assert!(Cli::try_parse_from(["hackerlearn-admin", "courses", "--page", "x"]).is_err());
    }
}
