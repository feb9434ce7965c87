/*!
 * Integration tests for the full CLI lifecycle
 */

use anyhow::Result;
use phrasecut::app_config::{Config, ConfigOverrides, LLM_HOST_ENV, TRANSLATION_LANGUAGE_ENV};
use phrasecut::app_controller::Controller;
use std::process::Output;
use tokio::process::Command;

use crate::common::{self, StubEndpoint, StubReply};

/// Run the binary with a clean settings environment
async fn run_cli(args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_phrasecut"));
    command
        .args(args)
        .env_remove(LLM_HOST_ENV)
        .env_remove(TRANSLATION_LANGUAGE_ENV);
    for (name, value) in env {
        command.env(name, value);
    }
    Ok(command.output().await?)
}

fn two_segment_stub_replies() -> Vec<StubReply> {
    vec![
        StubReply::generated(r#"["a","b"]"#),
        StubReply::generated("A"),
        StubReply::generated("B"),
    ]
}

#[tokio::test]
async fn test_cli_analise_shouldPrintPrettyJsonOnStdout() -> Result<()> {
    let stub = StubEndpoint::start(two_segment_stub_replies()).await?;

    let output = run_cli(&["analise", "--no-progress", "-l", &stub.url, "a b"], &[]).await?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        "[\n    {\n        \"source\": \"a\",\n        \"translation\": \"A\"\n    },\n    {\n        \"source\": \"b\",\n        \"translation\": \"B\"\n    }\n]\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_cli_withEnvironmentHostAndLanguage_shouldUseThem() -> Result<()> {
    let stub = StubEndpoint::start(two_segment_stub_replies()).await?;

    let output = run_cli(
        &["analise", "--no-progress", "a b"],
        &[(LLM_HOST_ENV, stub.url.as_str()), (TRANSLATION_LANGUAGE_ENV, "de-CH")],
    ).await?;

    assert!(output.status.success());
    let requests = stub.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].prompt().starts_with("Translate the following text to de-CH:"));
    Ok(())
}

#[tokio::test]
async fn test_cli_flagsOverrideEnvironment() -> Result<()> {
    let stub = StubEndpoint::start(two_segment_stub_replies()).await?;
    let unreachable = common::unreachable_url().await?;

    let output = run_cli(
        &["analise", "--no-progress", "--llm-host", &stub.url, "--translation-language", "it-IT", "a b"],
        &[(LLM_HOST_ENV, unreachable.as_str()), (TRANSLATION_LANGUAGE_ENV, "de-CH")],
    ).await?;

    assert!(output.status.success());
    assert!(stub.requests()[2].prompt().starts_with("Translate the following text to it-IT:"));
    Ok(())
}

#[tokio::test]
async fn test_cli_withoutLanguage_shouldTranslateToDefaultAndNoteItOnStderr() -> Result<()> {
    let stub = StubEndpoint::start(two_segment_stub_replies()).await?;

    let output = run_cli(&["analise", "--no-progress", "-l", &stub.url, "a b"], &[]).await?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stderr.contains("Using default translation language: en-US"));
    assert!(!stdout.contains("Using default"));
    assert!(stub.requests()[1].prompt().starts_with("Translate the following text to en-US:"));
    Ok(())
}

#[tokio::test]
async fn test_cli_withoutHost_shouldNoteDefaultEndpointOnStderrOnly() -> Result<()> {
    let output = run_cli(&["analise", "--no-progress", "-t", "en-US", "a b"], &[]).await?;

    let stderr = String::from_utf8(output.stderr)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stderr.contains("Using default Ollama host: http://localhost:11434/api/generate"));
    assert!(!stdout.contains("Using default Ollama host"));
    Ok(())
}

#[tokio::test]
async fn test_cli_withUnreachableHost_shouldExitNonZeroWithoutJson() -> Result<()> {
    let url = common::unreachable_url().await?;

    let output = run_cli(&["analise", "--no-progress", "-l", &url, "a b"], &[]).await?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to reach generation endpoint"));
    Ok(())
}

#[tokio::test]
async fn test_cli_withFailingTranslation_shouldNotPrintPartialOutput() -> Result<()> {
    let stub = StubEndpoint::start(vec![
        StubReply::generated(r#"["a","b"]"#),
        StubReply::generated("A"),
        StubReply::Status(500, "boom".to_string()),
    ]).await?;

    let output = run_cli(&["analise", "--no-progress", "-l", &stub.url, "a b"], &[]).await?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("500"));
    Ok(())
}

#[tokio::test]
async fn test_cli_withNonJsonSegmentation_shouldFail() -> Result<()> {
    let stub = StubEndpoint::start(vec![StubReply::generated("not json")]).await?;

    let output = run_cli(&["analise", "--no-progress", "-l", &stub.url, "a b"], &[]).await?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cli_withLenientJson_shouldAcceptWrappedArray() -> Result<()> {
    let stub = StubEndpoint::start(vec![
        StubReply::generated("```json\n[\"a\"]\n```"),
        StubReply::generated("A"),
    ]).await?;

    let output = run_cli(&["analise", "--no-progress", "--lenient-json", "-l", &stub.url, "a"], &[]).await?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("\"translation\": \"A\""));
    Ok(())
}

#[tokio::test]
async fn test_cli_withoutText_shouldFailArgumentParsing() -> Result<()> {
    let output = run_cli(&["analise"], &[]).await?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cli_withInvalidHost_shouldFailBeforeAnyRequest() -> Result<()> {
    let output = run_cli(&["analise", "--no-progress", "-l", "localhost:11434", "a b"], &[]).await?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid llm-host"));
    Ok(())
}

#[test]
fn test_controller_withDefaults_shouldTargetLiteralDefaultEndpoint() -> Result<()> {
    let config = Config::resolve_with(&ConfigOverrides::default(), |_| None);

    let controller = Controller::with_config(config)?;

    assert_eq!(controller.provider().endpoint(), "http://localhost:11434/api/generate");
    assert_eq!(controller.config().translation_language, "en-US");
    Ok(())
}

#[test]
fn test_controller_run_withDeterministicStub_shouldBeRepeatable() -> Result<()> {
    fn responder(prompt: &str) -> StubReply {
        if prompt.starts_with("Divide") {
            StubReply::generated(r#"["eins","zwei"]"#)
        } else {
            StubReply::generated(prompt.len().to_string())
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let (first, second) = runtime.block_on(async {
        let stub = StubEndpoint::start_with(responder).await?;
        let config = Config::resolve_with(
            &ConfigOverrides {
                llm_host: Some(stub.url.clone()),
                ..Default::default()
            },
            |_| None,
        );
        let controller = Controller::with_config(config)?.with_progress(false);
        let first = controller.run("eins zwei").await?;
        let second = controller.run("eins zwei").await?;
        anyhow::Ok((first, second))
    })?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_controller_run_withBlankText_shouldReturnInputError() -> Result<()> {
    let controller = Controller::with_config(Config::default())?.with_progress(false);

    let result = tokio_test::block_on(async { controller.run("  \n").await });

    assert!(matches!(result, Err(phrasecut::AppError::Input(_))));
    Ok(())
}
