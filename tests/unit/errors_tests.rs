/*!
 * Tests for error types and conversions
 */

use std::error::Error;

use tilawa::errors::{AppError, LoadError, PlaybackError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 404,
        message: "Edition not found".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("404"));
    assert!(display.contains("Edition not found"));
}

#[test]
fn test_providerError_connectionError_shouldDisplayCorrectly() {
    let error = ProviderError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_loadError_fetch_shouldNameEditionAndKeepSource() {
    let error = LoadError::Fetch {
        edition: "en.sahih".to_string(),
        source: ProviderError::ParseError("unexpected end".to_string()),
    };
    let display = format!("{}", error);
    assert!(display.contains("en.sahih"));
    assert!(display.contains("unexpected end"));
    assert!(error.source().is_some());
}

#[test]
fn test_playbackError_shouldDisplayCorrectly() {
    let spawn = PlaybackError::SpawnFailed {
        command: "mpv".to_string(),
        message: "No such file or directory".to_string(),
    };
    assert!(format!("{}", spawn).contains("mpv"));

    let rejected = PlaybackError::Rejected {
        locator: "https://cdn.example/1.mp3".to_string(),
        reason: "404".to_string(),
    };
    assert!(format!("{}", rejected).contains("https://cdn.example/1.mp3"));
    assert_eq!(format!("{}", PlaybackError::NoAudio), "No audio available");
}

#[test]
fn test_appError_fromLoadError_shouldWrapCorrectly() {
    let app_error: AppError = LoadError::EmptyContent("ar.alafasy".to_string()).into();
    match app_error {
        AppError::Load(LoadError::EmptyContent(edition)) => assert_eq!(edition, "ar.alafasy"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref msg) if msg == "something odd"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeConfig() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::Config(_)));
}

#[test]
fn test_appError_startPosition_shouldNameSectionAndItem() {
    assert_eq!(
        format!("{}", AppError::SectionNotFound(115)),
        "Section 115 does not exist"
    );
    assert_eq!(
        format!("{}", AppError::ItemNotFound { section: 1, item: 8 }),
        "Section 1 has no item 8"
    );
}
