use crate::config::SyncConfig;
use crate::format::FileFormat;
use crate::lokalise::{ApiError, Language, MockTranslationApi, QueuedProcess, UploadRequest};
use crate::sync::SyncError;
use crate::sync::push::*;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use mockall::predicate::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ES_JSON: &str = r#"{"GREETING": "Hola,"}"#;
const EN_PO: &str = r#"msgid "GREETING"
msgstr "Hello,"
"#;

fn language(code: &str) -> Language {
    Language {
        lang_iso: code.to_string(),
        lang_name: None,
    }
}

fn queued(process_id: &str, status: &str) -> QueuedProcess {
    QueuedProcess {
        process_id: process_id.to_string(),
        status: status.to_string(),
    }
}

fn placeholder_dir(root: &Path) -> String {
    format!("{}/%LANG_ISO%", root.display())
}

#[test]
fn test_detect_mode_from_placeholder() {
    assert_eq!(
        PushMode::detect("./locales/%LANG_ISO%/LC_MESSAGES"),
        PushMode::AllLanguages
    );
    assert_eq!(PushMode::detect("./locales/en"), PushMode::BaseLanguage);
}

#[tokio::test]
async fn test_push_all_languages_uploads_each_file() {
    let temp_dir = TempDir::new().unwrap();
    let es_dir = temp_dir.path().join("es");
    fs::create_dir_all(&es_dir).unwrap();
    fs::write(es_dir.join("common.json"), ES_JSON).unwrap();
    fs::write(es_dir.join("README.md"), "not uploaded").unwrap();

    let config =
        SyncConfig::new("123.abc", FileFormat::Json, placeholder_dir(temp_dir.path())).unwrap();

    let expected = UploadRequest::new(
        BASE64_STANDARD.encode(ES_JSON),
        "common.json",
        "es",
        false,
    );

    let mut mock_api = MockTranslationApi::new();
    mock_api
        .expect_list_languages()
        .with(eq("123.abc"))
        .times(1)
        .returning(|_| Ok(vec![language("es")]));
    mock_api
        .expect_upload_file()
        .with(eq("123.abc"), eq(expected))
        .times(1)
        .returning(|_, _| Ok(queued("p-1", "queued")));
    mock_api
        .expect_process_status()
        .with(eq("123.abc"), eq("p-1"))
        .times(1)
        .returning(|_, _| Ok(queued("p-1", "finished")));

    let summary = push_files(&mock_api, &config).await.unwrap();

    assert_eq!(
        summary.uploads,
        vec![UploadOutcome {
            path: es_dir.join("common.json"),
            lang_iso: "es".to_string(),
            process_id: "p-1".to_string(),
            status: "finished".to_string(),
        }]
    );
    assert!(summary.skipped.is_empty());
}

#[tokio::test]
async fn test_push_base_language_never_lists_languages() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("django.po"), EN_PO).unwrap();

    let directory = temp_dir.path().display().to_string();
    let config = SyncConfig::new("123.abc", FileFormat::Po, directory).unwrap();

    let mut mock_api = MockTranslationApi::new();
    mock_api.expect_list_languages().never();
    mock_api
        .expect_upload_file()
        .withf(|_, request| {
            request.lang_iso == "en"
                && request.filename == "django.po"
                && request.tags == vec!["Pushed".to_string()]
                && !request.convert_placeholders
                && request.skip_detect_lang_iso
        })
        .times(1)
        .returning(|_, _| Ok(queued("p-2", "queued")));
    mock_api
        .expect_process_status()
        .times(1)
        .returning(|_, _| Ok(queued("p-2", "running")));

    let summary = push_files(&mock_api, &config).await.unwrap();

    assert_eq!(summary.uploads.len(), 1);
    assert_eq!(summary.uploads[0].lang_iso, "en");
    assert_eq!(summary.uploads[0].status, "running");
}

#[tokio::test]
async fn test_push_files_in_name_order_then_language_order() {
    let temp_dir = TempDir::new().unwrap();
    for code in ["fr", "de"] {
        let dir = temp_dir.path().join(code);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.json"), "{}").unwrap();
        fs::write(dir.join("a.json"), "{}").unwrap();
    }

    let config = SyncConfig::new(
        "123.abc",
        FileFormat::JsonStructured,
        placeholder_dir(temp_dir.path()),
    )
    .unwrap();

    let mut mock_api = MockTranslationApi::new();
    mock_api
        .expect_list_languages()
        .returning(|_| Ok(vec![language("fr"), language("de")]));
    mock_api
        .expect_upload_file()
        .times(4)
        .returning(|_, request| Ok(queued(&request.filename, "queued")));
    mock_api
        .expect_process_status()
        .times(4)
        .returning(|_, process_id| Ok(queued(process_id, "finished")));

    let summary = push_files(&mock_api, &config).await.unwrap();

    let order: Vec<(String, String)> = summary
        .uploads
        .iter()
        .map(|u| (u.lang_iso.clone(), u.process_id.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("fr".to_string(), "a.json".to_string()),
            ("fr".to_string(), "b.json".to_string()),
            ("de".to_string(), "a.json".to_string()),
            ("de".to_string(), "b.json".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_language_directory_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let es_dir = temp_dir.path().join("es");
    fs::create_dir_all(&es_dir).unwrap();
    fs::write(es_dir.join("common.json"), ES_JSON).unwrap();

    let config =
        SyncConfig::new("123.abc", FileFormat::Json, placeholder_dir(temp_dir.path())).unwrap();

    let mut mock_api = MockTranslationApi::new();
    mock_api
        .expect_list_languages()
        .returning(|_| Ok(vec![language("de"), language("es")]));
    mock_api
        .expect_upload_file()
        .times(1)
        .returning(|_, _| Ok(queued("p-3", "queued")));
    mock_api
        .expect_process_status()
        .times(1)
        .returning(|_, _| Ok(queued("p-3", "queued")));

    let summary = push_files(&mock_api, &config).await.unwrap();

    assert_eq!(summary.uploads.len(), 1);
    assert_eq!(summary.uploads[0].lang_iso, "es");
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].path, temp_dir.path().join("de"));
}

#[tokio::test]
async fn test_language_mapping_selects_local_directory() {
    let temp_dir = TempDir::new().unwrap();
    let zh_dir = temp_dir.path().join("zh_CN");
    fs::create_dir_all(&zh_dir).unwrap();
    fs::write(zh_dir.join("common.json"), r#"{"GREETING": "你好"}"#).unwrap();

    let config = SyncConfig::new("123.abc", FileFormat::Json, placeholder_dir(temp_dir.path()))
        .unwrap()
        .with_language_mapping(BTreeMap::from([(
            "zh_Hans".to_string(),
            "zh_CN".to_string(),
        )]));

    let mut mock_api = MockTranslationApi::new();
    mock_api
        .expect_list_languages()
        .returning(|_| Ok(vec![language("zh_Hans")]));
    mock_api
        .expect_upload_file()
        .withf(|_, request| request.lang_iso == "zh_Hans")
        .times(1)
        .returning(|_, _| Ok(queued("p-4", "queued")));
    mock_api
        .expect_process_status()
        .returning(|_, _| Ok(queued("p-4", "finished")));

    let summary = push_files(&mock_api, &config).await.unwrap();

    assert_eq!(summary.uploads[0].path, zh_dir.join("common.json"));
}

#[tokio::test]
async fn test_replace_modified_is_passed_through() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("en.json"), "{}").unwrap();

    let config = SyncConfig::new(
        "123.abc",
        FileFormat::Json,
        temp_dir.path().display().to_string(),
    )
    .unwrap()
    .with_replace_modified(true);

    let mut mock_api = MockTranslationApi::new();
    mock_api
        .expect_upload_file()
        .withf(|_, request| request.replace_modified)
        .times(1)
        .returning(|_, _| Ok(queued("p-5", "queued")));
    mock_api
        .expect_process_status()
        .returning(|_, _| Ok(queued("p-5", "queued")));

    push_files(&mock_api, &config).await.unwrap();
}

#[tokio::test]
async fn test_upload_failure_ends_push() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
    fs::write(temp_dir.path().join("b.json"), "{}").unwrap();

    let config = SyncConfig::new(
        "123.abc",
        FileFormat::Json,
        temp_dir.path().display().to_string(),
    )
    .unwrap();

    let mut mock_api = MockTranslationApi::new();
    mock_api.expect_upload_file().times(1).returning(|_, _| {
        Err(ApiError::Status {
            status: 413,
            message: "File too large".to_string(),
        })
    });
    mock_api.expect_process_status().never();

    let err = push_files(&mock_api, &config).await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Remote(ApiError::Status { status: 413, .. })
    ));
}
