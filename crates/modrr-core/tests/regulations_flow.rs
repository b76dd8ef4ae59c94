use modrr_core::llm::{CompletionProvider, LlmError};
use modrr_core::relay::{RegulationsRelay, RelayReply};
use modrr_core::session::{UploadDecision, UploadState};
use modrr_core::storage::{InMemoryStore, JsonFileStore, RegulationsStore};
use std::sync::{Arc, Mutex};

struct RecordingProvider {
    prompts: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl CompletionProvider for RecordingProvider {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .map_err(|e| LlmError::ApiError(e.to_string()))?
            .push(prompt.to_string());
        Ok("Mock Response".to_string())
    }
}

#[tokio::test]
async fn test_uploaded_regulations_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("regulations.json");

    let mut state = UploadState::default();
    let (decision, next) = state.begin_upload();
    assert_eq!(decision, UploadDecision::Prompt);
    state = next;

    {
        let store = JsonFileStore::open(&path).await.expect("open");
        store
            .save_regulations("Регистрация с 9:00, доклады по 15 минут.".to_string())
            .await
            .expect("save");
        state = state.complete();
    }

    // Same user asks again within the process lifetime
    let (decision, _) = state.begin_upload();
    assert_eq!(decision, UploadDecision::AlreadySubmitted);

    let reopened = JsonFileStore::open(&path).await.expect("reopen");
    assert_eq!(
        reopened.get_regulations().await.expect("read"),
        Some("Регистрация с 9:00, доклады по 15 минут.".to_string())
    );

    let raw = std::fs::read_to_string(&path).expect("raw");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(
        doc["default_regulations"],
        "Регистрация с 9:00, доклады по 15 минут."
    );
}

#[tokio::test]
async fn test_group_question_prompt_contains_prefix_and_regulations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prompt_file = dir.path().join("prompt.txt");
    std::fs::write(&prompt_file, "Ты помощник организатора.").expect("prompt");

    let store: Arc<dyn RegulationsStore> = Arc::new(InMemoryStore::new());
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let provider = Arc::new(RecordingProvider {
        prompts: prompts.clone(),
    });

    let relay = RegulationsRelay::new(store, provider, prompt_file);

    assert_eq!(
        relay.answer("Во сколько обед?").await.expect("answer"),
        RelayReply::NotConfigured
    );
    assert!(prompts.lock().expect("lock").is_empty());

    relay
        .store_regulations("Обед в 13:00.\nУжин в 19:00.")
        .await
        .expect("store");

    let reply = relay.answer("Во сколько обед?").await.expect("answer");
    assert_eq!(reply, RelayReply::Answer("Mock Response".to_string()));

    let recorded = prompts.lock().expect("lock");
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].starts_with("Ты помощник организатора."));
    assert!(recorded[0].contains("Обед в 13:00.\nУжин в 19:00."));
    assert!(recorded[0].ends_with("Вопрос: Во сколько обед?\n\nОтвет:"));
}
