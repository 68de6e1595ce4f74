//! Handler for the `/chatbot` route: forwards questions to the upstream AI
//! service and falls back to the character database when it is unavailable.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use vietsu_core::error::CoreError;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::character::Character;
use vietsu_db::repositories::CharacterRepo;

use crate::config::ChatbotConfig;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Question length cap; longer input is a client mistake, not a prompt.
const MAX_QUESTION_LENGTH: usize = 2000;

/// How many matching characters feed the fallback answer.
const FALLBACK_MATCH_LIMIT: i64 = 3;

/// Upstream request timeout. The fallback answers when this trips.
const UPSTREAM_TIMEOUT_SECS: u64 = 20;

/// Request body for `POST /chatbot`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Chatbot answer plus where it came from.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    /// `ai` when the upstream service answered, `database` for the fallback.
    pub source: &'static str,
}

/// POST /chatbot
///
/// Sends the question to the configured AI service. Any upstream problem
/// (unconfigured, timeout, non-2xx, unparseable body) degrades to a
/// database-built answer instead of an error.
pub async fn ask(
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.question, "question").map_err(AppError::Core)?;
    if input.question.len() > MAX_QUESTION_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Question must be at most {MAX_QUESTION_LENGTH} bytes"
        ))));
    }

    if let Some(chatbot) = &state.config.chatbot {
        match ask_upstream(chatbot, &input.question).await {
            Ok(answer) => {
                return Ok(Json(DataResponse {
                    data: ChatResponse {
                        answer,
                        source: "ai",
                    },
                }));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chatbot upstream failed; using database fallback");
            }
        }
    }

    let answer = fallback_answer(&state, &input.question).await?;
    Ok(Json(DataResponse {
        data: ChatResponse {
            answer,
            source: "database",
        },
    }))
}

/// Call the generative-language API and extract the first candidate's text.
async fn ask_upstream(config: &ChatbotConfig, question: &str) -> Result<String, String> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .build()
        .map_err(|e| format!("client build: {e}"))?;

    let prompt = format!(
        "Bạn là trợ lý lịch sử Việt Nam. Trả lời ngắn gọn, chính xác bằng tiếng Việt.\n\nCâu hỏi: {question}"
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });

    let response = client
        .post(format!("{}?key={}", config.api_url, config.api_key))
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("request: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("upstream status {}", response.status()));
    }

    let payload: serde_json::Value = response.json().await.map_err(|e| format!("decode: {e}"))?;
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "no candidate text in response".to_string())
}

/// Build an answer from character summaries matching words in the question.
async fn fallback_answer(state: &AppState, question: &str) -> Result<String, AppError> {
    // Search on the longest words first; short tokens match everything.
    let mut terms: Vec<&str> = question
        .split_whitespace()
        .filter(|w| w.chars().count() >= 3)
        .collect();
    terms.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

    let mut matches: Vec<Character> = Vec::new();
    for term in terms.iter().take(5) {
        let found = CharacterRepo::search(&state.pool, term, FALLBACK_MATCH_LIMIT).await?;
        for character in found {
            if !matches.iter().any(|c| c.id == character.id) {
                matches.push(character);
            }
        }
        if matches.len() as i64 >= FALLBACK_MATCH_LIMIT {
            break;
        }
    }

    if matches.is_empty() {
        return Ok(
            "Xin lỗi, tôi chưa có thông tin về câu hỏi này. Bạn có thể tham khảo danh sách nhân vật lịch sử trên trang web.".to_string(),
        );
    }

    let mut answer = String::from("Dựa trên dữ liệu của chúng tôi:\n");
    for character in matches.iter().take(FALLBACK_MATCH_LIMIT as usize) {
        answer.push_str(&format!("\n{}", character.name));
        if let Some(timeline) = &character.timeline {
            answer.push_str(&format!(" ({timeline})"));
        }
        if let Some(summary) = &character.summary {
            answer.push_str(&format!(": {summary}"));
        }
        answer.push('\n');
    }
    Ok(answer)
}
