use std::collections::HashMap;

use axum::{extract::State, Form};
use tracing::{debug, info};

use crate::assistant::resolve_reply;
use crate::state::AppState;
use crate::twiml::{Record, VoiceResponse};

/// Form field carrying the provider's transcription result
pub const TRANSCRIPTION_FIELD: &str = "TranscriptionText";

/// Answer a new call: prompt the caller, then record and transcribe.
pub async fn voice(State(state): State<AppState>) -> VoiceResponse {
    let call = &state.config.call_config;
    debug!("Incoming call, recording up to {}s", call.max_length);

    VoiceResponse::new().say(call.greeting.as_str()).record(Record {
        action: call.process_path.clone(),
        max_length: call.max_length,
        transcribe: true,
    })
}

/// Turn a transcription callback into a spoken reply.
pub async fn process(
    State(state): State<AppState>,
    form: Option<Form<HashMap<String, String>>>,
) -> VoiceResponse {
    // A missing or unreadable body is treated like an empty transcription
    let form = form.map(|Form(fields)| fields).unwrap_or_default();
    debug!("Process callback form: {:?}", form);

    let transcription = form.get(TRANSCRIPTION_FIELD).map(String::as_str);
    let reply = resolve_reply(
        state.llm.as_deref(),
        &state.config.llm_config.system_prompt,
        transcription,
    )
    .await;
    info!("Replying to caller: {:?}", reply);

    VoiceResponse::new().say(reply.text())
}
