//! Inbound chat messages.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use orchestrator::{KeyboardHint, Reply};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::state::AppState;

/// One text event from the chat front-end.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub user_id: i64,
    pub chat_id: i64,
    pub text: String,
}

/// What the front-end should send back and which buttons to show.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyBody {
    pub text: String,
    pub keyboard: KeyboardHint,
    pub buttons: Vec<String>,
    pub attachment: Option<AttachmentBody>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachmentBody {
    pub file_name: String,
    pub content_base64: String,
}

impl From<Reply> for ReplyBody {
    fn from(reply: Reply) -> Self {
        Self {
            text: reply.text,
            keyboard: reply.keyboard,
            buttons: reply
                .keyboard
                .buttons()
                .into_iter()
                .map(str::to_string)
                .collect(),
            attachment: reply.attachment.map(|a| AttachmentBody {
                file_name: a.file_name,
                content_base64: STANDARD.encode(a.bytes),
            }),
        }
    }
}

/// `POST /v1/messages`
pub async fn handle_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(message): Json<InboundMessage>,
) -> Result<Json<ReplyBody>> {
    authorize(&state, &headers)?;

    debug!(
        user = message.user_id,
        chat = message.chat_id,
        "Inbound message"
    );
    let reply = state
        .controller
        .handle(message.user_id, message.chat_id, &message.text)
        .await;

    Ok(Json(reply.into()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(GatewayError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(GatewayError::Unauthorized);
    };

    match value.strip_prefix("Bearer ") {
        Some(token) if token == &*state.bot_token => Ok(()),
        _ => Err(GatewayError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator::Attachment;

    #[test]
    fn test_reply_body_from_reply() {
        let reply = Reply {
            text: String::new(),
            keyboard: KeyboardHint::Idle,
            attachment: Some(Attachment {
                file_name: "logs.log".to_string(),
                bytes: b"hello".to_vec(),
            }),
        };

        let body = ReplyBody::from(reply);
        assert_eq!(body.buttons, vec!["/help", "/new_chat"]);
        let attachment = body.attachment.unwrap();
        assert_eq!(attachment.file_name, "logs.log");
        assert_eq!(attachment.content_base64, "aGVsbG8=");
    }
}
