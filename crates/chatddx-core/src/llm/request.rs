//! Building a [`ChatCompletionRequest`] from a chat configuration.

use std::collections::BTreeMap;

use chatddx_types::chat::{ChatMessage, MessageRole};
use chatddx_types::cluster::{ChatConfig, LogitBias};
use chatddx_types::llm::ChatCompletionRequest;

/// Merge the configured preamble with the browser's messages.
///
/// Preamble messages keep their optional `name`; browser messages are reduced
/// to role and content. Sampling parameters are copied only when set and
/// `logit_bias` is converted to the `{token: bias}` map the API expects.
pub fn build_completion_request(
    config: &ChatConfig,
    browser_messages: &[ChatMessage],
) -> ChatCompletionRequest {
    let messages = config
        .messages
        .iter()
        .cloned()
        .chain(browser_messages.iter().map(ChatMessage::without_name))
        .collect();

    ChatCompletionRequest {
        model: config.model.clone(),
        messages,
        stream: config.stream,
        logit_bias: config.logit_bias.as_deref().and_then(logit_bias_map),
        frequency_penalty: config.frequency_penalty,
        max_tokens: config.max_tokens,
        presence_penalty: config.presence_penalty,
        temperature: config.temperature,
        top_p: config.top_p,
        user: config.user.clone(),
    }
}

/// `[{token, bias}]` to `{token: bias}`; later entries win; empty lists vanish.
fn logit_bias_map(entries: &[LogitBias]) -> Option<BTreeMap<String, i32>> {
    if entries.is_empty() {
        return None;
    }

    Some(
        entries
            .iter()
            .map(|e| (e.token.clone(), e.bias.clamp(-100, 100)))
            .collect(),
    )
}

/// Text of the last `user` message, used as the logged prompt.
pub fn last_user_prompt(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::User)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}
