//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! The completions endpoint streams `data: {chunk}` events terminated by
//! `data: [DONE]`. Each chunk may carry a content delta, a finish reason,
//! or (with `stream_options.include_usage`) a usage block with no choices.

use futures_util::StreamExt;
use reqwest_eventsource::{Error as EventSourceError, Event, EventSource};

use chatddx_core::llm::provider::EventStream;
use chatddx_types::llm::{ChatCompletionChunk, LlmError, StreamEvent, Usage};

use super::status_error;

/// Sentinel payload that ends an OpenAI stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Translate one SSE `data:` payload into stream events.
///
/// Returns `[Done]` for the `[DONE]` sentinel. Empty content deltas (the
/// role-only first chunk) produce no event.
pub(crate) fn parse_chunk_data(data: &str) -> Result<Vec<StreamEvent>, LlmError> {
    if data.trim() == DONE_SENTINEL {
        return Ok(vec![StreamEvent::Done]);
    }

    let chunk: ChatCompletionChunk = serde_json::from_str(data)
        .map_err(|e| LlmError::Deserialization(format!("invalid stream chunk: {e}")))?;

    let mut events = Vec::new();
    for choice in chunk.choices {
        if let Some(text) = choice.delta.content
            && !text.is_empty()
        {
            events.push(StreamEvent::TextDelta { text });
        }
        if let Some(reason) = choice.finish_reason {
            events.push(StreamEvent::Finish { reason });
        }
    }

    if let Some(usage) = chunk.usage {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        }));
    }

    Ok(events)
}

/// Map an [`EventSource`] over a completions request to a stream of [`StreamEvent`]s.
///
/// The event source is closed on `[DONE]`, on the server closing the
/// connection, and on the first error, so it never reconnects.
pub(crate) fn map_event_source(source: EventSource) -> EventStream {
    Box::pin(async_stream::stream! {
        let mut source = source;

        while let Some(next) = source.next().await {
            let message = match next {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => message,
                Err(EventSourceError::StreamEnded) => break,
                Err(EventSourceError::InvalidStatusCode(status, response)) => {
                    source.close();
                    let body = response.text().await.unwrap_or_default();
                    yield Err::<StreamEvent, LlmError>(status_error(status, &body));
                    return;
                }
                Err(e) => {
                    source.close();
                    yield Err(LlmError::Stream(e.to_string()));
                    return;
                }
            };

            match parse_chunk_data(&message.data) {
                Ok(events) => {
                    for event in events {
                        let done = event == StreamEvent::Done;
                        yield Ok(event);
                        if done {
                            source.close();
                            return;
                        }
                    }
                }
                Err(e) => {
                    source.close();
                    yield Err(e);
                    return;
                }
            }
        }

        source.close();
        yield Ok(StreamEvent::Done);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_sentinel() {
        assert_eq!(parse_chunk_data("[DONE]").unwrap(), vec![StreamEvent::Done]);
        assert_eq!(parse_chunk_data(" [DONE] ").unwrap(), vec![StreamEvent::Done]);
    }

    #[test]
    fn test_role_only_first_chunk_is_silent() {
        let data = r#"{"id":"c","choices":[{"index":0,"delta":{"role":"assistant","content":""},"finish_reason":null}]}"#;
        assert!(parse_chunk_data(data).unwrap().is_empty());
    }

    #[test]
    fn test_content_and_finish() {
        let data = r#"{"id":"c","choices":[{"index":0,"delta":{"content":"sis"},"finish_reason":"stop"}]}"#;
        assert_eq!(
            parse_chunk_data(data).unwrap(),
            vec![
                StreamEvent::TextDelta { text: "sis".into() },
                StreamEvent::Finish { reason: "stop".into() },
            ]
        );
    }

    #[test]
    fn test_usage_chunk() {
        let data = r#"{"id":"c","choices":[],"usage":{"prompt_tokens":9,"completion_tokens":3,"total_tokens":12}}"#;
        assert_eq!(
            parse_chunk_data(data).unwrap(),
            vec![StreamEvent::Usage(Usage {
                input_tokens: 9,
                output_tokens: 3
            })]
        );
    }

    #[test]
    fn test_garbage_is_deserialization_error() {
        let err = parse_chunk_data("{not json").unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }
}
