use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::Stream;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatChunk, ChatMessage, ChatParams};

const DEFAULT_BASE_URL: &str = "http://localhost:11434/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for an Ollama-compatible local model server.
#[derive(Clone)]
pub struct Ollama {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Ollama {
    /// Create a new client for a server at the default local address.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => {
                // Validate eagerly so a bad --url fails at startup, not mid-send.
                Url::parse(&url)?;
                if url.ends_with('/') {
                    url
                } else {
                    format!("{url}/")
                }
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {e}"),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes requests, chunks, and skipped lines.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/x-ndjson"),
        );
        headers
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // Error bodies are `{"error": "..."}` when the server produced them.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {e}"),
                    Some(Box::new(e)),
                );
            }
        };

        let message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(error_body);
        Error::api(status_code, message)
    }

    /// Send a chat request and get a stream of decoded response chunks.
    ///
    /// Returns a stream of [`ChatChunk`] objects, one per parseable line of
    /// the newline-delimited JSON response body. Lines that fail to parse are
    /// counted, reported to the attached logger, and skipped. After a line
    /// with `done: true`, lines already received are still yielded but no
    /// further data is read from the network.
    pub async fn stream(
        &self,
        mut params: ChatParams,
    ) -> Result<impl Stream<Item = Result<ChatChunk>>> {
        params.stream = true;

        let url = format!("{}api/chat", self.base_url);

        if let Some(logger) = &self.logger {
            logger.log_request(&params);
        }
        observability::CLIENT_REQUESTS.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {e}"),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {e}"), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {e}"), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        // Convert reqwest errors to our error type before decoding
        let byte_stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                observability::STREAM_ERRORS.click();
                Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e)))
            })
        });

        Ok(decode_lines(byte_stream, self.logger.clone()))
    }

    /// Send a chat request and get the complete reassembled response.
    ///
    /// This drives [`Ollama::stream`] to completion, concatenating every
    /// content fragment in arrival order. A transport or HTTP-status failure
    /// at any point aborts the whole operation; no partial result is
    /// returned.
    pub async fn chat(&self, params: ChatParams) -> Result<ChatMessage> {
        let start = Instant::now();
        let stream = self.stream(params).await?;
        futures::pin_mut!(stream);

        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if let Some(fragment) = chunk.content() {
                content.push_str(fragment);
            }
        }
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let message = ChatMessage::assistant(content);
        if let Some(logger) = &self.logger {
            logger.log_message(&message);
        }
        Ok(message)
    }
}

impl std::fmt::Debug for Ollama {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ollama")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Decoder state for [`decode_lines`].
struct DecodeState<S> {
    stream: S,
    buffer: Vec<u8>,
    /// Set once a `done: true` line has been yielded; no further network
    /// reads happen, but lines already buffered still drain.
    stopping: bool,
    /// Set once the underlying stream has returned end-of-stream.
    eof: bool,
    logger: Option<Arc<dyn ClientLogger>>,
}

/// Process a stream of bytes into a stream of decoded NDJSON chunks.
///
/// Bytes accumulate in a buffer and complete newline-terminated lines are
/// split off as they become available, so a JSON object split across two HTTP
/// chunks is reassembled rather than dropped. UTF-8 conversion happens per
/// extracted line, not per chunk, so a multi-byte codepoint straddling a
/// chunk boundary stays in the buffer until its line completes. Blank lines
/// are skipped; lines that fail to parse are logged and skipped without
/// terminating the stream. A trailing unterminated line is flushed at
/// end-of-stream.
fn decode_lines<S>(
    byte_stream: S,
    logger: Option<Arc<dyn ClientLogger>>,
) -> impl Stream<Item = Result<ChatChunk>>
where
    S: Stream<Item = Result<Bytes>> + Unpin + 'static,
{
    let state = DecodeState {
        stream: byte_stream,
        buffer: Vec::new(),
        stopping: false,
        eof: false,
        logger,
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            // First drain any complete line already in the buffer.
            if let Some(line) = extract_line(&mut state.buffer) {
                match decode_line(line) {
                    Ok(line) => match parse_line(&line, &state.logger) {
                        Some(chunk) => {
                            if chunk.done {
                                state.stopping = true;
                            }
                            return Some((Ok(chunk), state));
                        }
                        None => continue,
                    },
                    Err(e) => return Some((Err(e), state)),
                }
            }

            // A done line stops further reads; anything left in the buffer at
            // this point arrived after it and is dropped.
            if state.stopping {
                return None;
            }

            if state.eof {
                // Flush the trailing unterminated line, if any.
                if state.buffer.is_empty() {
                    return None;
                }
                let line = std::mem::take(&mut state.buffer);
                match decode_line(line) {
                    Ok(line) => match parse_line(&line, &state.logger) {
                        Some(chunk) => return Some((Ok(chunk), state)),
                        None => return None,
                    },
                    Err(e) => return Some((Err(e), state)),
                }
            }

            match state.stream.next().await {
                Some(Ok(bytes)) => {
                    observability::STREAM_BYTES.count(bytes.len() as u64);
                    state.buffer.extend_from_slice(&bytes);
                }
                Some(Err(e)) => {
                    return Some((Err(e), state));
                }
                None => {
                    state.eof = true;
                }
            }
        }
    })
}

/// Extract one complete newline-terminated line from the byte buffer.
fn extract_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let newline = buffer.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=newline).collect();
    line.pop();
    Some(line)
}

/// Convert one extracted line to text.
fn decode_line(line: Vec<u8>) -> Result<String> {
    String::from_utf8(line).map_err(|e| {
        Error::encoding(format!("Invalid UTF-8 in stream: {e}"), Some(Box::new(e)))
    })
}

/// Parse one line as a chunk; blank and unparseable lines yield `None`.
fn parse_line(line: &str, logger: &Option<Arc<dyn ClientLogger>>) -> Option<ChatChunk> {
    if line.trim().is_empty() {
        return None;
    }
    observability::STREAM_LINES.click();
    match serde_json::from_str::<ChatChunk>(line) {
        Ok(chunk) => {
            if let Some(logger) = logger {
                logger.log_chunk(&chunk);
            }
            Some(chunk)
        }
        Err(e) => {
            observability::STREAM_PARSE_ERRORS.click();
            if let Some(logger) = logger {
                logger.log_skipped_line(line, &e);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunked(chunks: &[&str]) -> impl Stream<Item = Result<Bytes>> + Unpin + 'static {
        let items: Vec<Result<Bytes>> = chunks
            .iter()
            .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
            .collect();
        stream::iter(items)
    }

    async fn decode_to_text(chunks: &[&str]) -> String {
        let stream = decode_lines(chunked(chunks), None);
        futures::pin_mut!(stream);
        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            if let Some(fragment) = chunk.unwrap().content() {
                content.push_str(fragment);
            }
        }
        content
    }

    #[test]
    fn client_creation() {
        let client = Ollama::new().unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = Ollama::with_options(
            Some("http://192.168.1.5:11434".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://192.168.1.5:11434/");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_rejects_bad_url() {
        let result = Ollama::with_options(Some("not a url".to_string()), None);
        assert!(matches!(result, Err(Error::Url { .. })));
    }

    #[tokio::test]
    async fn decodes_fragments_in_order() {
        let text = decode_to_text(&[
            "{\"message\":{\"content\":\"Hel\"}}\n",
            "{\"message\":{\"content\":\"lo\"}}\n",
            "{\"done\":true}\n",
        ])
        .await;
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn decodes_many_lines_in_one_chunk() {
        let text = decode_to_text(&[
            "{\"message\":{\"content\":\"a\"}}\n{\"message\":{\"content\":\"b\"}}\n{\"message\":{\"content\":\"c\"}}\n{\"done\":true}\n",
        ])
        .await;
        assert_eq!(text, "abc");
    }

    #[tokio::test]
    async fn reassembles_line_split_across_chunks() {
        let text = decode_to_text(&[
            "{\"message\":{\"con",
            "tent\":\"Hello\"}}\n{\"done\":true}\n",
        ])
        .await;
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn reassembles_codepoint_split_across_chunks() {
        // The two bytes of 'é' arrive in different chunks; conversion per
        // extracted line carries the partial codepoint across the boundary.
        let body = "{\"message\":{\"content\":\"héllo\"}}\n{\"done\":true}\n";
        let bytes = body.as_bytes();
        let mid = body.find('é').unwrap() + 1;
        let items: Vec<Result<Bytes>> = vec![
            Ok(Bytes::copy_from_slice(&bytes[..mid])),
            Ok(Bytes::copy_from_slice(&bytes[mid..])),
        ];
        let stream = decode_lines(stream::iter(items), None);
        futures::pin_mut!(stream);
        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            if let Some(fragment) = chunk.unwrap().content() {
                content.push_str(fragment);
            }
        }
        assert_eq!(content, "héllo");
    }

    #[tokio::test]
    async fn invalid_utf8_line_surfaces_encoding_error() {
        let items: Vec<Result<Bytes>> =
            vec![Ok(Bytes::from_static(b"{\"message\":{\"content\":\"\xff\"}}\n"))];
        let stream = decode_lines(stream::iter(items), None);
        futures::pin_mut!(stream);
        let first = stream.next().await.unwrap();
        assert!(matches!(first, Err(Error::Encoding { .. })));
    }

    #[tokio::test]
    async fn malformed_line_is_skipped() {
        let text = decode_to_text(&[
            "{\"message\":{\"content\":\"keep\"}}\nnot json at all\n{\"message\":{\"content\":\" going\"}}\n{\"done\":true}\n",
        ])
        .await;
        assert_eq!(text, "keep going");
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let text = decode_to_text(&[
            "\n{\"message\":{\"content\":\"hi\"}}\n\n   \n{\"done\":true}\n",
        ])
        .await;
        assert_eq!(text, "hi");
    }

    #[tokio::test]
    async fn batch_drains_after_done() {
        // The done line and a further content line arrive in the same chunk;
        // the later line is still processed.
        let text = decode_to_text(&[
            "{\"message\":{\"content\":\"a\"}}\n{\"done\":true}\n{\"message\":{\"content\":\"b\"}}\n",
        ])
        .await;
        assert_eq!(text, "ab");
    }

    #[tokio::test]
    async fn chunks_after_done_are_not_read() {
        let stream = decode_lines(
            chunked(&[
                "{\"done\":true}\n",
                "{\"message\":{\"content\":\"late\"}}\n",
            ]),
            None,
        );
        futures::pin_mut!(stream);
        let first = stream.next().await.unwrap().unwrap();
        assert!(first.done);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn trailing_unterminated_line_is_flushed() {
        let text = decode_to_text(&["{\"message\":{\"content\":\"end\"}}"]).await;
        assert_eq!(text, "end");
    }

    #[tokio::test]
    async fn transport_error_surfaces() {
        let items: Vec<Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"{\"message\":{\"content\":\"x\"}}\n")),
            Err(Error::streaming("connection reset", None)),
        ];
        let stream = decode_lines(stream::iter(items), None);
        futures::pin_mut!(stream);
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
    }
}
