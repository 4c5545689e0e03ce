use polytrans::providers::gemini::extract_stream_text;
use polytrans::providers::openai::{parse_sse_line, SseAssembler, SseLine};

#[test]
fn test_extractStreamText_withTextField_shouldReturnValue() {
    let fragment = r#"[{ "candidates": [{ "content": { "parts": [{ "text": "你好" }] } }] }"#;
    assert_eq!(extract_stream_text(fragment), vec!["你好".to_string()]);
}

#[test]
fn test_extractStreamText_withCoalescedElements_shouldReturnEveryMatch() {
    // One network read can carry several streamed elements; every text field
    // is delivered so the concatenation reconstructs the full output.
    let fragment = r#"{"text": "Hello "}, {"text": "world"}"#;
    let chunks = extract_stream_text(fragment);
    assert_eq!(chunks, vec!["Hello ".to_string(), "world".to_string()]);
    assert_eq!(chunks.concat(), "Hello world");
}

#[test]
fn test_extractStreamText_withEscapedNewlines_shouldUnescape() {
    let fragment = r#""text": "line one\nline two""#;
    assert_eq!(
        extract_stream_text(fragment),
        vec!["line one\nline two".to_string()]
    );
}

#[test]
fn test_extractStreamText_withEscapedQuotes_shouldUnescape() {
    let fragment = r#""text": "say \"hi\" with a \\ mark""#;
    assert_eq!(
        extract_stream_text(fragment),
        vec![r#"say "hi" with a \ mark"#.to_string()]
    );
}

#[test]
fn test_extractStreamText_withEscapedBackslashBeforeN_shouldKeepLiteralN() {
    // The sequence backslash-backslash-n decodes to a literal backslash
    // followed by the letter n, not to a newline.
    let fragment = r#""text": "a\\nb""#;
    assert_eq!(extract_stream_text(fragment), vec!["a\\nb".to_string()]);
}

#[test]
fn test_extractStreamText_withNoTextField_shouldReturnNothing() {
    assert!(extract_stream_text(r#"{"promptFeedback":{}}"#).is_empty());
    assert!(extract_stream_text("").is_empty());
}

#[test]
fn test_parseSseLine_withDataLine_shouldReturnChunk() {
    let line = r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#;
    assert_eq!(parse_sse_line(line), SseLine::Chunk("Hel".to_string()));
}

#[test]
fn test_parseSseLine_withDoneMarker_shouldReturnDone() {
    assert_eq!(parse_sse_line("data: [DONE]"), SseLine::Done);
}

#[test]
fn test_parseSseLine_withNoiseLines_shouldReturnSkip() {
    // Comments, empty deltas and non-data lines all pass through silently.
    assert_eq!(parse_sse_line(": keep-alive"), SseLine::Skip);
    assert_eq!(parse_sse_line(""), SseLine::Skip);
    assert_eq!(
        parse_sse_line(r#"data: {"choices":[{"delta":{}}]}"#),
        SseLine::Skip
    );
    assert_eq!(
        parse_sse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
        SseLine::Skip
    );
    assert_eq!(parse_sse_line("data: not json"), SseLine::Skip);
}

#[test]
fn test_sseAssembler_withSplitFragments_shouldReassembleLine() {
    // One SSE line arriving split across three network reads must decode
    // exactly once.
    let mut assembler = SseAssembler::new();
    assert!(assembler.push("data: {\"choices\":[{\"del").is_empty());
    assert!(assembler.push("ta\":{\"content\":\"Hello\"}}]}").is_empty());
    let chunks = assembler.push("\n");
    assert_eq!(chunks, vec!["Hello".to_string()]);
}

#[test]
fn test_sseAssembler_withMultipleLines_shouldReturnAllChunks() {
    let mut assembler = SseAssembler::new();
    let fragment = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
    );
    assert_eq!(assembler.push(fragment), vec!["a".to_string(), "b".to_string()]);
    assert!(!assembler.is_done());
}

#[test]
fn test_sseAssembler_withDoneMarker_shouldStopDelivery() {
    let mut assembler = SseAssembler::new();
    let fragment = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}\n",
        "data: [DONE]\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
    );
    assert_eq!(assembler.push(fragment), vec!["tail".to_string()]);
    assert!(assembler.is_done());
    assert!(assembler.push("data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n").is_empty());
}
