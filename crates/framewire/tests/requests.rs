use base64::{Engine as _, engine::general_purpose::STANDARD};
use framewire::{BuildError, RequestOptions, WriteBuf, build_request, required_capacity};
use serde_json::Value;

fn build(frame: &[u8], prompt: &str, options: &RequestOptions<'_>) -> Vec<u8> {
    let mut storage = vec![0u8; required_capacity(frame.len(), prompt, options)];
    let mut out = WriteBuf::new(&mut storage);
    let written = build_request(frame, prompt, options, &mut out).unwrap();
    assert_eq!(written, out.len());
    out.as_bytes().to_vec()
}

#[test]
fn scaffold_round_trips_frame_and_prompt() {
    let frame: Vec<u8> = (0u8..10).collect();
    let body = build(&frame, "hi", &RequestOptions::default());

    let value: Value = serde_json::from_slice(&body).unwrap();
    let parts = &value["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "hi");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
    let data = parts[1]["inline_data"]["data"].as_str().unwrap();
    assert_eq!(STANDARD.decode(data).unwrap(), frame);
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
}

#[test]
fn wire_format_is_bit_exact() {
    let body = build(&[0, 1, 2], "hi", &RequestOptions::default());
    let expected: &[u8] = br#"{"contents":[{"parts":[{"text":"hi"},{"inline_data":{"mime_type":"image/jpeg","data":"AAEC"}}]}],"generationConfig":{"maxOutputTokens":100}}"#;
    assert_eq!(body.as_slice(), expected);
}

#[test]
fn prompt_escaping_survives_the_wire() {
    let prompt = "say \"cheese\"\nplease";
    let body = build(b"x", prompt, &RequestOptions::default());
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["contents"][0]["parts"][0]["text"], prompt);
}

#[test]
fn options_control_mime_type_and_token_limit() {
    let options = RequestOptions {
        mime_type: "image/png",
        max_output_tokens: 5,
    };
    let body = build(&[0u8; 32], "p", &options);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/png"
    );
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 5);
}

#[test]
fn undersized_buffer_fails_fast_without_writing() {
    let frame = vec![0u8; 1024];
    let mut storage = [0u8; 1];
    let mut out = WriteBuf::new(&mut storage);

    let err = build_request(&frame, "hi", &RequestOptions::default(), &mut out).unwrap_err();
    assert!(matches!(err, BuildError::Capacity { capacity: 1, .. }));
    assert!(out.is_empty());
}

#[test]
fn estimate_is_sufficient_for_awkward_lengths() {
    // Frame lengths around the three-byte group boundary, with an
    // escape-heavy prompt that doubles in size on the wire.
    let prompt = "\"\\\n\t escape heavy \"";
    for len in [0usize, 1, 2, 3, 4, 5, 1021, 1022, 1023, 1024] {
        let frame = vec![0x5Au8; len];
        let body = build(&frame, prompt, &RequestOptions::default());
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], prompt);
        let data = value["contents"][0]["parts"][1]["inline_data"]["data"]
            .as_str()
            .unwrap();
        assert_eq!(STANDARD.decode(data).unwrap(), frame);
    }
}
