use framewire::{Outcome, interpret};

#[test]
fn success_text_is_extracted_and_unescaped() {
    let response = br#"{
  "candidates": [
    {
      "content": {
        "parts": [
          {
            "text": "A cat.\nProbably asleep."
          }
        ]
      }
    }
  ]
}"#;
    assert_eq!(
        interpret(response),
        Outcome::Text("A cat.\nProbably asleep.".into())
    );
}

#[test]
fn error_wins_over_text() {
    let response = br#"{"error": {"code": 429, "message": "quota exceeded"}, "candidates": [{"content": {"parts": [{"text": "ignored"}]}}]}"#;
    assert_eq!(
        interpret(response),
        Outcome::ApiError {
            message: Some("quota exceeded".into())
        }
    );
}

#[test]
fn error_without_message_is_still_an_error() {
    assert_eq!(
        interpret(br#"{"error": {"status": "INTERNAL"}}"#),
        Outcome::ApiError { message: None }
    );
}

#[test]
fn unrecognized_shapes_are_malformed() {
    assert_eq!(interpret(b"{}"), Outcome::Malformed);
    assert_eq!(interpret(b"gateway timeout"), Outcome::Malformed);
    assert_eq!(
        interpret(br#"{"text": "never closed"#),
        Outcome::Malformed
    );
}
