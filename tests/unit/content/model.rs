use super::*;

const CHAPTER_JSON: &str = r#"{
  "chapters": [
    {
      "id": 1,
      "title": "Opening",
      "transitionIn": "section",
      "transitionOut": "micro",
      "layers": ["bg", "fg"],
      "frames": [
        { "id": "1A", "texts": [1, 2], "layerTransition": "section",
          "cues": [{ "cue": "crossfade", "from": "bg", "to": "fg", "jitter": true }] },
        { "id": "1B", "texts": [3], "holdAfter": 500 }
      ],
      "textBlocks": [
        { "num": 1, "content": "First line.", "type": "fragment", "style": "parchment",
          "position": { "top": "12%", "right": "0" } },
        { "num": 2, "content": "Second line.", "type": "fragment", "visibleDurationMs": 900 },
        { "num": 3, "content": "Hold.", "type": "beat", "effect": { "name": "violet", "active": true } }
      ]
    }
  ]
}"#;

#[test]
fn parses_camel_case_json() {
    let content = Content::from_reader(CHAPTER_JSON.as_bytes()).unwrap();
    content.validate().unwrap();

    let ch = content.chapter(ChapterId(1)).unwrap();
    assert_eq!(ch.transition_out, DurationToken::Micro);
    assert_eq!(ch.frames[0].layer_transition, Some(DurationToken::Section));
    assert_eq!(ch.frames[1].hold_after, Some(500));
    assert_eq!(
        ch.frames[0].cues[0],
        LayerCue::Crossfade {
            from: "bg".to_owned(),
            to: "fg".to_owned(),
            jitter: true
        }
    );

    let t1 = ch.text(TextNum(1)).unwrap();
    assert_eq!(t1.style, Some(TextStyle::Parchment));
    assert_eq!(
        t1.position.as_ref().unwrap().top.as_deref(),
        Some("12%")
    );
    assert_eq!(ch.text(TextNum(2)).unwrap().visible_duration_ms, Some(900));
    assert!(ch.text(TextNum(3)).unwrap().kind.is_signature());
    assert_eq!(
        ch.text(TextNum(3)).unwrap().effect.as_ref().unwrap().name,
        "violet"
    );
}

#[test]
fn chapter_lookup_requires_matching_id() {
    let content = Content::from_reader(CHAPTER_JSON.as_bytes()).unwrap();
    assert!(content.chapter(ChapterId(0)).is_none());
    assert!(content.chapter(ChapterId(2)).is_none());
    assert!(
        content
            .text(BridgeRef {
                chapter: ChapterId(1),
                text_num: TextNum(3)
            })
            .is_some()
    );
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = Content::from_reader("{ \"chapters\": 3 }".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrolltideError::Serde(_)));
}

#[test]
fn unknown_kind_is_rejected() {
    let json = CHAPTER_JSON.replace("\"type\": \"beat\"", "\"type\": \"shout\"");
    assert!(Content::from_reader(json.as_bytes()).is_err());
}

#[test]
fn signature_kinds() {
    assert!(!TextKind::Fragment.is_signature());
    assert!(TextKind::Beat.is_signature());
    assert!(TextKind::Consent.is_signature());
}
