use lyricdiff_core::checkout::{line_change_summaries, CheckoutData, CheckoutMeta};
use lyricdiff_core::notify::{NoticeLevel, RecordingNotifier};
use lyricdiff_core::{
    count_changed, distinct_changed_words, DiffAlgorithm, Document, EngineConfig, LyricEngine,
    PricingTable,
};

const HUNGRY: &str = "hungry hungry hippo\n\
                      I'm hungry, so hungry\n\
                      Feeling hungry, tonight\n\
                      Still hungry, baby";

fn engine() -> LyricEngine {
    LyricEngine::default()
}

#[test]
fn test_single_word_substitution() {
    let engine = engine();
    let doc = Document::from_lyrics("I take it easy, babe, I");

    let doc = engine.edit_line(&doc, 1, "I take it steady, babe, I");
    let line = &doc.lines[0];
    assert_eq!(line.modified, "I take it steady, babe, I");
    assert_eq!(
        line.marked_text,
        r#"I take it <span class="text-red-600">steady</span>, babe, I"#
    );
    assert_eq!(count_changed(line), 1);

    let doc = engine.edit_line(&doc, 1, "I take it easy, babe, I");
    let line = &doc.lines[0];
    assert_eq!(count_changed(line), 0);
    assert_eq!(line.marked_text, line.original);
}

#[test]
fn test_deleting_last_word_keeps_punctuation() {
    let engine = engine();
    let doc = Document::from_lyrics("Hello, world!");

    let doc = engine.edit_line(&doc, 1, "Hi, planet!");
    assert_eq!(count_changed(&doc.lines[0]), 2);
    assert_eq!(
        doc.lines[0].marked_text,
        r#"<span class="text-red-600">Hi</span>, <span class="text-red-600">planet</span>!"#
    );

    let doc = engine.edit_line(&doc, 1, "Hi, !");
    let line = &doc.lines[0];
    assert_eq!(line.modified, "Hi, 🗙!");
    assert_eq!(count_changed(line), 1);
    assert!(line
        .marked_text
        .ends_with(r#"<span class="text-red-600">🗙</span>!"#));
}

#[test]
fn test_clearing_a_line_deletes_each_word() {
    let engine = engine();
    let doc = Document::from_lyrics("Word one two");

    let doc = engine.edit_line(&doc, 1, "");
    let line = &doc.lines[0];
    assert_eq!(line.modified, "🗙 🗙 🗙");
    assert_eq!(line.word_changes.len(), 3);
    assert!(line
        .word_changes
        .iter()
        .all(|c| c.is_deletion() && c.is_explicit_deletion));
    assert_eq!(line.marked_text.matches("🗙").count(), 3);
    assert_eq!(count_changed(line), 3);
}

#[test]
fn test_replace_all_is_cumulative_from_original() {
    let engine = engine();
    let doc = Document::from_lyrics(HUNGRY);

    let outcome = engine.replace_all(&doc, "hungry", "horny", None);
    assert_eq!(outcome.replacements, 6);
    assert_eq!(outcome.lines_changed, 4);

    let counts: Vec<usize> = outcome.document.iter().map(count_changed).collect();
    assert_eq!(counts, vec![2, 2, 1, 1]);

    let outcome = engine.replace_all(&outcome.document, "horny,", "hungry", None);
    assert_eq!(outcome.replacements, 3);

    let lines = &outcome.document.lines;
    assert_eq!(lines[0].modified, "horny horny hippo");
    assert_eq!(lines[1].modified, "I'm hungry, so horny");
    assert_eq!(lines[2].modified, lines[2].original);
    assert_eq!(lines[3].modified, lines[3].original);

    let counts: Vec<usize> = outcome.document.iter().map(count_changed).collect();
    assert_eq!(counts, vec![2, 1, 0, 0]);
}

#[test]
fn test_no_op_edit_is_idempotent() {
    let engine = engine();
    let doc = Document::from_lyrics("Hello, world!\nWord one two\nso very very tired");
    let doc = engine.edit_line(&doc, 1, "Hi, !");
    let doc = engine.edit_line(&doc, 2, "");
    let doc = engine.edit_line(&doc, 3, "so tired");

    for line in doc.iter() {
        let again = engine.edit_line(&doc, line.id, &line.modified);
        let same = again.line(line.id).unwrap();
        assert_eq!(same.word_changes, line.word_changes);
        assert_eq!(same.marked_text, line.marked_text);
    }
}

#[test]
fn test_reset_undoes_any_history() {
    let engine = engine();
    let doc = Document::from_lyrics(HUNGRY);
    let doc = engine.replace_all(&doc, "hungry", "starving", None).document;
    let doc = engine.edit_line(&doc, 2, "");
    let doc = engine.edit_line(&doc, 3, "Feeling fine");

    let reset = engine.reset_line(&doc, 2);
    let line = reset.line(2).unwrap();
    assert_eq!(line.modified, line.original);
    assert_eq!(line.marked_text, line.original);
    assert!(!line.has_changes());

    let reset = engine.reset_all(&doc);
    assert!(reset.iter().all(|l| l.modified == l.original && l.marked_text == l.original));
    assert!(distinct_changed_words(&reset.lines).is_empty());
}

#[test]
fn test_edit_history_does_not_matter() {
    let engine = engine();
    let doc = Document::from_lyrics("we were young and free");

    let direct = engine.edit_line(&doc, 1, "we were old and tired");
    let stepped = engine.edit_line(&doc, 1, "we are young");
    let stepped = engine.edit_line(&stepped, 1, "we were old and tired");

    assert_eq!(direct, stepped);
}

#[test]
fn test_replace_and_revert_restores_distinct_words() {
    let engine = engine();
    let doc = Document::from_lyrics(HUNGRY);
    assert!(distinct_changed_words(&doc.lines).is_empty());

    let there = engine.replace_all(&doc, "hungry", "horny", None).document;
    assert!(!distinct_changed_words(&there.lines).is_empty());

    let back = engine.replace_all(&there, "horny", "hungry", None).document;
    assert!(distinct_changed_words(&back.lines).is_empty());
    assert!(back.iter().all(|l| l.modified == l.original));
}

#[test]
fn test_pricing_follows_distinct_words() {
    let engine = engine();
    let doc = Document::from_lyrics("one two three four five");

    assert_eq!(engine.quote(&doc).price, 0);

    let doc = engine.edit_line(&doc, 1, "uno two three four five");
    let quote = engine.quote(&doc);
    assert_eq!(quote.word_count(), 1);
    assert_eq!(quote.price, 45);

    let doc = engine.edit_line(&doc, 1, "uno dos tres cuatro five");
    let quote = engine.quote(&doc);
    assert_eq!(quote.changed_words, vec!["uno dos tres cuatro"]);
    assert_eq!(quote.price, 45);
}

#[test]
fn test_cjk_lines_diff_by_character() {
    let engine = engine();
    let doc = Document::from_lyrics("我爱你");

    let doc = engine.edit_line(&doc, 1, "我恨你们");
    let line = &doc.lines[0];
    assert_eq!(line.marked_text, "我恨你们");
    assert_eq!(count_changed(line), 2);
}

#[test]
fn test_algorithms_agree_on_counts() {
    for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience, DiffAlgorithm::Lcs] {
        let engine = LyricEngine::new(EngineConfig::new().with_algorithm(algorithm));
        let doc = Document::from_lyrics("I take it easy, babe, I");
        let doc = engine.edit_line(&doc, 1, "I take it steady, babe, I");
        assert_eq!(count_changed(&doc.lines[0]), 1, "{:?}", algorithm);
    }
}

#[test]
fn test_empty_search_term_notifies() {
    let notifier = RecordingNotifier::new();
    let doc = Document::from_lyrics(HUNGRY);

    let outcome = engine().replace_all(&doc, "   ", "x", Some(&notifier));
    assert_eq!(outcome.document, doc);
    assert_eq!(outcome.replacements, 0);
    assert_eq!(
        notifier.notices(),
        vec![(NoticeLevel::Error, "Please enter a search term".to_string())]
    );
}

#[test]
fn test_checkout_round_trip_resumes_editing() {
    let engine = engine();
    let doc = Document::from_lyrics("Hello, world!\nI take it easy, babe, I\nWord one two\nleft alone");
    let doc = engine.edit_line(&doc, 1, "Hi, !");
    let doc = engine.edit_line(&doc, 2, "I take it steady, babe, I");
    let doc = engine.edit_line(&doc, 3, "");

    let meta = CheckoutMeta {
        title: "Song".into(),
        generated_at: "2026-10-16T12:00:00Z".into(),
        ..Default::default()
    };
    let checkout = CheckoutData::from_document(meta, &doc, &PricingTable::default());
    let json = checkout.to_json().unwrap();
    let parsed = CheckoutData::from_json(&json).unwrap();
    assert_eq!(parsed, checkout);

    let resumed = parsed.resume(&engine);
    assert_eq!(resumed.len(), 4);
    assert_eq!(resumed.modified_lyrics(), doc.modified_lyrics());
    for (live, back) in doc.iter().zip(resumed.iter()) {
        assert_eq!(count_changed(back), count_changed(live), "line {}", live.id);
        assert_eq!(back.marked_text, live.marked_text, "line {}", live.id);
        if live.has_changes() {
            assert_eq!(back.word_changes, live.word_changes, "line {}", live.id);
        }
    }
    assert_eq!(
        distinct_changed_words(&resumed.lines),
        distinct_changed_words(&doc.lines)
    );
    assert_eq!(engine.quote(&resumed), engine.quote(&doc));

    assert_eq!(
        line_change_summaries(&doc),
        vec![
            r#"Line 1: "Hello, world!" -> "Hi, !""#.to_string(),
            r#"Line 2: "I take it easy, babe, I" -> "I take it steady, babe, I""#.to_string(),
            r#"Line 3: "Word one two" -> """#.to_string(),
        ]
    );
}

#[test]
fn test_replacement_containing_the_term_counts_once() {
    let engine = engine();
    let doc = Document::from_lyrics("oh baby, yeah\noh Baby, no");

    let outcome = engine.replace_all(&doc, "baby,", "my baby", None);
    assert_eq!(outcome.replacements, 2);
    assert_eq!(outcome.document.lines[0].modified, "oh my baby, yeah");
    assert_eq!(outcome.document.lines[1].modified, "oh my baby, no");
}

#[test]
fn test_no_op_edit_after_replace_all() {
    let engine = engine();
    let doc = Document::from_lyrics("oh baby !\nbaby baby\nI'm hungry, so hungry");
    let doc = engine.replace_all(&doc, "baby", "", None).document;
    let doc = engine.replace_all(&doc, "hungry,", "starving", None).document;

    for line in doc.iter() {
        let again = engine.edit_line(&doc, line.id, &line.modified);
        assert_eq!(again.line(line.id), Some(line), "line {}", line.id);
    }
}

#[test]
fn test_document_snapshot_round_trip() {
    let engine = engine();
    let doc = Document::from_lyrics(HUNGRY);
    let doc = engine.replace_all(&doc, "hungry", "horny", None).document;

    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
