//! Basic usage example of the lyricdiff library
//!
//! Run with `RUST_LOG=lyricdiff_core=debug` to see the engine's logs.

use lyricdiff_core::checkout::{line_change_summaries, CheckoutData, CheckoutMeta};
use lyricdiff_core::{count_changed, Document, LyricEngine, TracingNotifier};

const LINE: &str = "----------------------------------------";

const LYRICS: &str = "I take it easy, babe, I\n\
                      Hello, world!\n\
                      Word one two\n\
                      I'm hungry, so hungry\n\
                      (Chorus)";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyricdiff_core=info".into()),
        )
        .init();

    println!("=== Lyric Diff Examples ===\n");

    let engine = LyricEngine::default();
    let doc = Document::from_lyrics(LYRICS);

    // Example 1: Editing lines
    let doc = example_edits(&engine, doc);

    // Example 2: Replace all
    let doc = example_replace(&engine, doc);

    // Example 3: Checkout snapshot
    example_checkout(&engine, &doc);
}

fn print_document(doc: &Document) {
    for line in doc {
        println!("  {:>2}. {}", line.id, line.marked_text);
        println!("      changed words: {}", count_changed(line));
    }
}

fn example_edits(engine: &LyricEngine, doc: Document) -> Document {
    println!("Example 1: Line Edits");
    println!("{}", LINE);

    let doc = engine.edit_line(&doc, 1, "I take it steady, babe, I");
    let doc = engine.edit_line(&doc, 2, "Hi, !");
    let doc = engine.edit_line(&doc, 3, "");

    print_document(&doc);
    println!("\n");
    doc
}

fn example_replace(engine: &LyricEngine, doc: Document) -> Document {
    println!("Example 2: Replace All");
    println!("{}", LINE);

    let outcome = engine.replace_all(&doc, "hungry", "starving", Some(&TracingNotifier));
    println!(
        "  {} replacement(s) on {} line(s)",
        outcome.replacements, outcome.lines_changed
    );

    print_document(&outcome.document);
    println!("\n");
    outcome.document
}

fn example_checkout(engine: &LyricEngine, doc: &Document) {
    println!("Example 3: Checkout");
    println!("{}", LINE);

    let quote = engine.quote(doc);
    println!("  Changed words: {:?}", quote.changed_words);
    println!("  Price: ${}", quote.price);

    for summary in line_change_summaries(doc) {
        println!("  {}", summary);
    }

    let meta = CheckoutMeta {
        title: "Demo Song".into(),
        artist: "Demo Artist".into(),
        generated_at: "2026-10-16T00:00:00Z".into(),
        ..Default::default()
    };
    let checkout = CheckoutData::from_document(meta, doc, &engine.config().pricing);
    match checkout.to_json() {
        Ok(json) => println!("\n  Snapshot: {}", json),
        Err(err) => eprintln!("  Snapshot failed: {}", err),
    }

    let resumed = checkout.resume(engine);
    println!(
        "  Resumed {} lines, same lyrics: {}",
        resumed.len(),
        resumed.modified_lyrics() == doc.modified_lyrics()
    );
}
